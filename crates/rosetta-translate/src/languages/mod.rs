//! Target languages and lookup of visitors by name.

#[cfg(feature = "write-python")]
pub mod python;

#[cfg(feature = "write-python")]
pub use python::PythonVisitor;

use crate::config::TranslateConfig;
use crate::visitor::{DefaultVisitor, Visitor, VisualizeVisitor};

/// Names accepted by [`visitor_for_language`].
pub fn languages() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "write-python")]
    names.push("python");
    names.push("default");
    names.push("visualize");
    names
}

/// Build the visitor for a target language.
#[cfg_attr(not(feature = "write-python"), allow(unused_variables))]
pub fn visitor_for_language(name: &str, config: &TranslateConfig) -> Option<Box<dyn Visitor>> {
    match name {
        #[cfg(feature = "write-python")]
        "python" | "py" => Some(Box::new(PythonVisitor::with_config(&config.python))),
        "default" => Some(Box::new(DefaultVisitor)),
        "visualize" => Some(Box::new(VisualizeVisitor)),
        _ => None,
    }
}
