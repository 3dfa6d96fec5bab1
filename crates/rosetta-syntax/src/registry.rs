//! Registry for front-ends.

use crate::frontend::FrontEnd;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Global front-end registry.
static FRONTENDS: RwLock<Vec<&'static dyn FrontEnd>> = RwLock::new(Vec::new());
static FRONTENDS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom front-end.
///
/// Front-ends registered later do not shadow earlier ones for the same
/// language or extension.
pub fn register_frontend(frontend: &'static dyn FrontEnd) {
    FRONTENDS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(frontend);
}

fn init_frontends() {
    FRONTENDS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "read-typescript")]
        {
            register_frontend(&crate::input::typescript::TYPESCRIPT_FRONTEND);
        }
    });
}

/// Get a front-end by language name.
pub fn frontend_for_language(lang: &str) -> Option<&'static dyn FrontEnd> {
    init_frontends();
    FRONTENDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|f| f.language() == lang)
        .copied()
}

/// Get a front-end by file extension.
pub fn frontend_for_extension(ext: &str) -> Option<&'static dyn FrontEnd> {
    init_frontends();
    FRONTENDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|f| f.extensions().contains(&ext))
        .copied()
}

/// Get all registered front-ends.
pub fn frontends() -> Vec<&'static dyn FrontEnd> {
    init_frontends();
    FRONTENDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ParseError;
    use crate::tree::{SyntaxNode, SyntaxTree};

    struct PlainText;

    impl FrontEnd for PlainText {
        fn language(&self) -> &'static str {
            "plaintext"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["txt"]
        }

        fn parse(&self, file_name: &str, contents: &str) -> Result<SyntaxTree, ParseError> {
            let root = SyntaxNode::new("document", 0..contents.len());
            Ok(SyntaxTree::new(file_name, contents, root))
        }
    }

    static PLAIN_TEXT: PlainText = PlainText;

    #[test]
    #[cfg(feature = "read-typescript")]
    fn test_frontend_lookup() {
        let frontend = frontend_for_language("typescript").expect("typescript front-end");
        assert_eq!(frontend.language(), "typescript");
        assert!(frontend.extensions().contains(&"ts"));

        let frontend = frontend_for_extension("ts").expect("ts extension");
        assert_eq!(frontend.language(), "typescript");
    }

    #[test]
    fn test_register_custom_frontend() {
        register_frontend(&PLAIN_TEXT);
        let frontend = frontend_for_extension("txt").expect("registered front-end");
        assert_eq!(frontend.language(), "plaintext");
        assert!(frontends().iter().any(|f| f.language() == "plaintext"));

        let tree = frontend.parse("notes.txt", "hello").unwrap();
        assert_eq!(tree.root().kind(), "document");
    }

    #[test]
    fn test_unknown_language() {
        assert!(frontend_for_language("cobol").is_none());
        assert!(frontend_for_extension("cbl").is_none());
    }
}
