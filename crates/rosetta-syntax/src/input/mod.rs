//! Built-in front-ends - parse source code into syntax trees.

#[cfg(feature = "read-typescript")]
pub mod typescript;

#[cfg(feature = "read-typescript")]
pub use typescript::{TYPESCRIPT_FRONTEND, TypeScriptFrontEnd, parse_typescript};
