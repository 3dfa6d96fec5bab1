//! Syntax trees and front-ends for sample translation.
//!
//! `rosetta-syntax` owns everything that happens before translation starts:
//! parsing source text into an owned [`SyntaxTree`], and locating comment
//! trivia around node offsets.
//!
//! # Architecture
//!
//! ```text
//! Source text         Front-end            Tree
//! ───────────    ───────────────────    ──────────────────────────
//! TypeScript  ──> TypeScriptFrontEnd ──> SyntaxTree { SyntaxNode }
//! (future)    ──> (future)           ─┘        │
//!                                             └─> trivia::{leading,trailing}_comment_ranges
//! ```
//!
//! Comments never appear as structural children. Every node instead records
//! its *full start* (the offset where its leading trivia begins) so a
//! consumer can find the comments that belong to it by scanning raw text.
//!
//! # Example
//!
//! ```ignore
//! use rosetta_syntax::{FrontEnd, TypeScriptFrontEnd};
//!
//! let tree = TypeScriptFrontEnd.parse("index.ts", "foo(1);")?;
//! assert_eq!(tree.root().kind(), "program");
//! ```

pub mod frontend;
pub mod input;
pub mod registry;
pub mod tree;
pub mod trivia;

// Re-exports: tree model
pub use tree::{END_OF_FILE, SyntaxNode, SyntaxTree};

// Re-exports: trivia
pub use trivia::{
    CommentKind, CommentPlacement, CommentRange, leading_comment_ranges, trailing_comment_ranges,
};

// Re-exports: traits
pub use frontend::{FrontEnd, InputMode, ParseError};

// Re-exports: registry
pub use registry::{frontend_for_extension, frontend_for_language, frontends, register_frontend};

// Re-exports: built-in front-ends
#[cfg(feature = "read-typescript")]
pub use input::typescript::{TYPESCRIPT_FRONTEND, TypeScriptFrontEnd, parse_typescript};
