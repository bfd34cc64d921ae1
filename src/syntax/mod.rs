//! Tree-sitter integration: language bindings and parser wiring.

pub mod languages;
pub mod parser;

pub use languages::{LanguageBinding, LanguageId};
pub use parser::{ParserPool, SyntaxError};
