//! Parser pool wiring the tree-sitter grammars behind the language registry.

use crate::syntax::languages::{self, LanguageId};
use std::collections::HashMap;
use tree_sitter::{Parser, Tree};

/// Syntax layer error.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("grammar initialization failed: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

/// Owns one parser per registered language. Parsing an unsupported
/// language yields `None` so callers can degrade to text-only behavior.
pub struct ParserPool {
    parsers: HashMap<LanguageId, Parser>,
}

impl ParserPool {
    /// Create a pool with a parser configured for every registered binding.
    pub fn new() -> Result<Self, SyntaxError> {
        languages::init();

        let mut parsers = HashMap::new();
        for binding in languages::all() {
            let mut parser = Parser::new();
            parser.set_language(binding.language())?;
            parsers.insert(binding.id, parser);
        }

        Ok(Self { parsers })
    }

    /// Parse a document. Returns `None` when the language has no binding
    /// or the parser yields no tree; never an error.
    pub fn parse(&mut self, text: &str, language_id: &str) -> Option<Tree> {
        let binding = languages::resolve(language_id)?;
        let parser = self.parsers.get_mut(&binding.id)?;
        parser.parse(text, None)
    }
}
