//! Ghostwriter core library
//!
//! The algorithmic core of an AI code-completion assistant. It decides
//! where generation is worth invoking and what bounded context to hand
//! the model, then merges the model's free-form output with the text
//! already around the cursor so insertion never duplicates code.
//!
//! ## Components
//!
//! - **Language bindings**: per-language grammar handles and node-type
//!   sets, resolved by editor language identifier
//! - **Classifier**: one tree walk enumerating every incomplete site in a
//!   document (empty bodies, dangling control flow, inline prompts, TODOs)
//! - **Gate**: a cheap point query deciding whether a cursor position is
//!   worth a generation call at all
//! - **Windower**: bounded excerpts around a line, narrow for batch scans
//!   and wide-with-markers for interactive queries
//! - **Merge**: overlap stripping between a suggestion and the adjacent
//!   text, with an optional delegated reconciliation step
//!
//! Transport, editor UI, and provider selection live outside this crate;
//! it consumes a parsed tree and a generation capability and nothing else.

pub mod completion;
pub mod config;
pub mod engine;
pub mod syntax;

pub use completion::classifier::{classify, classify_with, IncompleteKind, IncompleteSite};
pub use completion::gate::{decide, GateDecision, GateReason};
pub use completion::merge::merge;
pub use completion::reconcile::{merge_with_provider, GenerationError, GenerationProvider};
pub use completion::window::{window, ContextWindow, WindowMode};
pub use config::CompletionConfig;
pub use engine::SuggestionEngine;
pub use syntax::languages::{LanguageBinding, LanguageId};
pub use syntax::parser::{ParserPool, SyntaxError};
