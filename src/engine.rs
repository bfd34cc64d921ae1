//! Convenience facade wiring the parser pool to the classification, gating,
//! windowing, and merging entry points.

use crate::completion::classifier::{classify_with, IncompleteSite};
use crate::completion::gate::{decide, GateDecision};
use crate::completion::merge::merge;
use crate::completion::reconcile::{merge_with_provider, GenerationProvider};
use crate::completion::window::{window, ContextWindow};
use crate::config::CompletionConfig;
use crate::syntax::parser::ParserPool;
use anyhow::Result;
use tree_sitter::Point;

/// Owns per-language parsers plus a configuration, and exposes the
/// document-level operations a transport layer calls into. All state is
/// the parsers themselves; every operation is a pure function of the
/// document snapshot it is handed.
pub struct SuggestionEngine {
    parsers: ParserPool,
    config: CompletionConfig,
}

impl SuggestionEngine {
    pub fn new() -> Result<Self> {
        Self::with_config(CompletionConfig::default())
    }

    pub fn with_config(config: CompletionConfig) -> Result<Self> {
        Ok(Self {
            parsers: ParserPool::new()?,
            config,
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Batch mode: parse and classify the whole document. Unsupported
    /// languages degrade to the lexical scan instead of failing.
    pub fn scan_document(&mut self, text: &str, language_id: &str) -> Vec<IncompleteSite> {
        let tree = self.parsers.parse(text, language_id);
        classify_with(
            tree.as_ref(),
            text,
            language_id,
            self.config.narrow_before,
            self.config.narrow_after,
        )
    }

    /// Interactive mode: parse and gate a single cursor position.
    pub fn gate_at(&mut self, text: &str, language_id: &str, position: Point) -> GateDecision {
        let tree = self.parsers.parse(text, language_id);
        decide(tree.as_ref(), text, position, language_id)
    }

    /// Wide marked window around the cursor line, for the generation call
    /// that follows an eligible gate decision.
    pub fn wide_window(&self, text: &str, anchor: usize) -> ContextWindow {
        window(text, anchor, &self.config.wide_mode())
    }

    /// Narrow unmarked window around a site line.
    pub fn narrow_window(&self, text: &str, anchor: usize) -> ContextWindow {
        window(text, anchor, &self.config.narrow_mode())
    }

    /// Deterministic overlap-stripping merge.
    pub fn merge(&self, before: &str, after: &str, suggestion: &str) -> String {
        merge(before, after, suggestion)
    }

    /// Delegated reconciliation bounded by the configured timeout, falling
    /// back to the deterministic merge on any failure.
    pub async fn merge_with(
        &self,
        provider: &dyn GenerationProvider,
        before: &str,
        after: &str,
        suggestion: &str,
    ) -> String {
        merge_with_provider(
            provider,
            before,
            after,
            suggestion,
            self.config.reconcile_timeout(),
        )
        .await
    }
}
