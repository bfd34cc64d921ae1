//! Completion configuration: window spans, marker tokens, and the
//! reconciliation timeout, loadable from TOML.

use crate::completion::window::WindowMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_NARROW_BEFORE: usize = 10;
pub const DEFAULT_NARROW_AFTER: usize = 10;
pub const DEFAULT_WIDE_RADIUS: usize = 250;
pub const DEFAULT_MARKER_PREFIX: &str = "<|cursor_line|>";
pub const DEFAULT_MARKER_SUFFIX: &str = "<|/cursor_line|>";
pub const DEFAULT_RECONCILE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid completion config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable parameters for the completion core. Call sites that need a
/// shorter trailing span (batch scans often keep only a few lines after
/// the site) can override `narrow_after` without touching the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompletionConfig {
    /// Lines kept before the anchor in the narrow regime.
    pub narrow_before: usize,
    /// Lines kept after the anchor in the narrow regime.
    pub narrow_after: usize,
    /// Lines kept on each side of the anchor in the wide regime.
    pub wide_radius: usize,
    /// Token prepended to the target line in the wide regime.
    pub marker_prefix: String,
    /// Token appended to the target line in the wide regime.
    pub marker_suffix: String,
    /// Upper bound on a delegated reconciliation call.
    pub reconcile_timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            narrow_before: DEFAULT_NARROW_BEFORE,
            narrow_after: DEFAULT_NARROW_AFTER,
            wide_radius: DEFAULT_WIDE_RADIUS,
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            marker_suffix: DEFAULT_MARKER_SUFFIX.to_string(),
            reconcile_timeout_ms: DEFAULT_RECONCILE_TIMEOUT_MS,
        }
    }
}

impl CompletionConfig {
    /// Load from TOML text; absent fields keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn narrow_mode(&self) -> WindowMode {
        WindowMode::Narrow {
            before: self.narrow_before,
            after: self.narrow_after,
        }
    }

    pub fn wide_mode(&self) -> WindowMode {
        WindowMode::WideMarked {
            radius: self.wide_radius,
            marker_prefix: self.marker_prefix.clone(),
            marker_suffix: self.marker_suffix.clone(),
        }
    }

    pub fn reconcile_timeout(&self) -> Duration {
        Duration::from_millis(self.reconcile_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = CompletionConfig::default();
        assert_eq!(config.narrow_before, 10);
        assert_eq!(config.narrow_after, 10);
        assert_eq!(config.wide_radius, 250);
        assert_eq!(config.reconcile_timeout_ms, 2_000);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config =
            CompletionConfig::from_toml_str("narrow_after = 3\nwide_radius = 100").expect("config");
        assert_eq!(config.narrow_after, 3);
        assert_eq!(config.wide_radius, 100);
        assert_eq!(config.narrow_before, 10);
        assert_eq!(config.marker_prefix, DEFAULT_MARKER_PREFIX);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(CompletionConfig::from_toml_str("narrow_after = \"lots\"").is_err());
    }
}
