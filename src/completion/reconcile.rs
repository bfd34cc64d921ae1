//! Delegated suggestion reconciliation.
//!
//! An optional refinement over deterministic overlap stripping: pose the
//! (before, after, suggestion) triple to a second, smaller generation step
//! whose sole contract is "output exactly the text to insert at the
//! cursor". Any failure (error, timeout, empty output) falls back to the
//! deterministic merge; this path never blocks indefinitely and never
//! propagates a fault.

use crate::completion::merge::merge;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Generation capability consumed by the reconciliation step. Model
/// choice, authentication, and retries are the implementor's concern.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    RequestFailed(String),

    #[error("generation returned no usable output")]
    EmptyOutput,
}

/// Longest slice of adjacent context quoted back to the provider; keeps
/// the reconciliation prompt far smaller than the wide window that
/// produced the suggestion.
const CONTEXT_EXCERPT_BYTES: usize = 512;

/// Merge via a delegated generation call, bounded by `timeout`. Timeout
/// and error are treated identically to "no result": the deterministic
/// strategy's output is returned instead.
pub async fn merge_with_provider(
    provider: &dyn GenerationProvider,
    before: &str,
    after: &str,
    suggestion: &str,
    timeout: Duration,
) -> String {
    let prompt = reconciliation_prompt(before, after, suggestion);
    match tokio::time::timeout(timeout, provider.generate(&prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text,
        Ok(Ok(_)) => {
            warn!("reconciliation returned empty output, using deterministic merge");
            merge(before, after, suggestion)
        }
        Ok(Err(err)) => {
            warn!(error = %err, "reconciliation failed, using deterministic merge");
            merge(before, after, suggestion)
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "reconciliation timed out, using deterministic merge");
            merge(before, after, suggestion)
        }
    }
}

fn reconciliation_prompt(before: &str, after: &str, suggestion: &str) -> String {
    format!(
        "You are reconciling a code suggestion with the text already around the cursor.\n\
         Text before the cursor:\n{}\n\n\
         Text after the cursor:\n{}\n\n\
         Suggested completion:\n{}\n\n\
         Output exactly the text to insert at the cursor, nothing else. \
         Do not repeat text that is already present before or after the cursor.",
        tail(before, CONTEXT_EXCERPT_BYTES),
        head(after, CONTEXT_EXCERPT_BYTES),
        suggestion
    )
}

fn tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

fn head(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(&'static str);

    #[async_trait]
    impl GenerationProvider for FixedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl GenerationProvider for FailingProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::RequestFailed("boom".to_string()))
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl GenerationProvider for StalledProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn uses_provider_output_when_available() {
        let merged = merge_with_provider(
            &FixedProvider("bonacci = x"),
            "const fi",
            "",
            "const fibonacci = x",
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(merged, "bonacci = x");
    }

    #[tokio::test]
    async fn falls_back_on_error() {
        let merged = merge_with_provider(
            &FailingProvider,
            "const fi",
            "",
            "const fibonacci = x",
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(merged, "bonacci = x");
    }

    #[tokio::test]
    async fn falls_back_on_empty_output() {
        let merged = merge_with_provider(
            &FixedProvider("   "),
            "const fi",
            "",
            "const fibonacci = x",
            Duration::from_millis(100),
        )
        .await;
        assert_eq!(merged, "bonacci = x");
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_on_timeout() {
        let merged = merge_with_provider(
            &StalledProvider,
            "const fi",
            "",
            "const fibonacci = x",
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(merged, "bonacci = x");
    }

    #[test]
    fn excerpts_respect_char_boundaries() {
        let text = "é".repeat(600);
        assert!(tail(&text, 511).len() <= 511);
        assert!(head(&text, 511).len() <= 511);
    }
}
