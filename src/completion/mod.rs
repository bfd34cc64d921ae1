//! Completion-assist core: site classification, cursor gating, context
//! windowing, and suggestion merging.

pub mod classifier;
pub mod gate;
pub mod merge;
pub mod reconcile;
pub mod window;

pub use classifier::{classify, classify_with, IncompleteKind, IncompleteSite};
pub use gate::{decide, GateDecision, GateReason};
pub use merge::merge;
pub use reconcile::{merge_with_provider, GenerationError, GenerationProvider};
pub use window::{window, ContextWindow, WindowMode};
