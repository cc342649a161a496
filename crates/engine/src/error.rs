// ABOUTME: Error types for the engine's boundary contracts.
// ABOUTME: The passes themselves are total; only template construction can fail.

use thiserror::Error;

/// Errors from the engine's entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The marker template fragment parsed to no element at all.
    #[error("marker template contains no element: {0:?}")]
    EmptyMarkerTemplate(String),
}
