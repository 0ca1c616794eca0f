//! Error types for engine contract violations.

use thiserror::Error;

/// Errors returned when a caller violates the polygon-drag contract.
///
/// Degenerate inputs elsewhere (unloaded image, zero-sized container,
/// out-of-range zoom requests) are handled by silent no-op guards, not
/// errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A polygon drag was started while another one is active
    #[error("a polygon drag is already in progress")]
    PolygonDragActive,

    /// A polygon drag was started with the feature disabled in the config
    #[error("polygon dragging is disabled")]
    PolygonDragDisabled,

    /// An operation requiring a laid-out image ran before an image loaded
    #[error("no image is loaded")]
    ImageNotLoaded,
}
