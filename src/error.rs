//! Error types for the CV builder.
//!
//! This module defines all error types that can occur during template
//! rendering and document export.

/// Result type alias for CV builder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during CV processing and export.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Export target missing from the document, or present but empty
    #[error("Export target not found: {0}")]
    NotFound(String),

    /// Asset readiness (fonts, images) exceeded the export deadline
    #[error("Render timed out after {waited_ms} ms waiting for assets")]
    RenderTimeout {
        /// Milliseconds spent waiting before giving up
        waited_ms: u64,
    },

    /// The rasterization engine failed to produce a bitmap
    #[error("Rasterization failed: {0}")]
    RenderFailure(String),

    /// Final document assembly or byte encoding failed
    #[error("Document encoding failed: {0}")]
    EncodingFailure(String),

    /// Template index outside the known variant set
    #[error("Unknown template variant: {0} (valid: 1, 2)")]
    UnknownTemplate(u8),

    /// Color value could not be parsed
    #[error("Invalid color value: '{0}'")]
    InvalidColor(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
