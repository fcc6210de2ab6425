//! Error types for configuration and rendering failures.

use thiserror::Error;

/// A typing region that cannot be built as configured.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Typing rate was below the minimum or not a finite number.
    #[error("typing rate must be a finite number of at least 0.01 words per minute, got {0}")]
    InvalidRate(f64),
    /// Region has a zero dimension.
    #[error("typing region must have non-zero size, got {width}x{height}")]
    EmptyRegion {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// Line height was zero, either configured or measured.
    #[error("line height must be at least one row")]
    ZeroLineHeight,
}

/// The render backend could not measure or draw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The backend has no way to draw this character.
    #[error("cannot render character {0:?}")]
    Unrenderable(char),
    /// Any other backend failure.
    #[error("render backend failed: {0}")]
    Backend(String),
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Render backend failure.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
