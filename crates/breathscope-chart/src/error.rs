//! Error types for chart construction and configuration.

use thiserror::Error;

/// Errors raised while building a chart or loading its configuration.
///
/// All of these are fatal for construction: no chart is created.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The container selector did not resolve to a mounted container.
    #[error("chart container not found: {selector}")]
    SurfaceNotFound { selector: String },

    /// An option is outside its accepted range.
    #[error("invalid chart option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("cannot parse chart configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read chart configuration: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Result type alias for chart construction.
pub type ChartResult<T> = Result<T, ConfigurationError>;
