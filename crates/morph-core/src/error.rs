//! Error types for `morph-core`.
//!
//! All fallible operations in the core library return [`ConvertResult<T>`],
//! which is an alias for `Result<T, ConvertError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message. Backend error text is passed through verbatim
/// inside [`ConvertError::ConversionFailed`].
///
/// A cancelled format selection is *not* an error — [`crate::choose_target`]
/// returns `Ok(None)` for that case.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The source path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The source path exists but is not a regular file.
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    /// The source extension has no conversion family, or the requested
    /// target is not routable within its family.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The conversion backend could not be instantiated (e.g. the office
    /// suite is not installed).
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend or codec reported an error during conversion.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),

    /// The target file already exists and overwriting is disabled.
    #[error("target already exists: {0}")]
    TargetExists(PathBuf),

    /// The source extension has no supported target formats, so there is
    /// nothing to offer the user.
    #[error("no supported target formats for {0}")]
    NoFormatsAvailable(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `morph-core`.
pub type ConvertResult<T> = Result<T, ConvertError>;
