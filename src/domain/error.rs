//! Error types for the Zalculator plugin.
//!
//! This module defines the centralized error type [`ZalcError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The calculator engine itself never raises: malformed accumulator values and
//! division by zero are repaired locally (reset to `0` at display time). These
//! variants cover the surrounding machinery only: storage, themes, configuration.

use thiserror::Error;

/// The main error type for Zalculator plugin operations.
///
/// Consolidates all error conditions that can occur outside the pure engine,
/// from storage reads and writes to theme and configuration parsing. I/O errors
/// convert automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use zalculator::ZalcError;
///
/// fn validate_config() -> Result<(), ZalcError> {
///     Err(ZalcError::Config("missing publish path".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum ZalcError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value store fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Zalculator operations.
///
/// This is a type alias for `std::result::Result<T, ZalcError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ZalcError>;
