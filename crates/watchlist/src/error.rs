//! Error types for the watchlist crate.
//!
//! The store itself never fails: duplicate adds and removals of unknown ids
//! are no-ops. Errors only come from building a `Movie` out of untyped input.

use thiserror::Error;

/// Errors that can occur while constructing watchlist entries
///
/// Rust concept: `#[derive(Error)]` from thiserror implements
/// `std::error::Error` and `Display` from the `#[error(...)]` attributes
#[derive(Error, Debug)]
pub enum WatchlistError {
    /// A movie record violated a precondition (e.g. missing or null `id`)
    #[error("Invalid argument for {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// Input could not be parsed as JSON
    ///
    /// `#[from]` lets `?` convert a `serde_json::Error` automatically
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WatchlistError {
    /// Shorthand for `InvalidArgument` with owned strings
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        WatchlistError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
///
/// Instead of writing `Result<T, WatchlistError>` everywhere,
/// we can write `Result<T>`
pub type Result<T> = std::result::Result<T, WatchlistError>;
