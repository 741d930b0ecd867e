//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors (e.g., [`EnrichmentError`], [`StoreError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! [`EnrichmentError`]: crate::enrichment::EnrichmentError
//! [`StoreError`]: crate::enrichment::StoreError
//!
//! # Example
//!
//! ```ignore
//! use lastfm_lens::error::{Error, Result};
//!
//! async fn profile(client: &LastFmClient) -> Result<u64> {
//!     let profile = client.user_info().await?; // Enrichment errors auto-convert
//!     Ok(profile.playcount)
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Upstream service or tool error
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] crate::enrichment::EnrichmentError),

    /// Cache persistence error
    #[error("Cache error: {0}")]
    Store(#[from] crate::enrichment::StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Currency conversion error
    #[error("Currency error: {0}")]
    Currency(#[from] crate::currency::CurrencyError),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Requested item is not there
    #[error("Not found: {0}")]
    NotFound(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Create an image error.
    pub fn image(message: impl Into<String>) -> Self {
        Self::Image(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::EnrichmentError;

    #[test]
    fn test_error_display() {
        let err = Error::file_not_found("/tmp/collage.png");
        assert!(err.to_string().contains("/tmp/collage.png"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::not_found("Boards of Canada - Roygbiv").context("while showing cache entry");
        let msg = err.to_string();
        assert!(msg.contains("while showing cache entry"));
        assert!(msg.contains("Roygbiv"));
    }

    #[test]
    fn test_enrichment_error_converts() {
        let err: Error = EnrichmentError::RateLimited.into();
        assert!(matches!(err, Error::Enrichment(EnrichmentError::RateLimited)));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ));
        let msg = result
            .with_context("writing collage")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("writing collage"));
        assert!(msg.contains("read-only file system"));
    }
}
