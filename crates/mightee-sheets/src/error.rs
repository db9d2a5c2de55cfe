//! # Ledger Error Types
//!
//! Error types for remote spreadsheet operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Remote API failure (transport / auth / rate limit)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError (this module) ← adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosError (mightee-pos) ← what the rendering layer sees                 │
//! │                                                                         │
//! │  Only Unavailable and RateLimited are retryable, and only the           │
//! │  decrement path actually retries them.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Remote spreadsheet operation errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The remote service could not be reached or refused the call
    /// (transport failure, auth failure).
    #[error("Remote ledger unavailable: {message}")]
    Unavailable { message: String },

    /// The remote service throttled us.
    ///
    /// ## When This Occurs
    /// Bursts of cell writes during a multi-item commit routinely trip
    /// per-minute quotas on spreadsheet APIs.
    #[error("Remote ledger rate limited: {message}")]
    RateLimited { message: String },

    /// The named worksheet does not exist in the spreadsheet.
    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    /// Duplicating a sheet onto a name that is already taken.
    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    /// An edited stocks value that does not parse as a number.
    #[error("Not a number: '{value}'")]
    InvalidNumber { value: String },

    /// A cell reference that is not A1 notation.
    #[error("Invalid cell address: '{input}'")]
    InvalidAddress { input: String },

    /// A batch write whose grid does not match the target range.
    #[error("Grid shape mismatch: expected {expected} rows, got {got}")]
    GridShapeMismatch { expected: usize, got: usize },

    /// Configuration value out of bounds or missing.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read or written.
    #[error("Config I/O failed: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("Config parse failed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized back to TOML.
    #[error("Config serialize failed: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl LedgerError {
    /// Creates an Unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        LedgerError::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a RateLimited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        LedgerError::RateLimited {
            message: message.into(),
        }
    }

    /// Whether the decrement retry loop may try again after this error.
    ///
    /// Everything else surfaces immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::Unavailable { .. } | LedgerError::RateLimited { .. }
        )
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LedgerError::unavailable("timeout").is_retryable());
        assert!(LedgerError::rate_limited("quota").is_retryable());
        assert!(!LedgerError::SheetNotFound {
            name: "Inventory_2024-06-01".into()
        }
        .is_retryable());
        assert!(!LedgerError::InvalidNumber { value: "x".into() }.is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = LedgerError::GridShapeMismatch {
            expected: 8,
            got: 3,
        };
        assert_eq!(err.to_string(), "Grid shape mismatch: expected 8 rows, got 3");
    }
}
