//! # POS Error Type
//!
//! Unified error type for handler results.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mightee POS                            │
//! │                                                                         │
//! │  Handler returns Result<T, PosError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CoreError?   ── InsufficientPayment, IndexOutOfRange, ... ──┐          │
//! │         │                                                    ▼          │
//! │  LedgerError? ── Unavailable, SheetNotFound, ... ────────► PosError     │
//! │                                                              │          │
//! │                                                              ▼          │
//! │  Rendering layer shows { code, message } to the operator                │
//! │                                                                         │
//! │  No handler retries (the ledger's decrement path already did its        │
//! │  own bounded retrying). Every error abandons the operation.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use mightee_core::CoreError;
use mightee_sheets::LedgerError;

/// Error returned from handlers.
///
/// ## Serialization
/// This is what the rendering layer receives when a handler fails:
/// ```json
/// {
///   "code": "INSUFFICIENT_PAYMENT",
///   "message": "Insufficient payment: received ₱300.00, need ₱380.00"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for handler responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Quantity below one
    InvalidQuantity,

    /// Cash received does not cover the total
    InsufficientPayment,

    /// Catalog miss or missing sheet
    NotFound,

    /// Stale cart removal index
    IndexOutOfRange,

    /// Submit pressed on an empty order
    EmptyOrder,

    /// Checkout operation in the wrong state
    CheckoutState,

    /// Remote spreadsheet unreachable / throttled
    RemoteUnavailable,

    /// Input failed validation (non-numeric stock edit, bad shape)
    ValidationError,

    /// Anything else
    Internal,
}

impl PosError {
    /// Creates a new POS error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        PosError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        PosError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to POS errors.
impl From<CoreError> for PosError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::InsufficientPayment { .. } => ErrorCode::InsufficientPayment,
            CoreError::SelectionNotFound(_) => ErrorCode::NotFound,
            CoreError::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            CoreError::EmptyOrder => ErrorCode::EmptyOrder,
            CoreError::InvalidCheckoutState { .. } => ErrorCode::CheckoutState,
        };
        PosError::new(code, err.to_string())
    }
}

/// Converts ledger errors to POS errors.
impl From<LedgerError> for PosError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::Unavailable { .. } | LedgerError::RateLimited { .. } => {
                ErrorCode::RemoteUnavailable
            }
            LedgerError::SheetNotFound { .. } => ErrorCode::NotFound,
            LedgerError::SheetAlreadyExists { .. } => ErrorCode::Internal,
            LedgerError::InvalidNumber { .. }
            | LedgerError::InvalidAddress { .. }
            | LedgerError::GridShapeMismatch { .. } => ErrorCode::ValidationError,
            LedgerError::InvalidConfig(_)
            | LedgerError::ConfigIo(_)
            | LedgerError::ConfigParse(_)
            | LedgerError::ConfigSerialize(_) => ErrorCode::Internal,
        };
        PosError::new(code, err.to_string())
    }
}

impl std::fmt::Display for PosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for PosError {}

#[cfg(test)]
mod tests {
    use super::*;
    use mightee_core::Money;

    #[test]
    fn test_core_error_mapping() {
        let err: PosError = CoreError::InsufficientPayment {
            required: Money::from_pesos(380),
            received: Money::from_pesos(300),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientPayment);
        assert!(err.message.contains("₱380.00"));
    }

    #[test]
    fn test_ledger_error_mapping() {
        let err: PosError = LedgerError::rate_limited("quota").into();
        assert_eq!(err.code, ErrorCode::RemoteUnavailable);

        let err: PosError = LedgerError::SheetNotFound {
            name: "Inventory_2024-06-01".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serialized_shape() {
        let err = PosError::new(ErrorCode::EmptyOrder, "Order is empty");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "EMPTY_ORDER");
        assert_eq!(json["message"], "Order is empty");
    }
}
