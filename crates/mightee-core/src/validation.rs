//! # Validation Module
//!
//! Input validation and cell-value parsing rules, kept pure so both the
//! ledger layer and the handlers share the exact same reading of a cell.
//!
//! ## Usage
//! ```rust
//! use mightee_core::validation::{parse_tally, validate_quantity};
//!
//! validate_quantity(2).unwrap();
//!
//! // Missing and non-numeric cells count as zero
//! assert_eq!(parse_tally(None), 0);
//! assert_eq!(parse_tally(Some("7")), 7);
//! assert_eq!(parse_tally(Some("n/a")), 0);
//! ```

use crate::error::{CoreError, CoreResult};

/// Validates a line item quantity: must be ≥ 1.
pub fn validate_quantity(quantity: i64) -> CoreResult<()> {
    if quantity < 1 {
        return Err(CoreError::InvalidQuantity { quantity });
    }
    Ok(())
}

/// Reads an inventory tally cell.
///
/// A missing cell, an empty cell, or anything that is not a plain
/// non-negative integer counts as 0.
pub fn parse_tally(value: Option<&str>) -> i64 {
    match value {
        Some(s) => {
            let s = s.trim();
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                s.parse().unwrap_or(0)
            } else {
                0
            }
        }
        None => 0,
    }
}

/// Reads a stocks-ledger balance cell: any parseable number counts,
/// blank is None.
pub fn parse_balance(value: Option<&str>) -> Option<f64> {
    let s = value?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(50).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_parse_tally_defaults_to_zero() {
        assert_eq!(parse_tally(None), 0);
        assert_eq!(parse_tally(Some("")), 0);
        assert_eq!(parse_tally(Some("  ")), 0);
        assert_eq!(parse_tally(Some("abc")), 0);
        assert_eq!(parse_tally(Some("-4")), 0);
        assert_eq!(parse_tally(Some("3.5")), 0);
    }

    #[test]
    fn test_parse_tally_reads_digits() {
        assert_eq!(parse_tally(Some("0")), 0);
        assert_eq!(parse_tally(Some("7")), 7);
        assert_eq!(parse_tally(Some(" 42 ")), 42);
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance(None), None);
        assert_eq!(parse_balance(Some("")), None);
        assert_eq!(parse_balance(Some("12.5")), Some(12.5));
        assert_eq!(parse_balance(Some("8")), Some(8.0));
        assert_eq!(parse_balance(Some("x")), None);
    }
}
