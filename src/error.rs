// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy for calendar arithmetic.
//!
//! Every fallible operation in the crate returns [`TimeResult<T>`]. None of
//! the variants describe transient conditions: they signal programming or
//! input errors and are never retried internally.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`Overflow`](TimeError::Overflow) | an arithmetic step leaves the 64-bit range |
//! | [`FieldOutOfRange`](TimeError::FieldOutOfRange) | a field value is outside its bounds |
//! | [`InvalidInterval`](TimeError::InvalidInterval) | an interval would end before it starts |
//! | [`UnsupportedOperation`](TimeError::UnsupportedOperation) | a unit or field is not modelled |
//! | [`InvalidText`](TimeError::InvalidText) | a textual value is not recognised |

use thiserror::Error;

/// Unified error type for instants, fields, intervals and periods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The true result of an arithmetic step does not fit in 64 bits
    /// (or in 32 bits for field values).
    #[error("arithmetic overflow in {operation}")]
    Overflow { operation: String },

    /// A field value lies outside `[lower, upper]`.
    #[error("value {value} for {field} must be in the range [{lower},{upper}]")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        lower: i64,
        upper: i64,
    },

    /// An interval would have `end < start`.
    #[error("the end instant {end} must be greater or equal to the start {start}")]
    InvalidInterval { start: i64, end: i64 },

    /// The field or unit is not supported by the chronology.
    #[error("{field} field is unsupported: {operation}")]
    UnsupportedOperation {
        field: &'static str,
        operation: &'static str,
    },

    /// A textual value did not match anything the field recognises.
    #[error("invalid {field} text: {text:?}")]
    InvalidText { field: &'static str, text: String },
}

/// Convenience alias for `Result<T, TimeError>`.
pub type TimeResult<T> = Result<T, TimeError>;

impl TimeError {
    /// Creates an [`Overflow`](Self::Overflow) error.
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Creates a [`FieldOutOfRange`](Self::FieldOutOfRange) error.
    pub fn out_of_range(field: &'static str, value: i64, lower: i64, upper: i64) -> Self {
        Self::FieldOutOfRange {
            field,
            value,
            lower,
            upper,
        }
    }

    /// Creates an [`InvalidInterval`](Self::InvalidInterval) error.
    pub fn invalid_interval(start: i64, end: i64) -> Self {
        Self::InvalidInterval { start, end }
    }

    /// Creates an [`UnsupportedOperation`](Self::UnsupportedOperation) error.
    pub fn unsupported(field: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation { field, operation }
    }

    /// Creates an [`InvalidText`](Self::InvalidText) error.
    pub fn invalid_text(field: &'static str, text: impl Into<String>) -> Self {
        Self::InvalidText {
            field,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = TimeError::out_of_range("monthOfYear", 13, 1, 12);
        assert_eq!(
            err.to_string(),
            "value 13 for monthOfYear must be in the range [1,12]"
        );

        let err = TimeError::invalid_interval(10, 5);
        assert!(err.to_string().contains("greater or equal"));

        let err = TimeError::unsupported("eras", "add");
        assert_eq!(err.to_string(), "eras field is unsupported: add");
    }

    #[test]
    fn invalid_text_quotes_the_input() {
        let err = TimeError::invalid_text("era", "AD");
        assert_eq!(err.to_string(), "invalid era text: \"AD\"");
    }
}
