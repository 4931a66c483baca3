//! # Filter errors
//!
//! Only a handful of operations can fail:
//! - `between` with a range that is not exactly two values
//! - converting a structured JSON value (object, nested array) into a filter value
//! - rebuilding a builder from a query string that does not decode to UTF-8
//!
//! Everything else, including `is_in`/`not_in` with a scalar argument, is infallible.

use std::str::Utf8Error;

/// Errors reported by [`FilterBuilder`](crate::FilterBuilder) and its helpers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// `between` was given something other than a list of exactly two values
    #[error("range for `{key}` must be a list of exactly two values")]
    InvalidRange {
        /// Field the range was meant for
        key: String,
        /// Number of values received, `None` when a scalar was passed
        len: Option<usize>,
    },

    /// The value has no scalar text form
    #[error("unsupported filter value: {0}")]
    UnsupportedValue(String),

    /// A percent-decoded query component is not valid UTF-8
    #[error("query component is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),
}

impl FilterError {
    #[must_use]
    pub fn invalid_range(key: impl Into<String>, len: Option<usize>) -> Self {
        Self::InvalidRange {
            key: key.into(),
            len,
        }
    }

    #[must_use]
    pub fn unsupported_value(description: impl Into<String>) -> Self {
        Self::UnsupportedValue(description.into())
    }
}
