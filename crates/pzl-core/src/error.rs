//! # Error Types
//!
//! Errors raised when constructing domain primitives. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A value failed domain validation at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not `0x` followed by 40 hexadecimal digits.
    #[error("invalid address {0:?}: expected 0x followed by 40 hex digits")]
    InvalidAddress(String),

    /// A required frontmatter field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A frontmatter field has the wrong shape.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}
