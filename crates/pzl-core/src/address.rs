//! # Contributor Addresses
//!
//! Puzzle authors and contributors are identified by blockchain account
//! addresses. Only the surface syntax is checked here: the literal prefix
//! `0x` followed by exactly 40 hexadecimal digits, in any letter case.
//! Checksums and on-chain existence are not verified.
//!
//! Equality is exact string equality. `0xAB..` and `0xab..` are distinct
//! addresses as far as contributor inclusion is concerned.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Literal prefix every address starts with.
pub const ADDRESS_PREFIX: &str = "0x";

/// Number of hexadecimal digits after the prefix.
pub const ADDRESS_HEX_LEN: usize = 40;

/// Returns `true` if `s` is `0x` followed by exactly 40 hex digits.
///
/// Equivalent to the pattern `^0x[0-9a-fA-F]{40}$`.
pub fn is_address(s: &str) -> bool {
    match s.strip_prefix(ADDRESS_PREFIX) {
        Some(hex) => hex.len() == ADDRESS_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Routes deserialization through the validating constructor so malformed
/// values are rejected at parse time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A syntactically valid account address (`0x` + 40 hex digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Address(String);

impl_validating_deserialize!(Address);

impl Address {
    /// Create an address, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] if the string does not
    /// match `0x` followed by 40 hexadecimal digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !is_address(&s) {
            return Err(ValidationError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Access the address string, prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
