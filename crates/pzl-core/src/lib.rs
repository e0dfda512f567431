//! # pzl-core — Foundational Types for Puzzle Content Validation
//!
//! Defines the primitives every other `pzl-*` crate builds on. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes for addresses.** An [`Address`] can only be
//!    constructed from a string that is `0x` followed by exactly 40
//!    hexadecimal digits. Deserialization routes through the same check.
//!
//! 2. **Typed metadata record.** [`PuzzleMetadata`] is the frontmatter
//!    contract of a puzzle document: an author, a non-empty contributor list
//!    that includes the author, and an optional attribution.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pzl-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod error;
pub mod metadata;

pub use address::{is_address, Address, ADDRESS_HEX_LEN, ADDRESS_PREFIX};
pub use error::ValidationError;
pub use metadata::{MetadataField, PuzzleMetadata};
