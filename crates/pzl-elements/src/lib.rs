//! # pzl-elements — Element Extraction from Compiled MDX
//!
//! The MDX compiler turns rich-text markup into a stream of JSX runtime
//! calls. Every element a document renders appears in that stream as a call
//! to one of two helpers, `_jsx(` for an element with at most one child and
//! `_jsxs(` for an element with several, whose first argument names the
//! element. This crate recovers the set of elements a document instantiates
//! so it can be checked against an allow-list.
//!
//! ## Pipeline
//!
//! 1. [`grammar`] — the call-expression grammar. Finds every
//!    `_jsx(`/`_jsxs(` call whose first operand is `_components.<name>`,
//!    `"<tag>"` or a bare identifier.
//! 2. [`normalize`] — strips the call wrapper and operand decoration from a
//!    raw match, leaving the canonical element name.
//! 3. [`extract`] — applies both to a string and deduplicates, keeping
//!    first-occurrence order.
//! 4. [`allowlist`] — the read-only set of element names a document may use.
//!
//! ## Crate Policy
//!
//! - Matching is a pure function of its input. The compiled grammar is a
//!   process-wide immutable singleton and carries no scan position between
//!   calls.
//! - Operands are limited to `[a-zA-Z0-9_-]`. Anything else is not matched.

pub mod allowlist;
pub mod extract;
pub mod grammar;
pub mod normalize;

pub use allowlist::{AllowListError, ElementAllowList, DEFAULT_ELEMENTS};
pub use extract::{extract_element_counts, extract_elements, ElementCount};
pub use grammar::{CallExpressionGrammar, CallWrapper, OperandShape, RawMatch};
pub use normalize::{normalize, wrap};
