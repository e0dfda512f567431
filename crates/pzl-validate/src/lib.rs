//! # pzl-validate — Puzzle Document Validation
//!
//! Validates puzzle documents against two contracts:
//!
//! - **Metadata.** The frontmatter names an `author` address and a
//!   non-empty `contributors` list of addresses that includes the author.
//! - **Content.** The compiled document instantiates only allow-listed
//!   elements, and the raw source contains no hand-written compiled JSX
//!   call syntax.
//!
//! ## Modules
//!
//! - [`compiler`] — the external MDX compiler boundary.
//! - [`document`] — an immutable read-and-compiled document.
//! - [`validator`] — runs every check against one document.
//! - [`report`] — per-check outcomes and the corpus summary.
//! - [`corpus`] — discovery and concurrent validation of a content root.
//! - [`config`] — `pzl.yaml` settings.
//!
//! ## Crate Policy
//!
//! - Check failures are accumulated, never raised. Only I/O and
//!   compilation problems are errors.
//! - No check short-circuits another.

pub mod compiler;
pub mod config;
pub mod corpus;
pub mod document;
pub mod report;
pub mod validator;

pub use compiler::{parse_compiler_output, CompileError, CompiledDocument, Compiler, ProcessCompiler};
pub use config::{CompilerConfig, ConfigError, PzlConfig, DEFAULT_CONFIG_FILE};
pub use corpus::{discover_documents, document_id, process_document, CorpusError, CorpusWalker, DocumentError};
pub use document::Document;
pub use report::{CheckName, CheckOutcome, CorpusReport, DocumentFailure, DocumentReport};
pub use validator::DocumentValidator;
