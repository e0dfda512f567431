//! # Puzzle Documents
//!
//! A document is created once its raw text has been read and compiled, and
//! is immutable afterwards.

use serde_json::Value;

use crate::compiler::CompiledDocument;

/// One puzzle document ready for validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    raw: String,
    compiled_source: String,
    frontmatter: Option<Value>,
}

impl Document {
    /// Assemble a document from its raw text and the compiler's output.
    pub fn new(id: impl Into<String>, raw: impl Into<String>, compiled: CompiledDocument) -> Self {
        Self {
            id: id.into(),
            raw: raw.into(),
            compiled_source: compiled.compiled_source,
            frontmatter: compiled.frontmatter,
        }
    }

    /// Identifier used in reports, normally the path relative to the
    /// content root.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Uncompiled document text, frontmatter included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Compiled call-expression output.
    pub fn compiled_source(&self) -> &str {
        &self.compiled_source
    }

    /// Parsed frontmatter record, if any.
    pub fn frontmatter(&self) -> Option<&Value> {
        self.frontmatter.as_ref()
    }
}
