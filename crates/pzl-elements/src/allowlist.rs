//! # Element Allow-List
//!
//! The set of canonical element names a puzzle document may instantiate.
//! Built once per process, then shared read-only (typically behind an
//! `Arc`) by every validator.
//!
//! ## Sources
//!
//! - [`ElementAllowList::default`] — [`DEFAULT_ELEMENTS`]: the MDX runtime
//!   wrappers plus the intrinsic tags the MDX pipeline emits for
//!   GitHub-flavored markdown, KaTeX math and annotated code blocks.
//! - [`ElementAllowList::load`] — a file. `.json` is a JSON array of
//!   strings, `.yaml`/`.yml` a YAML sequence (or a mapping with an
//!   `elements` sequence), anything else one name per line with `#`
//!   comments.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Elements permitted when no allow-list file is configured.
pub const DEFAULT_ELEMENTS: &[&str] = &[
    // MDX runtime scaffolding around every compiled document
    "MDXLayout",
    "_Fragment",
    "_createMdxContent",
    // Markdown
    "a",
    "blockquote",
    "br",
    "code",
    "del",
    "em",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "img",
    "input",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "strong",
    "sup",
    "table",
    "tbody",
    "td",
    "th",
    "thead",
    "tr",
    "ul",
    // Raw HTML commonly used in puzzle bodies
    "div",
    "span",
    // KaTeX MathML output
    "annotation",
    "math",
    "menclose",
    "mfrac",
    "mi",
    "mn",
    "mo",
    "mover",
    "mpadded",
    "mroot",
    "mrow",
    "mspace",
    "msqrt",
    "mstyle",
    "msub",
    "msubsup",
    "msup",
    "mtable",
    "mtd",
    "mtext",
    "mtr",
    "munder",
    "munderover",
    "semantics",
    "svg",
    "path",
    "line",
];

/// Error loading an allow-list. Fatal for the whole run.
#[derive(Error, Debug)]
pub enum AllowListError {
    /// The file could not be read.
    #[error("cannot read allow-list '{path}': {source}")]
    Io {
        /// Path of the allow-list file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed.
    #[error("invalid allow-list '{path}': {reason}")]
    Parse {
        /// Path of the allow-list file.
        path: PathBuf,
        /// Parser error message.
        reason: String,
    },

    /// The file parsed but named no elements.
    #[error("allow-list '{path}' contains no elements")]
    Empty {
        /// Path of the allow-list file.
        path: PathBuf,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AllowListFile {
    List(Vec<String>),
    Mapping { elements: Vec<String> },
}

impl AllowListFile {
    fn into_names(self) -> Vec<String> {
        match self {
            Self::List(names) | Self::Mapping { elements: names } => names,
        }
    }
}

/// Read-only set of permitted canonical element names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAllowList {
    names: BTreeSet<String>,
}

impl Default for ElementAllowList {
    fn default() -> Self {
        Self::from_names(DEFAULT_ELEMENTS.iter().copied())
    }
}

impl ElementAllowList {
    /// Build an allow-list from names. Surrounding whitespace is trimmed and
    /// blank entries are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// Load an allow-list file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`AllowListError::Io`] if the file cannot be read,
    /// [`AllowListError::Parse`] if it is not valid for its format, and
    /// [`AllowListError::Empty`] if it names no elements.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AllowListError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AllowListError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parse_err = |reason: String| AllowListError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let names = match ext {
            "json" => serde_json::from_str::<AllowListFile>(&content)
                .map_err(|e| parse_err(format!("invalid JSON: {e}")))?
                .into_names(),
            "yaml" | "yml" => serde_yaml::from_str::<AllowListFile>(&content)
                .map_err(|e| parse_err(format!("invalid YAML: {e}")))?
                .into_names(),
            _ => content
                .lines()
                .map(|line| line.split('#').next().unwrap_or("").trim().to_string())
                .collect(),
        };

        let list = Self::from_names(names);
        if list.is_empty() {
            return Err(AllowListError::Empty {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), elements = list.len(), "loaded element allow-list");
        Ok(list)
    }

    /// Whether `name` is permitted. Exact string comparison.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The names from `elements` that are not permitted, in input order.
    pub fn disallowed<'a, S: AsRef<str>>(&self, elements: &'a [S]) -> Vec<&'a str> {
        elements
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Number of permitted names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names are permitted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Permitted names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
