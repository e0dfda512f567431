//! # Corpus Walker
//!
//! Discovers every document under a content root, then reads, compiles and
//! validates each one independently. Documents share nothing but the
//! read-only allow-list, so they are processed concurrently on tokio's
//! blocking pool, bounded by a semaphore.
//!
//! ## Error Taxonomy
//!
//! - A missing or unreadable content root aborts the run ([`CorpusError`]).
//! - A document that cannot be read or compiled is recorded as a
//!   [`DocumentFailure`] and the rest of the corpus is still processed.
//! - Check failures are data in the [`DocumentReport`], never errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::compiler::{CompileError, Compiler};
use crate::document::Document;
use crate::report::{CorpusReport, DocumentFailure, DocumentReport};
use crate::validator::DocumentValidator;

/// Directories never descended into during discovery.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// A failure that aborts the whole corpus run.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The content root does not exist or is not a directory.
    #[error("content root '{0}' does not exist or is not a directory")]
    MissingRoot(PathBuf),

    /// A directory under the root could not be listed.
    #[error("cannot list '{path}': {source}")]
    Discovery {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A worker task panicked or was cancelled.
    #[error("document task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The concurrency semaphore was closed.
    #[error("document scheduling failed: {0}")]
    Scheduling(#[from] tokio::sync::AcquireError),
}

/// A failure that skips one document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be read as UTF-8 text.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Document path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The compiler rejected the document.
    #[error("cannot compile '{path}': {source}")]
    Compile {
        /// Document path.
        path: PathBuf,
        /// Compiler error.
        #[source]
        source: CompileError,
    },
}

/// Recursively find documents under `root` whose extension is one of
/// `extensions`. Hidden directories and `node_modules` are skipped, and
/// symbolic links are not followed. The result is sorted.
///
/// # Errors
///
/// Returns [`CorpusError::MissingRoot`] if `root` is not a directory and
/// [`CorpusError::Discovery`] if a directory cannot be listed.
pub fn discover_documents(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::MissingRoot(root.to_path_buf()));
    }
    let mut documents = Vec::new();
    collect_documents(root, extensions, &mut documents)?;
    documents.sort();
    Ok(documents)
}

fn collect_documents(
    dir: &Path,
    extensions: &[String],
    out: &mut Vec<PathBuf>,
) -> Result<(), CorpusError> {
    let discovery_err = |source| CorpusError::Discovery {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        // Symlinks are neither dirs nor files here, so they are skipped.
        let file_type = entry.file_type().map_err(discovery_err)?;
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_type.is_dir() {
            if name.starts_with('.') || SKIPPED_DIRS.contains(&name) {
                continue;
            }
            collect_documents(&path, extensions, out)?;
        } else if file_type.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|x| x == ext))
        {
            out.push(path);
        }
    }
    Ok(())
}

/// Report identifier for `path`: relative to `root`, `/`-separated.
pub fn document_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read, compile and validate one document.
///
/// # Errors
///
/// Returns [`DocumentError`] if the document cannot be read or compiled.
pub fn process_document(
    root: &Path,
    path: &Path,
    compiler: &dyn Compiler,
    validator: &DocumentValidator,
) -> Result<DocumentReport, DocumentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let compiled = compiler.compile(&raw).map_err(|source| DocumentError::Compile {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = Document::new(document_id(root, path), raw, compiled);
    Ok(validator.validate(&doc))
}

/// Validates every document under a content root.
#[derive(Clone)]
pub struct CorpusWalker {
    root: PathBuf,
    extensions: Vec<String>,
    concurrency: usize,
    compiler: Arc<dyn Compiler>,
    validator: DocumentValidator,
}

impl std::fmt::Debug for CorpusWalker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusWalker")
            .field("root", &self.root)
            .field("extensions", &self.extensions)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl CorpusWalker {
    /// Create a walker over `root` for `.mdx` documents.
    pub fn new(
        root: impl Into<PathBuf>,
        compiler: Arc<dyn Compiler>,
        validator: DocumentValidator,
    ) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["mdx".to_string()],
            concurrency: 8,
            compiler,
            validator,
        }
    }

    /// Treat files with these extensions as documents.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Process at most `limit` documents at once. Zero is treated as one.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Documents this walker would process.
    ///
    /// # Errors
    ///
    /// See [`discover_documents`].
    pub fn discover(&self) -> Result<Vec<PathBuf>, CorpusError> {
        discover_documents(&self.root, &self.extensions)
    }

    /// Validate a single document outside a corpus run.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] if the document cannot be read or compiled.
    pub fn validate_path(&self, path: &Path) -> Result<DocumentReport, DocumentError> {
        process_document(&self.root, path, self.compiler.as_ref(), &self.validator)
    }

    /// Validate the whole corpus.
    ///
    /// Waits for every document before returning. Per-document read and
    /// compile failures are collected into the report.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError`] if discovery fails or a worker task dies.
    pub async fn run(&self) -> Result<CorpusReport, CorpusError> {
        let paths = self.discover()?;
        tracing::info!(
            root = %self.root.display(),
            documents = paths.len(),
            concurrency = self.concurrency,
            "validating corpus"
        );

        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        for path in paths {
            let permit = permits.clone().acquire_owned().await?;
            let root = self.root.clone();
            let compiler = Arc::clone(&self.compiler);
            let validator = self.validator.clone();
            tasks.spawn_blocking(move || {
                let _permit = permit;
                let id = document_id(&root, &path);
                (id, process_document(&root, &path, compiler.as_ref(), &validator))
            });
        }

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined? {
                (_, Ok(report)) => documents.push(report),
                (document, Err(e)) => {
                    tracing::warn!(document = %document, "{e}");
                    failures.push(DocumentFailure {
                        document,
                        error: e.to_string(),
                    });
                }
            }
        }

        let report = CorpusReport::new(self.root.display().to_string(), documents, failures);
        tracing::info!(
            total = report.total(),
            passed = report.passed_count(),
            errored = report.failures.len(),
            "corpus validation finished"
        );
        Ok(report)
    }
}
