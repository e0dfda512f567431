//! # MDX Compiler Boundary
//!
//! Compilation of markup into the JSX call-expression stream is done by an
//! external tool. The validator only sees it through [`Compiler`], whose
//! output mirrors the shape `next-mdx-remote`'s `serialize` returns:
//!
//! ```json
//! { "frontmatter": { "author": "0x…", "contributors": ["0x…"] },
//!   "compiledSource": "…_jsx(_components.p, …)…" }
//! ```
//!
//! [`ProcessCompiler`] runs a configured command, writes the raw document
//! to its stdin and parses that JSON from its stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Output of compiling one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledDocument {
    /// Parsed frontmatter, if the document had any.
    #[serde(default)]
    pub frontmatter: Option<Value>,
    /// Generated call-expression text.
    #[serde(rename = "compiledSource")]
    pub compiled_source: String,
}

/// Compilation failed. Fatal for the document, not for the corpus.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The compiler process could not be started.
    #[error("cannot start compiler '{program}': {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// IO failure talking to the compiler process.
    #[error("compiler io error: {0}")]
    Io(#[from] std::io::Error),

    /// The compiler exited unsuccessfully.
    #[error("compiler exited with {status}: {stderr}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The compiler's output was not the expected JSON shape.
    #[error("malformed compiler output: {0}")]
    InvalidOutput(String),
}

/// Turns raw document text into frontmatter plus compiled output.
pub trait Compiler: Send + Sync {
    /// Compile one document.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the document cannot be compiled.
    fn compile(&self, raw: &str) -> Result<CompiledDocument, CompileError>;
}

/// Compiler backed by an external command speaking JSON on stdout.
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessCompiler {
    /// Create a compiler that runs `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    /// Run the command from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The program this compiler invokes.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Compiler for ProcessCompiler {
    fn compile(&self, raw: &str) -> Result<CompiledDocument, CompileError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|source| CompileError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        // Feed stdin from a separate thread so a compiler that streams
        // output before draining its input cannot deadlock us.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(raw.as_bytes())?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;

        if !output.status.success() {
            return Err(CompileError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // A broken pipe only matters if the compiler also claimed success.
        written?;

        parse_compiler_output(&output.stdout)
    }
}

/// Parse the JSON a compiler command writes to stdout.
///
/// # Errors
///
/// Returns [`CompileError::InvalidOutput`] if the bytes are not UTF-8 JSON
/// with a `compiledSource` string, or if `frontmatter` is present but not an
/// object.
pub fn parse_compiler_output(stdout: &[u8]) -> Result<CompiledDocument, CompileError> {
    let text = std::str::from_utf8(stdout)
        .map_err(|e| CompileError::InvalidOutput(format!("not UTF-8: {e}")))?;
    let compiled: CompiledDocument = serde_json::from_str(text.trim())
        .map_err(|e| CompileError::InvalidOutput(e.to_string()))?;

    match &compiled.frontmatter {
        None | Some(Value::Object(_)) => Ok(compiled),
        Some(other) => Err(CompileError::InvalidOutput(format!(
            "frontmatter must be an object, found {other}"
        ))),
    }
}
