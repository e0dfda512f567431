//! # Validate CLI — run every check over the content root.
//!
//! ```bash
//! # Whole corpus, content root from pzl.yaml (default: puzzles/):
//! pzl validate
//!
//! # One document, machine-readable:
//! pzl validate puzzles/eth/4.mdx --format json
//!
//! # Different corpus and allow-list:
//! pzl validate --root content --allow-list config/elements.yaml
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use pzl_validate::{Compiler, CorpusReport, CorpusWalker, DocumentFailure, DocumentValidator, PzlConfig};

use crate::{load_allow_list, print_json, resolve_path, OutputFormat};

/// Arguments for `pzl validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate only this document. The whole content root otherwise.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Content root to scan, overriding the configured one.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Allow-list file, overriding the configured one.
    #[arg(long)]
    pub allow_list: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `pzl validate` with the configured external compiler.
pub fn run_validate(args: &ValidateArgs, config: &PzlConfig, cwd: &Path) -> Result<u8> {
    let compiler = config.build_compiler()?;
    run_validate_with(args, config, cwd, Arc::new(compiler))
}

/// Execute `pzl validate` with an explicit compiler.
pub fn run_validate_with(
    args: &ValidateArgs,
    config: &PzlConfig,
    cwd: &Path,
    compiler: Arc<dyn Compiler>,
) -> Result<u8> {
    let root = match &args.root {
        Some(root) => resolve_path(root, cwd),
        None => config.content_root(),
    };
    let allow_list = load_allow_list(config, args.allow_list.as_deref(), cwd)?;
    tracing::info!(elements = allow_list.len(), "element allow-list ready");

    let walker = CorpusWalker::new(&root, compiler, DocumentValidator::new(Arc::new(allow_list)))
        .with_extensions(config.extensions.clone())
        .with_concurrency(config.concurrency);

    let report = match &args.path {
        Some(path) => validate_single(&walker, &resolve_path(path, cwd)),
        None => {
            let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
            runtime
                .block_on(walker.run())
                .with_context(|| format!("validating {}", root.display()))?
        }
    };

    match args.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(report.exit_code())
}

fn validate_single(walker: &CorpusWalker, path: &Path) -> CorpusReport {
    let root = walker.root().display().to_string();
    match walker.validate_path(path) {
        Ok(report) => CorpusReport::new(root, vec![report], Vec::new()),
        Err(e) => {
            tracing::warn!(document = %path.display(), "{e}");
            let failure = DocumentFailure {
                document: pzl_validate::document_id(walker.root(), path),
                error: e.to_string(),
            };
            CorpusReport::new(root, Vec::new(), vec![failure])
        }
    }
}
