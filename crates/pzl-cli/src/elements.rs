//! # Elements CLI — list the elements a document instantiates.
//!
//! ```bash
//! # Compile with the configured compiler, then extract:
//! pzl elements puzzles/eth/4.mdx
//!
//! # The file already holds compiled output:
//! pzl elements build/4.js --compiled --format json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use pzl_elements::{extract_element_counts, ElementCount};
use pzl_validate::{Compiler, PzlConfig};

use crate::{print_json, resolve_path, OutputFormat};

/// Arguments for `pzl elements`.
#[derive(Args, Debug)]
pub struct ElementsArgs {
    /// Document to inspect.
    pub file: PathBuf,

    /// FILE already holds compiled output; skip compilation.
    #[arg(long)]
    pub compiled: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `pzl elements` with the configured external compiler.
pub fn run_elements(args: &ElementsArgs, config: &PzlConfig, cwd: &Path) -> Result<u8> {
    let compiler = config.build_compiler()?;
    run_elements_with(args, cwd, &compiler)
}

/// Execute `pzl elements` with an explicit compiler.
pub fn run_elements_with(args: &ElementsArgs, cwd: &Path, compiler: &dyn Compiler) -> Result<u8> {
    let counts = element_counts(&resolve_path(&args.file, cwd), args.compiled, compiler)?;
    match args.format {
        OutputFormat::Text => {
            for count in &counts {
                println!("{:<32} {}", count.name, count.occurrences);
            }
            println!();
            println!("Distinct elements: {}", counts.len());
        }
        OutputFormat::Json => print_json(&counts)?,
    }
    Ok(0)
}

fn element_counts(path: &Path, compiled: bool, compiler: &dyn Compiler) -> Result<Vec<ElementCount>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let source = if compiled {
        text
    } else {
        compiler
            .compile(&text)
            .with_context(|| format!("compiling {}", path.display()))?
            .compiled_source
    };
    Ok(extract_element_counts(&source))
}
