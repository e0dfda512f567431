//! # Allow-list CLI — inspect the effective element allow-list.
//!
//! ```bash
//! # Every permitted element:
//! pzl allowlist
//!
//! # Would these components be accepted?
//! pzl allowlist Callout Quiz
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde_json::json;

use pzl_elements::ElementAllowList;
use pzl_validate::PzlConfig;

use crate::{load_allow_list, print_json, OutputFormat};

/// Arguments for `pzl allowlist`.
#[derive(Args, Debug)]
pub struct AllowlistArgs {
    /// Element names to test. Lists the whole allow-list when omitted.
    pub names: Vec<String>,

    /// Allow-list file, overriding the configured one.
    #[arg(long)]
    pub allow_list: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `pzl allowlist`. Exits `1` if any tested name is not permitted.
pub fn run_allowlist(args: &AllowlistArgs, config: &PzlConfig, cwd: &Path) -> Result<u8> {
    let list = load_allow_list(config, args.allow_list.as_deref(), cwd)?;
    if args.names.is_empty() {
        print_list(&list, args.format)?;
        return Ok(0);
    }

    let disallowed = list.disallowed(&args.names);
    match args.format {
        OutputFormat::Text => {
            for name in &args.names {
                let status = if list.contains(name) { "allowed" } else { "DISALLOWED" };
                println!("{name:<32} {status}");
            }
        }
        OutputFormat::Json => print_json(&json!({
            "allowed": args.names.iter().filter(|n| list.contains(n)).collect::<Vec<_>>(),
            "disallowed": disallowed,
        }))?,
    }
    Ok(if disallowed.is_empty() { 0 } else { 1 })
}

fn print_list(list: &ElementAllowList, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in list.iter() {
                println!("{name}");
            }
            println!();
            println!("Total: {} elements", list.len());
        }
        OutputFormat::Json => print_json(&list.iter().collect::<Vec<_>>())?,
    }
    Ok(())
}
