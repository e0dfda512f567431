//! # pzl-cli — CLI Tool for Puzzle Content
//!
//! Provides the `pzl` command-line interface used locally and in CI to gate
//! puzzle submissions.
//!
//! ## Subcommands
//!
//! - `pzl validate` — run every check over the content root or one document.
//! - `pzl elements` — list the elements a document instantiates.
//! - `pzl allowlist` — print the effective allow-list, or test names against it.
//!
//! ```bash
//! pzl validate
//! pzl validate puzzles/eth/4.mdx --format json
//! pzl elements puzzles/eth/4.mdx
//! pzl allowlist Callout Quiz
//! ```
//!
//! Every subcommand returns its process exit code: `0` when everything
//! passed, `1` when a check failed or a document could not be validated.

pub mod allowlist;
pub mod elements;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use pzl_elements::ElementAllowList;
use pzl_validate::PzlConfig;

/// Output format shared by every subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Resolve a command-line path against the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load and check the run configuration.
///
/// # Errors
///
/// Fails if the named (or discovered) config file cannot be loaded or holds
/// unusable values.
pub fn load_config(path: Option<&Path>, cwd: &Path) -> Result<PzlConfig> {
    let path = path.map(|p| resolve_path(p, cwd));
    let config = PzlConfig::discover(path.as_deref(), cwd)?;
    config.validate()?;
    tracing::debug!(
        content_root = %config.content_root().display(),
        concurrency = config.concurrency,
        "resolved configuration"
    );
    Ok(config)
}

/// The allow-list named on the command line, else the configured one.
///
/// # Errors
///
/// Fails if the allow-list file cannot be loaded.
pub fn load_allow_list(
    config: &PzlConfig,
    override_path: Option<&Path>,
    cwd: &Path,
) -> Result<ElementAllowList> {
    match override_path {
        Some(path) => {
            let path = resolve_path(path, cwd);
            ElementAllowList::load(&path)
                .with_context(|| format!("loading allow-list {}", path.display()))
        }
        None => Ok(config.load_allow_list()?),
    }
}

/// Print `value` as pretty JSON.
///
/// # Errors
///
/// Fails if `value` cannot be serialized.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_keeps_absolute() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(Path::new("/abs/x.mdx"), cwd), PathBuf::from("/abs/x.mdx"));
        assert_eq!(resolve_path(Path::new("x.mdx"), cwd), PathBuf::from("/work/x.mdx"));
    }

    #[test]
    fn load_config_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.content_root(), dir.path().join("puzzles"));
    }

    #[test]
    fn load_config_rejects_unusable_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pzl.yaml"), "concurrency: 0\n").unwrap();
        assert!(load_config(None, dir.path()).is_err());
    }

    #[test]
    fn load_config_named_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(Path::new("custom.yaml")), dir.path()).is_err());
    }

    #[test]
    fn allow_list_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("elements.txt"), "Callout\n").unwrap();
        let config = load_config(None, dir.path()).unwrap();

        let list = load_allow_list(&config, Some(Path::new("elements.txt")), dir.path()).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["Callout"]);

        let default = load_allow_list(&config, None, dir.path()).unwrap();
        assert_eq!(default, ElementAllowList::default());
    }
}
