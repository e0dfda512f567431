//! # Configuration
//!
//! Settings for a validation run, read from `pzl.yaml`:
//!
//! ```yaml
//! content_root: puzzles
//! extensions: [mdx]
//! allow_list: config/elements.yaml     # optional; built-in list otherwise
//! compiler:
//!   command: [node, scripts/compile-mdx.mjs]
//! concurrency: 8
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! containing the config file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pzl_elements::{AllowListError, ElementAllowList};

use crate::compiler::ProcessCompiler;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pzl.yaml";

/// Error loading or interpreting configuration. Fatal for the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`PzlConfig`].
    #[error("invalid config '{path}': {reason}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Parser error message.
        reason: String,
    },

    /// A value is present but unusable.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// External compiler settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: vec!["node".to_string(), "scripts/compile-mdx.mjs".to_string()],
        }
    }
}

/// Settings for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PzlConfig {
    /// Directory scanned for documents.
    pub content_root: PathBuf,
    /// File extensions treated as documents, without the dot.
    pub extensions: Vec<String>,
    /// Allow-list file. The built-in list is used when unset.
    pub allow_list: Option<PathBuf>,
    /// External compiler.
    pub compiler: CompilerConfig,
    /// Maximum documents processed at once.
    pub concurrency: usize,
    /// Directory relative paths resolve against, and the compiler runs in.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for PzlConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("puzzles"),
            extensions: vec!["mdx".to_string()],
            allow_list: None,
            compiler: CompilerConfig::default(),
            concurrency: 8,
            base_dir: PathBuf::from("."),
        }
    }
}

impl PzlConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&content).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        config.base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else `pzl.yaml` in `cwd` if it exists, else
    /// defaults rooted at `cwd`.
    ///
    /// # Errors
    ///
    /// Propagates [`PzlConfig::load`] errors. An explicitly named file that
    /// does not exist is an error; a missing default file is not.
    pub fn discover(path: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default = cwd.join(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            return Self::load(default);
        }
        Ok(Self {
            base_dir: cwd.to_path_buf(),
            ..Self::default()
        })
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Resolve `path` against the config's base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Absolute-or-base-relative content root.
    pub fn content_root(&self) -> PathBuf {
        self.resolve(&self.content_root)
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty compiler command, an
    /// empty extension list or a zero concurrency limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.command.is_empty() {
            return Err(ConfigError::Invalid("compiler.command must not be empty".into()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid("extensions must not be empty".into()));
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }
        Ok(())
    }

    /// Load the configured allow-list, or the built-in one.
    ///
    /// # Errors
    ///
    /// Propagates [`AllowListError`] from loading the configured file.
    pub fn load_allow_list(&self) -> Result<ElementAllowList, AllowListError> {
        match &self.allow_list {
            Some(path) => ElementAllowList::load(self.resolve(path)),
            None => Ok(ElementAllowList::default()),
        }
    }

    /// Build the external compiler from `compiler.command`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the command is empty.
    pub fn build_compiler(&self) -> Result<ProcessCompiler, ConfigError> {
        let (program, args) = self
            .compiler
            .command
            .split_first()
            .ok_or_else(|| ConfigError::Invalid("compiler.command must not be empty".into()))?;
        Ok(ProcessCompiler::new(program.clone(), args.to_vec()).with_working_dir(&self.base_dir))
    }
}
