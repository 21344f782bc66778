//! Project configuration for goanalyze.
//!
//! Configuration only affects which files a project run visits and how the
//! run is executed; per-file analysis has no knobs.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file names searched for in the project root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["goanalyze.yaml", ".goanalyze.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Whether to analyze `_test.go` files (default: false)
    #[serde(default)]
    pub include_test_files: bool,
    /// Glob patterns for paths to skip (e.g., "**/gen/**", "*.pb.go")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Analyze files on the rayon pool (default: true)
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Indent JSON output (default: false)
    #[serde(default)]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_test_files: false,
            excluded_paths: Vec::new(),
            parallel: true,
            pretty: false,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. Empty text yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the config for a project root.
    ///
    /// An explicit path must exist. Otherwise the default names are tried
    /// in `root`, falling back to defaults when none is present.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(root),
        };

        match path {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
                validate(&config)?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Compile `excluded_paths` into one matcher.
    ///
    /// Patterns are checked by [`validate`]; any that still fail to compile
    /// are skipped.
    pub fn exclusion_matcher(&self) -> GlobSet {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        builder.build().unwrap_or_else(|_| GlobSet::empty())
    }
}

/// Find a default-named config file in `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for pattern in &config.excluded_paths {
        if pattern.trim().is_empty() {
            anyhow::bail!("invalid excluded_paths pattern: empty pattern");
        }
        Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }
    Ok(())
}
