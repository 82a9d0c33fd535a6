//! Builder settings: where templates live and how collections get packaged.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Command used to package a checkout when nothing else is configured.
pub const DEFAULT_BUILD_COMMAND: &str = "ansible-galaxy collection build -vvv";

/// Prefix for the temporary directory each build runs in.
pub const DEFAULT_TEMP_PREFIX: &str = "orion-utils-";

/// Directory of template collections shipped with the crate.
pub fn default_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("collections")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root holding one directory per template collection.
    pub templates_dir: PathBuf,
    /// Shell command run inside the checkout to produce the archive.
    pub build_command: String,
    pub temp_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            build_command: DEFAULT_BUILD_COMMAND.to_string(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing keys keep their defaults and
    /// a relative `templates_dir` is resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings '{}'", path.display()))?;
        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("parsing settings '{}'", path.display()))?;

        if settings.templates_dir.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            settings.templates_dir = base.join(&settings.templates_dir);
        }

        Ok(settings)
    }

    pub fn with_build_command(mut self, command: impl Into<String>) -> Self {
        self.build_command = command.into();
        self
    }

    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = dir.into();
        self
    }

    /// Program name of the build command, for preflight checks.
    pub fn build_program(&self) -> Option<&str> {
        self.build_command.split_whitespace().next()
    }
}
