//! Locating the archive in the packaging command's output.

use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::BuildError;

fn archive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"([-_/\w\d\.]+\.tar\.gz)").expect("archive pattern is a valid regex")
    })
}

/// First path-like token ending in `.tar.gz`.
pub fn find_archive(output: &str) -> Option<&str> {
    archive_pattern()
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve the archive the build reported and make sure it exists.
///
/// Relative paths are taken relative to `checkout`, the command's working
/// directory.
pub fn locate_archive(output: &str, checkout: &Path) -> Result<PathBuf> {
    let reported = find_archive(output)
        .ok_or_else(|| BuildError::ArchiveNotReported(output.to_string()))?;

    let path = checkout.join(reported);
    if !path.exists() {
        return Err(BuildError::ArchiveMissing {
            path,
            output: output.to_string(),
        }
        .into());
    }

    Ok(path)
}
