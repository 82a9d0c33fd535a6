//! Materializing a template into a disposable checkout.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::filesystem::copy_dir_recursive;
use crate::template::TemplateCatalog;

/// Doc file prefix that gets replaced with the real `namespace.name`.
const DOCS_PLACEHOLDER_PREFIX: &str = "namespace.collection.";

/// A fresh copy of a template inside its own temporary build root.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// Temporary directory owning everything this build writes.
    pub build_root: PathBuf,
    /// `<build_root>/collections/<base>`.
    pub path: PathBuf,
    /// Template name with `-` replaced by `_`.
    pub name: String,
}

impl Checkout {
    /// Copy template `base` into a new temporary directory.
    ///
    /// The template is resolved before anything is created, so an unknown
    /// name leaves nothing behind.
    pub fn materialize(catalog: &TemplateCatalog, base: &str, temp_prefix: &str) -> Result<Self> {
        let source = catalog.resolve(base)?;

        let build_root = tempfile::Builder::new()
            .prefix(temp_prefix)
            .tempdir()
            .context("creating temporary build root")?
            .keep();

        let collections = build_root.join("collections");
        fs::create_dir_all(&collections)
            .with_context(|| format!("creating '{}'", collections.display()))?;

        let path = collections.join(base);
        copy_dir_recursive(&source, &path)
            .with_context(|| format!("copying template '{}' to '{}'", base, path.display()))?;

        Ok(Self {
            build_root,
            path,
            name: base.replace('-', "_"),
        })
    }
}

/// Rename `docs/**/namespace.collection.<rest>` to `<namespace>.<name>.<rest>`.
///
/// Returns the renamed paths. A checkout without `docs/` is left alone.
pub fn rename_docs(checkout: &Path, namespace: &str, name: &str) -> Result<Vec<PathBuf>> {
    let docs = checkout.join("docs");
    if !docs.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    for entry in WalkDir::new(&docs) {
        let entry = entry.with_context(|| format!("walking '{}'", docs.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if let Some(rest) = file_name.strip_prefix(DOCS_PLACEHOLDER_PREFIX) {
            targets.push((
                entry.path().to_path_buf(),
                entry
                    .path()
                    .with_file_name(format!("{namespace}.{name}.{rest}")),
            ));
        }
    }

    let mut renamed = Vec::with_capacity(targets.len());
    for (from, to) in targets {
        fs::rename(&from, &to).with_context(|| {
            format!("renaming '{}' -> '{}'", from.display(), to.display())
        })?;
        renamed.push(to);
    }

    Ok(renamed)
}
