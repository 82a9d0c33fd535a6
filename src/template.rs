//! Catalog of template collections a build can start from.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::BuildError;

/// Templates shipped in the crate's `collections/` directory.
pub const SHIPPED_TEMPLATES: &[&str] = &[
    "collection_dep_a",
    "collection_dep_a1",
    "collection_with_content",
    "kitchensink",
    "searchfixture",
    "skeleton",
];

/// Template the content injector copies placeholder files from.
pub const PLACEHOLDER_TEMPLATE: &str = "kitchensink";

/// Named template directories under a single root.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the template called `name`.
    ///
    /// Fails with [`BuildError::TemplateNotFound`] if `name` is not a single
    /// directory name or no such directory exists.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        let mut components = Path::new(name).components();
        let single_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_name || !path.is_dir() {
            return Err(BuildError::TemplateNotFound {
                name: name.to_string(),
                path,
            }
            .into());
        }
        Ok(path)
    }

    /// Directory placeholder content is copied from.
    pub fn placeholders(&self) -> Result<PathBuf> {
        self.resolve(PLACEHOLDER_TEMPLATE)
    }

    /// Sorted names of every template present on disk.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("reading template directory '{}'", self.root.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new(crate::settings::default_templates_dir())
    }
}
