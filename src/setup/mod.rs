//! Content injection for checkouts about to be built.
//!
//! [`CollectionSetup`] copies placeholder content from the `kitchensink`
//! template into a checkout, then hands each copied item to the
//! [`Specializer`] registered for its kind (the first path segment of the
//! destination). Kinds without a specializer are copied as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use orion_utils::{BuildRequest, CollectionSetup};
//! use serde_yaml::{Mapping, Value};
//!
//! let mut meta = Mapping::new();
//! meta.insert("description".into(), "This role is a fake role.".into());
//! let mut role = Mapping::new();
//! role.insert("meta".into(), Value::Mapping(meta));
//!
//! let setup = CollectionSetup::new()
//!     .copy("plugins/modules/fakemod.py", None)
//!     .copy("roles/fakerole", Some(Value::Mapping(role)));
//!
//! let artifact = orion_utils::build_collection(
//!     BuildRequest::new("skeleton").pre_build(setup),
//! )?;
//! ```

mod plugins;
mod roles;

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::build::PreBuild;
use crate::filesystem::copy_path;
use crate::template::TemplateCatalog;

pub use plugins::PluginSpecializer;
pub use roles::RoleSpecializer;

/// Copied file names grouped by kind.
///
/// Kinds keep the order they were first seen in; names keep copy order
/// within a kind, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl ContentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `file_name` under `kind`.
    pub fn push(&mut self, kind: &str, file_name: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == kind) {
            Some((_, names)) => names.push(file_name.to_string()),
            None => self
                .entries
                .push((kind.to_string(), vec![file_name.to_string()])),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, names)| names.as_slice())
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(kind, _)| kind.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(kind, names)| (kind.as_str(), names.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for ContentIndex {
    type Output = [String];

    fn index(&self, kind: &str) -> &[String] {
        match self.get(kind) {
            Some(names) => names,
            None => panic!("no content of kind '{kind}'"),
        }
    }
}

/// Kind-specific post-processing of a freshly copied content item.
pub trait Specializer {
    /// `config` is the item's configuration; `path` is where it was copied.
    fn specialize(&self, config: Option<&Value>, path: &Path) -> Result<()>;
}

static SPECIALIZERS: &[(&str, &(dyn Specializer + Sync))] = &[
    ("plugins", &PluginSpecializer),
    ("roles", &RoleSpecializer),
];

/// Look up the specializer for a content kind.
pub fn specializer_for(kind: &str) -> Option<&'static (dyn Specializer + Sync)> {
    SPECIALIZERS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, specializer)| *specializer)
}

/// What one [`CollectionSetup::apply`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub name: String,
    pub key: String,
    pub checkout: PathBuf,
    pub contents: ContentIndex,
}

/// Fills a checkout with placeholder content before it is built.
#[derive(Debug, Clone, Default)]
pub struct CollectionSetup {
    copies: Vec<(String, Option<Value>)>,
    readme: Option<String>,
    version: Option<String>,
    catalog: TemplateCatalog,
}

impl CollectionSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a content item. `dest` is relative to the checkout root.
    pub fn copy(mut self, dest: impl Into<String>, config: Option<Value>) -> Self {
        self.copies.push((dest.into(), config));
        self
    }

    /// Body written to `README.md`, replacing the template's.
    pub fn readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    /// Informational only; logged, not written anywhere.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Take placeholders from another template root.
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn readme_body(&self) -> Option<&str> {
        self.readme.as_deref()
    }

    /// The content index this setup produces, without touching disk.
    pub fn expected_contents(&self) -> ContentIndex {
        let mut contents = ContentIndex::new();
        for (dest, _) in &self.copies {
            let item = ContentItem::parse(dest);
            contents.push(item.kind, item.file_name);
        }
        contents
    }

    /// Populate `checkout` with the configured README and content items.
    pub fn apply(&self, name: &str, key: &str, checkout: &Path) -> Result<SetupReport> {
        if let Some(version) = &self.version {
            log::debug!("Setting up {} (version hint {})", name, version);
        }
        if let Some(readme) = &self.readme {
            let path = checkout.join("README.md");
            fs::write(&path, readme).with_context(|| format!("writing '{}'", path.display()))?;
        }

        let placeholders = self.catalog.placeholders()?;
        let mut contents = ContentIndex::new();

        for (dest, config) in &self.copies {
            let item = ContentItem::parse(dest);
            let src = placeholders.join(item.placeholder());
            let target = checkout.join(dest);

            copy_path(&src, &target)
                .with_context(|| format!("copying placeholder for '{}'", dest))?;

            if let Some(specializer) = specializer_for(item.kind) {
                specializer
                    .specialize(config.as_ref(), &target)
                    .with_context(|| format!("setting up {} item '{}'", item.kind, dest))?;
            }

            log::debug!("Added {} item {}", item.kind, dest);
            contents.push(item.kind, item.file_name);
        }

        Ok(SetupReport {
            name: name.to_string(),
            key: key.to_string(),
            checkout: checkout.to_path_buf(),
            contents,
        })
    }
}

impl PreBuild for CollectionSetup {
    fn pre_build(&self, name: &str, key: &str, checkout: &Path) -> Result<ContentIndex> {
        Ok(self.apply(name, key, checkout)?.contents)
    }
}

/// A destination path split into the parts the injector cares about.
struct ContentItem<'a> {
    kind: &'a str,
    dir: &'a str,
    file_name: &'a str,
    extension: &'a str,
}

impl<'a> ContentItem<'a> {
    fn parse(dest: &'a str) -> Self {
        let kind = dest.split('/').next().unwrap_or(dest);
        let (dir, file_name) = dest.rsplit_once('/').unwrap_or(("", dest));
        let extension = match file_name.rfind('.') {
            Some(0) | None => "",
            Some(idx) => &file_name[idx..],
        };
        Self {
            kind,
            dir,
            file_name,
            extension,
        }
    }

    /// Placeholder path relative to the placeholder template.
    fn placeholder(&self) -> PathBuf {
        Path::new(self.dir).join(format!("placeholder{}", self.extension))
    }
}
