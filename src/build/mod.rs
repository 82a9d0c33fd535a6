//! End-to-end collection builds.
//!
//! A build runs these steps, failing fast on the first error:
//!
//! 1. Resolve the key (generated when absent; empty is rejected)
//! 2. Copy the template into `<tmp>/orion-utils-*/collections/<base>`
//! 3. Rename placeholder doc files when namespace and name are overridden
//! 4. Run the pre-build hook
//! 5. Patch `galaxy.yml` with the caller's overrides
//! 6. Write extra files
//! 7. Run the packaging command and locate the archive it reports
//!
//! Nothing is cleaned up on failure; the checkout stays on disk for
//! inspection.

mod checkout;
mod output;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;

use crate::artifact::CollectionArtifact;
use crate::error::BuildError;
use crate::filesystem::write_yaml;
use crate::ident::{random_key, DEFAULT_KEY_LENGTH};
use crate::metadata::{CollectionConfig, GalaxyMetadata};
use crate::process::Cmd;
use crate::settings::Settings;
use crate::setup::ContentIndex;
use crate::template::TemplateCatalog;

pub use checkout::{rename_docs, Checkout};
pub use output::{find_archive, locate_archive};

/// Hook run against the checkout before its metadata is patched.
///
/// Receives the derived collection name, the key and the checkout path.
/// Whatever content index it returns ends up in
/// [`CollectionArtifact::contents`].
pub trait PreBuild {
    fn pre_build(&self, name: &str, key: &str, checkout: &Path) -> Result<ContentIndex>;
}

impl<F> PreBuild for F
where
    F: Fn(&str, &str, &Path) -> Result<()>,
{
    fn pre_build(&self, name: &str, key: &str, checkout: &Path) -> Result<ContentIndex> {
        self(name, key, checkout)?;
        Ok(ContentIndex::new())
    }
}

/// Inputs of one build.
pub struct BuildRequest<'a> {
    base: String,
    config: CollectionConfig,
    key: Option<String>,
    pre_build: Option<Box<dyn PreBuild + 'a>>,
    extra_files: Vec<(String, Value)>,
}

impl<'a> BuildRequest<'a> {
    /// Build from the template called `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            config: CollectionConfig::default(),
            key: None,
            pre_build: None,
            extra_files: Vec::new(),
        }
    }

    /// Overrides merged into `galaxy.yml`.
    pub fn config(mut self, config: CollectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Suffix for the collection name. Generated when not set.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn pre_build(mut self, hook: impl PreBuild + 'a) -> Self {
        self.pre_build = Some(Box::new(hook));
        self
    }

    /// Like [`BuildRequest::pre_build`], for closures.
    pub fn pre_build_fn<F>(self, hook: F) -> Self
    where
        F: Fn(&str, &str, &Path) -> Result<()> + 'a,
    {
        self.pre_build(hook)
    }

    /// Write `content` as YAML to `path` (relative to the checkout).
    pub fn extra_file<T: Serialize>(mut self, path: impl Into<String>, content: T) -> Result<Self> {
        let path = path.into();
        let value = serde_yaml::to_value(content)
            .with_context(|| format!("serializing extra file '{}'", path))?;
        self.extra_files.push((path, value));
        Ok(self)
    }

}

/// Runs builds against one template catalog and packaging command.
#[derive(Debug, Clone)]
pub struct Builder {
    settings: Settings,
    catalog: TemplateCatalog,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Builder {
    pub fn new(settings: Settings) -> Self {
        let catalog = TemplateCatalog::new(&settings.templates_dir);
        Self { settings, catalog }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build a collection artifact.
    pub fn build(&self, request: BuildRequest<'_>) -> Result<CollectionArtifact> {
        let BuildRequest {
            base,
            config,
            key,
            pre_build,
            extra_files,
        } = request;

        let key = match key {
            Some(key) if key.is_empty() => return Err(BuildError::EmptyKey.into()),
            Some(key) => key,
            None => random_key(DEFAULT_KEY_LENGTH, None),
        };

        let checkout = Checkout::materialize(&self.catalog, &base, &self.settings.temp_prefix)?;
        let mut name = checkout.name.clone();

        if let (Some(namespace), Some(collection)) = (&config.namespace, &config.name) {
            rename_docs(&checkout.path, namespace, collection)?;
        }

        let mut contents = ContentIndex::new();
        if let Some(hook) = &pre_build {
            log::info!("Running pre-build callback on collection {} (key {})", name, key);
            contents = hook
                .pre_build(&name, &key, &checkout.path)
                .with_context(|| format!("pre-build callback for collection {}", name))?;
        }

        let metadata_path = GalaxyMetadata::path_in(&checkout.path);
        if !metadata_path.is_file() {
            anyhow::bail!("checkout '{}' has no galaxy.yml", checkout.path.display());
        }

        let mut metadata = GalaxyMetadata::load(&metadata_path)?;
        name = format!("{}_{}", metadata.name()?, key);
        metadata.merge(&config);
        match &config.name {
            Some(configured) => name = configured.clone(),
            None => metadata.set("name", name.as_str()),
        }
        metadata.version()?;
        metadata.save()?;

        for (path, content) in &extra_files {
            write_yaml(&checkout.path.join(path), content)
                .with_context(|| format!("writing extra file '{}'", path))?;
        }

        log::info!("Building collection {} at {}", name, checkout.path.display());
        let result = Cmd::shell(&format!("exec 2>&1\n{}", self.settings.build_command))
            .dir(&checkout.path)
            .allow_fail()
            .run()?;
        log::debug!("Build output for {}:\n{}", name, result.stdout);

        let filename = locate_archive(&result.stdout, &checkout.path)?;
        log::info!("Built {}", filename.display());

        Ok(CollectionArtifact {
            key,
            namespace: metadata.namespace()?.to_string(),
            name,
            filename,
            version: metadata.version()?.to_string(),
            published: false,
            build_root: checkout.build_root,
            checkout: checkout.path,
            contents,
        })
    }
}

/// Build with the default settings and shipped templates.
pub fn build_collection(request: BuildRequest<'_>) -> Result<CollectionArtifact> {
    Builder::default().build(request)
}
