//! `galaxy.yml` handling: typed overrides and the load/merge/write cycle.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::filesystem::{read_yaml_mapping, write_yaml};

/// File name of the collection metadata document.
pub const METADATA_FILE: &str = "galaxy.yml";

/// Overrides applied to a checkout's `galaxy.yml` before it is built.
///
/// `version` is kept as a raw YAML value so that a non-string version can be
/// expressed; the builder rejects it after merging.
///
/// ```
/// use orion_utils::CollectionConfig;
///
/// let config = CollectionConfig::new()
///     .namespace("foo")
///     .name("bar")
///     .version("5.5.5")
///     .field("description", "a test collection");
/// assert_eq!(config.name.as_deref(), Some("bar"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionConfig {
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub version: Option<Value>,
    /// Any other `galaxy.yml` field, merged in insertion order.
    pub extra: Mapping,
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn version(mut self, version: impl Into<Value>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set an arbitrary field. Recognized keys land in their typed slot.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        match (key, value.into()) {
            ("namespace", Value::String(s)) => self.namespace = Some(s),
            ("name", Value::String(s)) => self.name = Some(s),
            ("version", value) => self.version = Some(value),
            (key, value) => {
                self.extra.insert(Value::from(key), value);
            }
        }
        self
    }

    /// Overwrite the matching keys of `target`.
    pub fn merge_into(&self, target: &mut Mapping) {
        if let Some(namespace) = &self.namespace {
            target.insert(Value::from("namespace"), Value::from(namespace.as_str()));
        }
        if let Some(name) = &self.name {
            target.insert(Value::from("name"), Value::from(name.as_str()));
        }
        if let Some(version) = &self.version {
            target.insert(Value::from("version"), version.clone());
        }
        for (key, value) in &self.extra {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// A loaded `galaxy.yml`.
#[derive(Debug, Clone)]
pub struct GalaxyMetadata {
    path: PathBuf,
    data: Mapping,
}

impl GalaxyMetadata {
    /// Path of the metadata file inside `checkout`.
    pub fn path_in(checkout: &Path) -> PathBuf {
        checkout.join(METADATA_FILE)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            data: read_yaml_mapping(path)?,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.data.insert(Value::from(key), value.into());
    }

    pub fn merge(&mut self, config: &CollectionConfig) {
        config.merge_into(&mut self.data);
    }

    fn required_str(&self, key: &str) -> Result<&str> {
        self.get(key).and_then(Value::as_str).with_context(|| {
            format!("'{}' has no string field '{}'", self.path.display(), key)
        })
    }

    pub fn name(&self) -> Result<&str> {
        self.required_str("name")
    }

    pub fn namespace(&self) -> Result<&str> {
        self.required_str("namespace")
    }

    /// The version, which must be a YAML string.
    pub fn version(&self) -> Result<&str> {
        match self.get("version") {
            Some(Value::String(version)) => Ok(version.as_str()),
            Some(_) => Err(BuildError::VersionNotString.into()),
            None => anyhow::bail!("'{}' has no version field", self.path.display()),
        }
    }

    pub fn save(&self) -> Result<()> {
        write_yaml(&self.path, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn galaxy(temp: &TempDir, content: &str) -> PathBuf {
        let path = temp.path().join(METADATA_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_field_routes_known_keys() {
        let config = CollectionConfig::new()
            .field("namespace", "ns")
            .field("version", "1.0.0")
            .field("tags", vec![Value::from("tools")]);

        assert_eq!(config.namespace.as_deref(), Some("ns"));
        assert_eq!(config.version, Some(Value::from("1.0.0")));
        assert!(config.extra.contains_key("tags"));
        assert!(config.name.is_none());
    }

    #[test]
    fn test_merge_overrides_and_keeps_rest() {
        let temp = TempDir::new().unwrap();
        let path = galaxy(
            &temp,
            "namespace: orion\nname: skeleton\nversion: 1.0.0\nreadme: README.md\n",
        );

        let mut meta = GalaxyMetadata::load(&path).unwrap();
        meta.merge(&CollectionConfig::new().namespace("foo").version("5.5.5"));
        meta.save().unwrap();

        let reloaded = GalaxyMetadata::load(&path).unwrap();
        assert_eq!(reloaded.namespace().unwrap(), "foo");
        assert_eq!(reloaded.name().unwrap(), "skeleton");
        assert_eq!(reloaded.version().unwrap(), "5.5.5");
        assert_eq!(reloaded.get("readme"), Some(&Value::from("README.md")));
    }

    #[test]
    fn test_integer_version_rejected() {
        let temp = TempDir::new().unwrap();
        let path = galaxy(&temp, "namespace: orion\nname: skeleton\nversion: '1.0.0'\n");

        let mut meta = GalaxyMetadata::load(&path).unwrap();
        meta.merge(&CollectionConfig::new().version(3));

        let err = meta.version().unwrap_err();
        assert_eq!(err.to_string(), "version must be a string");
    }

    #[test]
    fn test_unquoted_float_version_rejected() {
        let temp = TempDir::new().unwrap();
        let path = galaxy(&temp, "namespace: orion\nname: skeleton\nversion: 1.0\n");

        let meta = GalaxyMetadata::load(&path).unwrap();
        assert!(matches!(
            meta.version().unwrap_err().downcast_ref::<BuildError>(),
            Some(BuildError::VersionNotString)
        ));
    }

    #[test]
    fn test_missing_name_is_error() {
        let temp = TempDir::new().unwrap();
        let path = galaxy(&temp, "namespace: orion\nversion: 1.0.0\n");

        let meta = GalaxyMetadata::load(&path).unwrap();
        assert!(meta.name().is_err());
    }
}
