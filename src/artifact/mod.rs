//! Built collection artifacts and helpers to look inside them.
//!
//! Archive inspection shells out to `tar`, the same way the packaging step
//! shells out to `ansible-galaxy`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::process::Cmd;
use crate::setup::ContentIndex;

/// Name of the manifest `ansible-galaxy` writes at the archive root.
pub const MANIFEST_FILE: &str = "MANIFEST.json";

/// Expected properties of a built collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionArtifact {
    /// Suffix appended to the collection name.
    pub key: String,
    pub namespace: String,
    pub name: String,
    /// Path of the `.tar.gz` archive.
    pub filename: PathBuf,
    pub version: String,
    /// Never set by a build; tests flip it after uploading.
    pub published: bool,
    /// Temporary directory holding the checkout. Remove it with
    /// [`CollectionArtifact::cleanup`] when done.
    pub build_root: PathBuf,
    pub checkout: PathBuf,
    /// Content the pre-build hook reported adding.
    pub contents: ContentIndex,
}

impl CollectionArtifact {
    /// `namespace.name`, as Galaxy refers to the collection.
    pub fn fqcn(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Entry names in the archive, without a leading `./`.
    pub fn members(&self) -> Result<Vec<String>> {
        let result = Cmd::new("tar")
            .arg("-tzf")
            .arg_path(&self.filename)
            .error_msg(format!("listing {}", self.filename.display()))
            .run()?;

        Ok(result
            .stdout
            .lines()
            .map(|line| line.trim_start_matches("./").to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    pub fn contains(&self, member: &str) -> Result<bool> {
        Ok(self.members()?.iter().any(|m| m == member))
    }

    /// Contents of one archive entry.
    pub fn read_member(&self, member: &str) -> Result<String> {
        let result = Cmd::new("tar")
            .arg("-xzOf")
            .arg_path(&self.filename)
            .arg(member)
            .error_msg(format!(
                "reading {} from {}",
                member,
                self.filename.display()
            ))
            .run()?;
        Ok(result.stdout)
    }

    /// Parsed `MANIFEST.json`.
    pub fn manifest(&self) -> Result<serde_json::Value> {
        let content = self.read_member(MANIFEST_FILE)?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing {} in {}", MANIFEST_FILE, self.filename.display()))
    }

    /// Remove the temporary build root, archive included.
    pub fn cleanup(&self) -> Result<()> {
        if self.build_root.exists() {
            fs::remove_dir_all(&self.build_root)
                .with_context(|| format!("removing '{}'", self.build_root.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact_from(temp: &TempDir) -> CollectionArtifact {
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("roles/foobar")).unwrap();
        fs::write(src.join("roles/foobar/main.yml"), "# a role\n").unwrap();
        fs::write(
            src.join("MANIFEST.json"),
            r#"{"collection_info": {"namespace": "foo", "name": "bar", "version": "5.5.5"}}"#,
        )
        .unwrap();

        let filename = temp.path().join("foo-bar-5.5.5.tar.gz");
        Cmd::new("tar")
            .arg("-czf")
            .arg_path(&filename)
            .arg("-C")
            .arg_path(&src)
            .args(["MANIFEST.json", "roles"])
            .run()
            .unwrap();

        CollectionArtifact {
            key: "abc".into(),
            namespace: "foo".into(),
            name: "bar".into(),
            filename,
            version: "5.5.5".into(),
            published: false,
            build_root: temp.path().join("root"),
            checkout: src,
            contents: ContentIndex::new(),
        }
    }

    #[test]
    fn test_members() {
        let temp = TempDir::new().unwrap();
        let artifact = artifact_from(&temp);

        let members = artifact.members().unwrap();
        assert!(members.contains(&"roles/foobar/main.yml".to_string()));
        assert!(artifact.contains("MANIFEST.json").unwrap());
        assert!(!artifact.contains("roles/other/main.yml").unwrap());
    }

    #[test]
    fn test_manifest() {
        let temp = TempDir::new().unwrap();
        let artifact = artifact_from(&temp);

        let manifest = artifact.manifest().unwrap();
        assert_eq!(manifest["collection_info"]["namespace"], "foo");
        assert_eq!(manifest["collection_info"]["version"], "5.5.5");
        assert_eq!(artifact.fqcn(), "foo.bar");
    }

    #[test]
    fn test_read_missing_member() {
        let temp = TempDir::new().unwrap();
        let artifact = artifact_from(&temp);
        assert!(artifact.read_member("nope.txt").is_err());
    }

    #[test]
    fn test_cleanup_removes_build_root() {
        let temp = TempDir::new().unwrap();
        let artifact = artifact_from(&temp);
        fs::create_dir_all(artifact.build_root.join("collections")).unwrap();

        artifact.cleanup().unwrap();
        assert!(!artifact.build_root.exists());
        artifact.cleanup().unwrap();
    }
}
