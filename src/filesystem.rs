//! Filesystem helpers shared by the builder and the content injector.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::BuildError;

/// Recursively copy a directory, preserving symlinks.
///
/// `dst` is created if it does not exist. Existing files are overwritten.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            if target.exists() || target.is_symlink() {
                fs::remove_file(&target)?;
            }
            std::os::unix::fs::symlink(&link, &target)
                .with_context(|| format!("Failed to create symlink: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy file: {}", entry.path().display()))?;
        }
    }

    Ok(())
}

/// Copy a file or directory tree to `dst`, creating parent directories.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    if !src.exists() {
        anyhow::bail!("placeholder not found: {}", src.display());
    }

    if src.is_dir() {
        return copy_dir_recursive(src, dst);
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Read a YAML document that must be a mapping.
pub fn read_yaml_mapping(path: &Path) -> Result<Mapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading YAML document '{}'", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing YAML document '{}'", path.display()))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        // An empty file parses as null.
        Value::Null => Ok(Mapping::new()),
        _ => Err(BuildError::InvalidMetadata(path.to_path_buf()).into()),
    }
}

/// Serialize `value` as YAML into `path`, creating parent directories.
pub fn write_yaml<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_yaml::to_string(value)
        .with_context(|| format!("serializing YAML for '{}'", path.display()))?;
    fs::write(path, content).with_context(|| format!("writing '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_dir_recursive_nested() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("roles/placeholder/meta")).unwrap();
        fs::write(src.join("roles/placeholder/meta/main.yml"), "galaxy_info: {}\n").unwrap();
        fs::write(src.join("galaxy.yml"), "name: x\n").unwrap();
        std::os::unix::fs::symlink("galaxy.yml", src.join("link.yml")).unwrap();

        let dst = temp.path().join("out/checkout");
        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("roles/placeholder/meta/main.yml")).unwrap(),
            "galaxy_info: {}\n"
        );
        assert!(dst.join("galaxy.yml").is_file());
        assert!(dst.join("link.yml").is_symlink());
    }

    #[test]
    fn test_copy_path_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("placeholder.py");
        fs::write(&src, "# module\n").unwrap();

        let dst = temp.path().join("plugins/modules/fakemod.py");
        copy_path(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst).unwrap(), "# module\n");
    }

    #[test]
    fn test_copy_path_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_path(&temp.path().join("nope.py"), &temp.path().join("x.py"));
        assert!(err.unwrap_err().to_string().contains("placeholder not found"));
    }

    #[test]
    fn test_read_yaml_mapping_rejects_sequence() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("galaxy.yml");
        fs::write(&path, "- a\n- b\n").unwrap();

        let err = read_yaml_mapping(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_write_yaml_string_scalar() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roles/foobar/main.yml");
        write_yaml(&path, "# a role").unwrap();

        let loaded: String = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, "# a role");
    }
}
