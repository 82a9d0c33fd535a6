use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::Specializer;

/// Overwrites a plugin file with a `DOCUMENTATION` block built from the
/// item's configuration, one `key: value` line per entry.
pub struct PluginSpecializer;

impl Specializer for PluginSpecializer {
    fn specialize(&self, config: Option<&Value>, path: &Path) -> Result<()> {
        let Some(Value::Mapping(fields)) = config else {
            return Ok(());
        };
        if fields.is_empty() {
            return Ok(());
        }

        let mut doc = String::from("DOCUMENTATION='''\n---\n");
        for (key, value) in fields {
            writeln!(doc, "{}: {}", scalar(key)?, scalar(value)?)?;
        }
        doc.push_str("'''\n");

        fs::write(path, doc).with_context(|| format!("writing '{}'", path.display()))
    }
}

/// Render a YAML value on one line: strings bare, anything else as JSON,
/// which YAML reads as flow style.
fn scalar(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_documentation_block() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fakemod.py");
        fs::write(&path, "# placeholder\n").unwrap();

        let config: Value = serde_yaml::from_str(
            "module: fakemod\nshort_description: A fake module\nversion_added: 1\n",
        )
        .unwrap();
        PluginSpecializer.specialize(Some(&config), &path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "DOCUMENTATION='''\n---\nmodule: fakemod\nshort_description: A fake module\nversion_added: 1\n'''\n"
        );
    }

    #[test]
    fn test_nested_values_stay_on_one_line() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fakemod.py");
        fs::write(&path, "# placeholder\n").unwrap();

        let config: Value = serde_yaml::from_str(
            "module: fakemod\noptions:\n  name:\n    description: x\nauthor:\n  - a\n  - b\n",
        )
        .unwrap();
        PluginSpecializer.specialize(Some(&config), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "DOCUMENTATION='''",
                "---",
                "module: fakemod",
                r#"options: {"name":{"description":"x"}}"#,
                r#"author: ["a","b"]"#,
                "'''",
            ]
        );

        // The block between the delimiters is still valid YAML.
        let yaml = lines[1..lines.len() - 1].join("\n");
        let doc: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["options"]["name"]["description"], Value::from("x"));
        assert_eq!(doc["author"][1], Value::from("b"));
    }

    #[test]
    fn test_empty_config_leaves_placeholder() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fakemod.py");
        fs::write(&path, "# placeholder\n").unwrap();

        PluginSpecializer.specialize(None, &path).unwrap();
        let empty: Value = serde_yaml::from_str("{}").unwrap();
        PluginSpecializer.specialize(Some(&empty), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# placeholder\n");
    }
}
