use anyhow::Result;
use serde_yaml::Value;
use std::path::Path;

use super::Specializer;
use crate::filesystem::{read_yaml_mapping, write_yaml};

/// Replaces `galaxy_info` in a role's `meta/main.yml` with the item's `meta`.
pub struct RoleSpecializer;

impl Specializer for RoleSpecializer {
    fn specialize(&self, config: Option<&Value>, path: &Path) -> Result<()> {
        let Some(meta) = config.and_then(|cfg| cfg.get("meta")) else {
            return Ok(());
        };
        if is_empty(meta) {
            return Ok(());
        }

        let meta_path = path.join("meta").join("main.yml");
        let mut doc = read_yaml_mapping(&meta_path)?;
        doc.insert(Value::from("galaxy_info"), meta.clone());
        write_yaml(&meta_path, &doc)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}
