//! Snapshot and configuration files.
//!
//! A snapshot file is a JSON array of sections:
//!
//! ```json
//! [{"model_id": "inbox", "header_title": "Inbox",
//!   "items": [{"id": "m1", "content": {"subject": "hi"}}]}]
//! ```
//!
//! An item counts as changed when its `content` differs between files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use reflow_director::DirectorConfig;
use reflow_types::{Model, ModelId, Section};

/// An item loaded from a snapshot file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonItem {
    pub id: ModelId,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Model for JsonItem {
    fn model_id(&self) -> &ModelId {
        &self.id
    }

    fn is_changed_from(&self, previous: &Self) -> bool {
        self.content != previous.content
    }
}

pub fn parse_sections(text: &str) -> serde_json::Result<Vec<Section<JsonItem>>> {
    serde_json::from_str(text)
}

pub fn load_sections(path: &Path) -> anyhow::Result<Vec<Section<JsonItem>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_sections(&text).with_context(|| format!("invalid snapshot {}", path.display()))
}

/// Load a [`DirectorConfig`] from TOML, or the default when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<DirectorConfig> {
    let Some(path) = path else {
        return Ok(DirectorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_surface::RowAnimation;
    use std::io::Write;

    #[test]
    fn parses_sections_with_defaults() {
        let sections = parse_sections(
            r#"[{"model_id": "s1", "header_title": "One", "items": [{"id": "a"}, {"id": "b", "content": 3}]},
                {"model_id": "s2"}]"#,
        )
        .unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].header_title.as_deref(), Some("One"));
        assert_eq!(sections[0].items[0].content, serde_json::Value::Null);
        assert_eq!(sections[0].items[1].content, serde_json::json!(3));
        assert!(sections[1].items.is_empty());
    }

    #[test]
    fn content_drives_change_detection() {
        let a = JsonItem { id: ModelId::new("x"), content: serde_json::json!({"v": 1}) };
        let b = JsonItem { id: ModelId::new("x"), content: serde_json::json!({"v": 2}) };
        assert!(b.is_changed_from(&a));
        assert!(!a.is_changed_from(&a.clone()));
    }

    #[test]
    fn load_sections_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"model_id": "s1", "items": [{{"id": "a"}}]}}]"#).unwrap();

        let sections = load_sections(file.path()).unwrap();
        assert_eq!(sections[0].model_id.as_str(), "s1");
    }

    #[test]
    fn load_sections_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_sections(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), DirectorConfig::default());
    }

    #[test]
    fn config_from_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "full_reload_threshold = 50\n\n[animations.rows]\ninsert = \"fade\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.full_reload_threshold, Some(50));
        assert!(config.warn_on_duplicate_ids);
        assert_eq!(config.animations.rows.insert, RowAnimation::Fade);
        assert_eq!(config.animations.rows.delete, RowAnimation::None);
    }
}
