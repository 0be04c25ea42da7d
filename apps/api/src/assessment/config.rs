//! Declarative per-assessment-type report configuration.
//!
//! Each assessment type (`as_hr_02`, `as_card_01`, ...) maps to an ordered list
//! of sections and fields. Adding a new type is a JSON change, not a code change:
//! the built-in set is bundled, and an optional file can add or replace entries.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{info, warn};

const BUILTIN_CONFIGS: &str = include_str!("../../data/assessment_configs.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub name: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub label: String,
    /// Path expression into the raw record. See [`crate::assessment::path`].
    pub path: String,
    #[serde(default)]
    pub unit: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    /// A malformed classification block is dropped at load time so the field
    /// still renders, just without a badge.
    #[serde(default, deserialize_with = "lenient_classification")]
    pub classification: Option<Classification>,
}

/// Ordered inclusive ranges. Lookup is first-match in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub ranges: Vec<ClassificationRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRange {
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub color: String,
}

fn default_field_type() -> String {
    "number".to_string()
}

fn lenient_classification<'de, D>(deserializer: D) -> Result<Option<Classification>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(Classification::from_value))
}

impl Classification {
    /// Parses a classification block, returning `None` when it is null, has no
    /// `ranges` array, or any range is missing a numeric bound or a label/color.
    pub fn from_value(raw: Value) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        match serde_json::from_value::<Classification>(raw) {
            Ok(classification) => Some(classification),
            Err(e) => {
                warn!("Ignoring malformed classification: {e}");
                None
            }
        }
    }
}

/// Registry of assessment configurations keyed by assessment type id.
#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    configs: HashMap<String, AssessmentConfig>,
}

impl ConfigRegistry {
    /// Loads the bundled `as_hr_02` / `as_card_01` configurations.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONFIGS).context("Bundled assessment configs are invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let configs: HashMap<String, AssessmentConfig> =
            serde_json::from_str(json).context("Failed to parse assessment configs")?;
        Ok(Self { configs })
    }

    /// Merges configs from a JSON file over the current set.
    /// Entries with an existing id replace it. Returns the number of entries read.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read assessment configs from {}", path.display()))?;
        let extra = Self::from_json(&raw)
            .with_context(|| format!("Invalid assessment configs in {}", path.display()))?;

        let count = extra.configs.len();
        for (id, config) in extra.configs {
            if self.configs.contains_key(&id) {
                info!("Overriding assessment config '{id}' from {}", path.display());
            }
            self.configs.insert(id, config);
        }
        Ok(count)
    }

    pub fn get(&self, assessment_id: &str) -> Option<&AssessmentConfig> {
        self.configs.get(assessment_id)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_builtin_configs_load() {
        let registry = ConfigRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 2);

        let hr = registry.get("as_hr_02").unwrap();
        assert_eq!(hr.name, "Health & Fitness Assessment");
        assert_eq!(hr.sections[0].id, "overall_health");
        assert!(hr.sections.iter().all(|s| !s.fields.is_empty()));

        let card = registry.get("as_card_01").unwrap();
        assert_eq!(card.name, "Cardiac Assessment");
        assert!(registry.get("as_unknown").is_none());
    }

    #[test]
    fn test_builtin_ranges_keep_declaration_order() {
        let registry = ConfigRegistry::builtin().unwrap();
        let field = &registry.get("as_hr_02").unwrap().sections[0].fields[0];
        let labels: Vec<_> = field
            .classification
            .as_ref()
            .unwrap()
            .ranges
            .iter()
            .map(|r| r.label.as_str())
            .collect();
        assert_eq!(labels, ["Poor", "Fair", "Good", "Excellent"]);
    }

    #[test]
    fn test_field_defaults() {
        let field: Field = serde_json::from_value(json!({
            "key": "k", "label": "K", "path": "a.b"
        }))
        .unwrap();
        assert_eq!(field.unit, "");
        assert_eq!(field.field_type, "number");
        assert!(field.classification.is_none());
    }

    #[test]
    fn test_malformed_classification_is_dropped() {
        let field: Field = serde_json::from_value(json!({
            "key": "k", "label": "K", "path": "a", "unit": "", "type": "number",
            "classification": { "ranges": "not-a-list" }
        }))
        .unwrap();
        assert!(field.classification.is_none());

        let field: Field = serde_json::from_value(json!({
            "key": "k", "label": "K", "path": "a",
            "classification": { "ranges": [{ "min": "low", "max": 5, "label": "x", "color": "red" }] }
        }))
        .unwrap();
        assert!(field.classification.is_none());

        let field: Field = serde_json::from_value(json!({
            "key": "k", "label": "K", "path": "a", "classification": {}
        }))
        .unwrap();
        assert!(field.classification.is_none());
    }

    #[test]
    fn test_merge_file_overrides_and_adds() {
        let mut registry = ConfigRegistry::builtin().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({
                "as_card_01": { "name": "Cardiac v2", "sections": [] },
                "as_new_01": { "name": "New", "sections": [] }
            })
        )
        .unwrap();

        let count = registry.merge_file(file.path()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("as_card_01").unwrap().name, "Cardiac v2");
        assert_eq!(registry.get("as_new_01").unwrap().name, "New");
    }

    #[test]
    fn test_merge_file_rejects_invalid_json() {
        let mut registry = ConfigRegistry::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(registry.merge_file(file.path()).is_err());
        assert!(registry.is_empty());
    }
}
