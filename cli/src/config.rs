use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Item list published alongside the game.
pub const DEFAULT_FEED_URL: &str =
    "https://gist.githubusercontent.com/andresan87/5670c559e5a930129aa03dfce7827306/raw";

/// Settings of the `items generate` pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// `.enml` file name to type tag.
    pub file_to_type: BTreeMap<String, String>,
    pub feed_url: String,
    /// Block openers recognized in item files.
    pub keywords: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let file_to_type = [
            ("armors.enml", "armor"),
            ("rings.enml", "ring"),
            ("swords.enml", "sword"),
            ("hammers.enml", "hammer"),
            ("spears.enml", "spear"),
            ("staffs.enml", "staff"),
            ("daggers.enml", "dagger"),
            ("axes.enml", "axe"),
        ]
        .into_iter()
        .map(|(file, tag)| (file.to_string(), tag.to_string()))
        .collect();

        Self {
            file_to_type,
            feed_url: DEFAULT_FEED_URL.to_string(),
            keywords: vec![enml::ITEM_KEYWORD.to_string()],
        }
    }
}

impl PipelineConfig {
    /// Read a config file; fields it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config {:?}", path))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"fileToType": {"blades.enml": "sword"}}"#).unwrap();
        assert_eq!(config.file_to_type.len(), 1);
        assert_eq!(config.file_to_type["blades.enml"], "sword");
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.keywords, vec!["item"]);
    }

    #[test]
    fn test_default_covers_standard_tags() {
        let config = PipelineConfig::default();
        for tag in catalog::ItemKind::STANDARD_TAGS {
            assert!(config.file_to_type.values().any(|t| t == tag));
        }
    }
}
