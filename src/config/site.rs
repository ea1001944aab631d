//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ContentError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,

    // Writing
    pub default_category: String,
    /// Maximum length (in characters) of generated descriptions
    pub description_length: usize,
    /// Characters read per minute when estimating reading time
    pub reading_speed: usize,

    // Dates
    pub timestamps: TimestampConfig,

    // Local store
    pub store_file: String,
    pub recent_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Bad Lemon".to_string(),
            description: String::new(),
            author: String::new(),
            language: "zh-CN".to_string(),

            url: "http://example.com".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            default_category: "uncategorized".to_string(),
            description_length: 50,
            reading_speed: 400,

            timestamps: TimestampConfig::Mtime,

            store_file: ".bad-lemon/store.json".to_string(),
            recent_limit: 8,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig =
            serde_yaml::from_str(&content).map_err(|e| ContentError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Where publish/update instants for posts come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimestampConfig {
    /// Filesystem modification time of each source file
    Mtime,
    /// No external timestamps; only front-matter dates are used
    None,
    /// A JSON file mapping post ids to `{ created, updated }`
    File(PathBuf),
}

impl From<String> for TimestampConfig {
    fn from(value: String) -> Self {
        match value.trim() {
            "mtime" | "" => TimestampConfig::Mtime,
            "none" => TimestampConfig::None,
            other => TimestampConfig::File(PathBuf::from(other)),
        }
    }
}

impl From<TimestampConfig> for String {
    fn from(value: TimestampConfig) -> Self {
        match value {
            TimestampConfig::Mtime => "mtime".to_string(),
            TimestampConfig::None => "none".to_string(),
            TimestampConfig::File(path) => path.to_string_lossy().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.default_category, "uncategorized");
        assert_eq!(config.description_length, 50);
        assert_eq!(config.reading_speed, 400);
        assert_eq!(config.recent_limit, 8);
        assert_eq!(config.timestamps, TimestampConfig::Mtime);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.org/
default_category: 未分类
reading_speed: 300
timestamps: meta/timestamps.json
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.url, "https://blog.example.org/");
        assert_eq!(config.default_category, "未分类");
        assert_eq!(config.reading_speed, 300);
        assert_eq!(config.description_length, 50);
        assert_eq!(
            config.timestamps,
            TimestampConfig::File(PathBuf::from("meta/timestamps.json"))
        );
    }

    #[test]
    fn test_timestamp_keywords() {
        let config: SiteConfig = serde_yaml::from_str("timestamps: none").unwrap();
        assert_eq!(config.timestamps, TimestampConfig::None);
        let config: SiteConfig = serde_yaml::from_str("timestamps: mtime").unwrap();
        assert_eq!(config.timestamps, TimestampConfig::Mtime);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(dir.path().join("_config.yml")).unwrap_err();
        assert!(matches!(err, ContentError::Io(_)));
    }
}
