//! External publish/update instants for posts

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::Document;
use crate::error::ContentError;

/// Creation and last-update instants of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created: DateTime<FixedOffset>,
    pub updated: DateTime<FixedOffset>,
}

/// Supplies timestamps for documents from outside the markdown itself
pub trait TimestampSource {
    fn lookup(&self, doc: &Document) -> Option<Timestamps>;
}

/// Uses the filesystem modification time for both instants
#[derive(Debug, Default, Clone, Copy)]
pub struct MtimeSource;

impl TimestampSource for MtimeSource {
    fn lookup(&self, doc: &Document) -> Option<Timestamps> {
        let modified = fs::metadata(&doc.path).and_then(|m| m.modified()).ok()?;
        let instant = DateTime::<Local>::from(modified).fixed_offset();
        Some(Timestamps {
            created: instant,
            updated: instant,
        })
    }
}

/// Never has a timestamp; front-matter dates are used instead
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTimestamps;

impl TimestampSource for NoTimestamps {
    fn lookup(&self, _doc: &Document) -> Option<Timestamps> {
        None
    }
}

/// Timestamps keyed by document id (file stem), e.g. exported from git history
///
/// ```json
/// { "uart-dma": { "created": "2024-05-01T09:00:00+08:00", "updated": "2024-06-02T21:10:00+08:00" } }
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMap {
    entries: HashMap<String, Timestamps>,
}

impl TimestampMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON map from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let content = fs::read_to_string(path.as_ref())?;
        let map: TimestampMap = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} timestamps from {:?}",
            map.entries.len(),
            path.as_ref()
        );
        Ok(map)
    }

    pub fn insert(&mut self, id: impl Into<String>, timestamps: Timestamps) {
        self.entries.insert(id.into(), timestamps);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TimestampSource for TimestampMap {
    fn lookup(&self, doc: &Document) -> Option<Timestamps> {
        self.entries.get(&doc.id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(id: &str, path: PathBuf) -> Document {
        Document {
            id: id.to_string(),
            path,
            raw: String::new(),
        }
    }

    #[test]
    fn test_mtime_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.md");
        fs::write(&path, "hello").unwrap();

        let stamps = MtimeSource.lookup(&doc("a", path)).unwrap();
        assert_eq!(stamps.created, stamps.updated);
    }

    #[test]
    fn test_mtime_source_missing_file() {
        let missing = doc("gone", PathBuf::from("/definitely/not/here.md"));
        assert!(MtimeSource.lookup(&missing).is_none());
        assert!(NoTimestamps.lookup(&missing).is_none());
    }

    #[test]
    fn test_load_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timestamps.json");
        fs::write(
            &path,
            r#"{"uart-dma": {"created": "2024-05-01T09:00:00+08:00", "updated": "2024-06-02T21:10:00+08:00"}}"#,
        )
        .unwrap();

        let map = TimestampMap::load(&path).unwrap();
        assert_eq!(map.len(), 1);

        let stamps = map
            .lookup(&doc("uart-dma", PathBuf::from("uart-dma.md")))
            .unwrap();
        assert_eq!(stamps.created.to_rfc3339(), "2024-05-01T09:00:00+08:00");
        assert!(map
            .lookup(&doc("other", PathBuf::from("other.md")))
            .is_none());
    }

    #[test]
    fn test_load_map_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timestamps.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(TimestampMap::load(&path), Err(ContentError::Json(_))));
    }
}
