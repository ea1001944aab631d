//! Local key/value store for reader state
//!
//! Holds the "recently viewed" list and the theme preference in a single JSON
//! file. Storage is best effort: a missing, unreadable or malformed file reads
//! as empty, and failed writes are logged and otherwise ignored.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the recently viewed post ids
pub const RECENT_POSTS_KEY: &str = "bad-lemon.recentPosts";

/// Key of the theme preference
pub const THEME_KEY: &str = "theme";

/// Default length of the recently viewed list
pub const DEFAULT_RECENT_LIMIT: usize = 8;

/// JSON-file backed key/value store
#[derive(Debug, Clone)]
pub struct KvStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl KvStore {
    /// Load the store from disk, or start empty
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring malformed store {:?}: {}", path, e);
                    Map::new()
                }
            },
            Err(e) => {
                tracing::debug!("No store at {:?}: {}", path, e);
                Map::new()
            }
        };
        Self { path, entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Write the store to disk. Returns whether the write succeeded.
    pub fn save(&self) -> bool {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&self.entries)?;
            fs::write(&self.path, content)
        };

        match write() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save store {:?}: {}", self.path, e);
                false
            }
        }
    }

    /// Drop every entry and delete the backing file
    pub fn clear(&mut self) {
        self.entries.clear();
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                tracing::warn!("Failed to remove store {:?}: {}", self.path, e);
            }
        }
    }
}

/// Recently viewed post ids, most recent first, without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentlyViewed {
    ids: Vec<String>,
    limit: usize,
}

impl RecentlyViewed {
    pub fn new(limit: usize) -> Self {
        Self {
            ids: Vec::new(),
            limit,
        }
    }

    /// Read the list from a store; anything that is not a string is dropped
    pub fn load(store: &KvStore, limit: usize) -> Self {
        let mut ids: Vec<String> = Vec::new();
        if let Some(Value::Array(items)) = store.get(RECENT_POSTS_KEY) {
            for id in items.iter().filter_map(Value::as_str) {
                if !ids.iter().any(|existing| existing == id) {
                    ids.push(id.to_string());
                }
            }
        }
        ids.truncate(limit);
        Self { ids, limit }
    }

    /// Record a view of `id`, moving it to the front
    pub fn visit(&mut self, id: &str) {
        self.ids.retain(|existing| existing != id);
        self.ids.insert(0, id.to_string());
        self.ids.truncate(self.limit);
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn save(&self, store: &mut KvStore) -> bool {
        store.set(
            RECENT_POSTS_KEY,
            Value::Array(self.ids.iter().cloned().map(Value::String).collect()),
        );
        store.save()
    }

    pub fn clear(&mut self, store: &mut KvStore) -> bool {
        self.ids.clear();
        store.remove(RECENT_POSTS_KEY);
        store.save()
    }
}

impl Default for RecentlyViewed {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

/// Light or dark color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Stored preference, light when unset or unrecognized
    pub fn load(store: &KvStore) -> Self {
        store
            .get(THEME_KEY)
            .and_then(Value::as_str)
            .and_then(Self::parse)
            .unwrap_or_default()
    }

    pub fn save(self, store: &mut KvStore) -> bool {
        store.set(THEME_KEY, Value::String(self.as_str().to_string()));
        store.save()
    }
}
