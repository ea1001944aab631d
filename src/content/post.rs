//! Document, post and metadata models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::toc::{index_headings, TocItem};

/// A raw markdown source file
#[derive(Debug, Clone)]
pub struct Document {
    /// File stem, used as the post id unless front-matter overrides it
    pub id: String,
    /// Full source file path
    pub path: PathBuf,
    /// File contents, front-matter included
    pub raw: String,
}

/// Resolved metadata of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// Unique post id
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date (`YYYY-MM-DD`, or empty when unknown)
    pub date: String,

    /// Last updated date (`YYYY-MM-DD`, or empty when unknown)
    pub updated_at: String,

    pub category: String,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    pub description: String,

    /// Estimated reading time in minutes, at least 1
    pub reading_time: u32,

    pub featured: bool,
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub meta: PostMeta,

    /// Rendered HTML, headings carrying anchor ids
    pub content: String,

    /// Markdown body without front-matter
    pub raw: String,

    /// Resolved publish instant, used for feed ordering
    #[serde(skip)]
    pub published: Option<DateTime<FixedOffset>>,

    /// Full source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Table of contents of the rendered content
    pub fn toc(&self) -> Vec<TocItem> {
        index_headings(&self.content).1
    }

    /// Whether a lower-cased needle occurs in any searchable field
    pub fn matches(&self, needle: &str) -> bool {
        let meta = &self.meta;
        meta.title.to_lowercase().contains(needle)
            || meta.description.to_lowercase().contains(needle)
            || meta.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || meta.category.to_lowercase().contains(needle)
            || self.raw.to_lowercase().contains(needle)
    }

    /// Calendar month of the publish date (its first 7 characters), if dated
    pub fn month(&self) -> Option<String> {
        if self.meta.date.is_empty() {
            return None;
        }
        Some(self.meta.date.chars().take(7).collect())
    }
}
