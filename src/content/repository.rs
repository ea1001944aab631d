//! The sorted, read-only collection of loaded posts

use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

use super::search::{search, SearchResults};
use super::Post;
use crate::error::ContentError;

/// All posts, newest first
#[derive(Debug, Clone, Default)]
pub struct PostRepository {
    posts: Vec<Post>,
}

impl PostRepository {
    /// Build a repository, rejecting duplicate ids
    ///
    /// Posts are stable-sorted by date string, descending, so posts sharing a
    /// date keep their load order and undated posts go last.
    pub fn from_posts(mut posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for post in &posts {
            if let Some(first) = seen.insert(&post.meta.id, &post.source) {
                return Err(ContentError::DuplicateId {
                    id: post.meta.id.clone(),
                    first: first.to_path_buf(),
                    second: post.source.clone(),
                });
            }
        }

        posts.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
        tracing::info!("Loaded {} posts", posts.len());

        Ok(Self { posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find a post by id
    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.meta.id == id)
    }

    /// Post counts per category, in order of first appearance
    pub fn categories(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            *counts.entry(post.meta.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Post counts per tag, in order of first appearance
    pub fn tags(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            for tag in &post.meta.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Post counts per `YYYY-MM`, newest month first. Undated posts are left out.
    pub fn archives(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            if let Some(month) = post.month() {
                *counts.entry(month).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.meta.category == category)
            .collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.meta.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn featured(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.meta.featured).collect()
    }

    /// Up to `limit` other posts in the same category
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Post> {
        let Some(post) = self.get(id) else {
            return Vec::new();
        };
        self.posts
            .iter()
            .filter(|p| p.meta.id != id && p.meta.category == post.meta.category)
            .take(limit)
            .collect()
    }

    /// The next newer post
    pub fn prev(&self, id: &str) -> Option<&Post> {
        let pos = self.position(id)?;
        if pos > 0 {
            self.posts.get(pos - 1)
        } else {
            None
        }
    }

    /// The next older post
    pub fn next(&self, id: &str) -> Option<&Post> {
        let pos = self.position(id)?;
        self.posts.get(pos + 1)
    }

    /// Case-insensitive substring search, see [`SearchResults`]
    pub fn search(&self, query: &str) -> SearchResults<'_> {
        search(&self.posts, query)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.meta.id == id)
    }
}
