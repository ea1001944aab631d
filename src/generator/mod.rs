//! Generator module - writes the build artifacts consumed by the front-end

mod feed;

pub use feed::render_rss;

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::{Post, PostRepository};
use crate::helpers::article_route;
use crate::Blog;

/// Post list consumed by the single-page app
pub const POSTS_FILE: &str = "posts.json";
/// Compact search data
pub const SEARCH_FILE: &str = "search.json";
/// RSS 2.0 feed
pub const FEED_FILE: &str = "feed.xml";

/// One row of `search.json`
#[derive(Debug, Serialize)]
struct SearchEntry<'a> {
    id: &'a str,
    title: &'a str,
    url: String,
    description: &'a str,
    category: &'a str,
    tags: &'a [String],
    date: &'a str,
}

impl<'a> From<&'a Post> for SearchEntry<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: &post.meta.id,
            title: &post.meta.title,
            url: article_route(&post.meta.id),
            description: &post.meta.description,
            category: &post.meta.category,
            tags: &post.meta.tags,
            date: &post.meta.date,
        }
    }
}

/// Writes `posts.json`, `search.json` and `feed.xml` into the public directory
pub struct Generator {
    config: SiteConfig,
    public_dir: PathBuf,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self {
            config: blog.config.clone(),
            public_dir: blog.public_dir.clone(),
        }
    }

    /// Generate every artifact
    pub fn generate(&self, repo: &PostRepository) -> Result<()> {
        fs::create_dir_all(&self.public_dir)?;

        self.generate_posts(repo)?;
        self.generate_search_index(repo)?;
        self.generate_feed(repo)?;

        Ok(())
    }

    /// Generate the full post list (JSON)
    fn generate_posts(&self, repo: &PostRepository) -> Result<()> {
        let json = serde_json::to_string(repo.posts())?;
        fs::write(self.public_dir.join(POSTS_FILE), json)?;
        tracing::info!("Generated {}", POSTS_FILE);
        Ok(())
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, repo: &PostRepository) -> Result<()> {
        let entries: Vec<SearchEntry> = repo.posts().iter().map(SearchEntry::from).collect();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(self.public_dir.join(SEARCH_FILE), json)?;
        tracing::info!("Generated {}", SEARCH_FILE);
        Ok(())
    }

    /// Generate RSS feed
    fn generate_feed(&self, repo: &PostRepository) -> Result<()> {
        let rss = render_rss(&self.config, repo.posts());
        fs::write(self.public_dir.join(FEED_FILE), rss)?;
        tracing::info!("Generated {}", FEED_FILE);
        Ok(())
    }
}
