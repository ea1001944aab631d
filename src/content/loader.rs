//! Content loader - loads posts from the posts directory

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::meta::MetaSynthesizer;
use super::timestamps::TimestampSource;
use super::toc::index_headings;
use super::{Document, FrontMatter, MarkdownRenderer, Post, PostRepository};
use crate::config::SiteConfig;
use crate::error::ContentError;

/// Runs every markdown document through parse, render, heading index and
/// metadata synthesis
pub struct ContentLoader {
    renderer: MarkdownRenderer,
    synthesizer: MetaSynthesizer,
    timestamps: Box<dyn TimestampSource>,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(config: &SiteConfig, timestamps: Box<dyn TimestampSource>) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            synthesizer: MetaSynthesizer::new(config),
            timestamps,
        }
    }

    /// Load every post in `posts_dir` into a sorted repository
    pub fn load_repository(&self, posts_dir: &Path) -> Result<PostRepository, ContentError> {
        let posts = self.load_posts(posts_dir)?;
        PostRepository::from_posts(posts)
    }

    /// Load all posts directly inside `posts_dir`, in file name order
    pub fn load_posts(&self, posts_dir: &Path) -> Result<Vec<Post>, ContentError> {
        if !posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true)
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", posts_dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match Self::read_document(path) {
                Ok(doc) => {
                    let post = self.build_post(&doc);
                    tracing::debug!("Loaded post {} from {:?}", post.meta.id, path);
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        Ok(posts)
    }

    /// Read a single source file
    pub fn read_document(path: &Path) -> Result<Document, ContentError> {
        let raw = fs::read_to_string(path)?;
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Document {
            id,
            path: path.to_path_buf(),
            raw,
        })
    }

    /// Turn a document into a post
    pub fn build_post(&self, doc: &Document) -> Post {
        let (fm, body) = FrontMatter::parse(&doc.raw);

        let html = self.renderer.render(body);
        let (content, _) = index_headings(&html);

        let stamps = self.timestamps.lookup(doc);
        let synthesized = self.synthesizer.synthesize(doc, &fm, body, stamps.as_ref());

        Post {
            meta: synthesized.meta,
            content,
            raw: body.to_string(),
            published: synthesized.published,
            source: doc.path.clone(),
        }
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
