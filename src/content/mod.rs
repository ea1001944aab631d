//! Content module - parses markdown posts into the post repository

mod frontmatter;
pub mod loader;
mod markdown;
pub mod meta;
mod post;
mod repository;
mod search;
pub mod timestamps;
pub mod toc;

pub use frontmatter::{FrontMatter, FrontValue};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Document, Post, PostMeta};
pub use repository::PostRepository;
pub use search::{search, SearchResults};
pub use timestamps::{MtimeSource, NoTimestamps, TimestampMap, TimestampSource, Timestamps};
pub use toc::{index_headings, TocItem};
