//! Show a single post

use anyhow::Result;

use crate::store::RecentlyViewed;
use crate::Blog;

/// Number of related posts listed under an article
const RELATED_LIMIT: usize = 4;

/// Print a post's metadata and table of contents, and record the view
pub fn run(blog: &Blog, id: &str) -> Result<()> {
    let repo = blog.load()?;

    let Some(post) = repo.get(id) else {
        println!("Post not found: {}", id);
        return Ok(());
    };

    let meta = &post.meta;
    println!("{}", meta.title);
    println!("  id:        {}", meta.id);
    println!("  date:      {}", meta.date);
    println!("  updated:   {}", meta.updated_at);
    println!("  category:  {}", meta.category);
    println!("  tags:      {}", meta.tags.join(", "));
    println!("  reading:   {} min", meta.reading_time);
    println!("  summary:   {}", meta.description);

    let toc = post.toc();
    if !toc.is_empty() {
        println!("Contents:");
        for item in toc {
            let indent = if item.level == 3 { "    " } else { "  " };
            println!("{}{} (#{})", indent, item.title, item.id);
        }
    }

    let related = repo.related(id, RELATED_LIMIT);
    if !related.is_empty() {
        println!("Related:");
        for other in related {
            println!("  {} [{}]", other.meta.title, other.meta.id);
        }
    }

    let mut store = blog.store();
    let mut recent = RecentlyViewed::load(&store, blog.config.recent_limit);
    recent.visit(&meta.id);
    recent.save(&mut store);

    Ok(())
}
