//! Search posts from the command line

use anyhow::Result;

use crate::content::SearchResults;
use crate::Blog;

/// Print posts matching `query`
pub fn run(blog: &Blog, query: &str) -> Result<()> {
    let repo = blog.load()?;

    match repo.search(query) {
        SearchResults::Idle => {
            println!("Enter a search term.");
        }
        SearchResults::Hits(posts) if posts.is_empty() => {
            println!("No posts match {:?}.", query.trim());
        }
        SearchResults::Hits(posts) => {
            println!("Results ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.meta.date, post.meta.title, post.meta.id);
            }
        }
    }

    Ok(())
}
