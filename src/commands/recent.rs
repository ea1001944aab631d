//! Recently viewed posts

use anyhow::Result;

use crate::store::RecentlyViewed;
use crate::Blog;

/// List recently viewed posts, or forget them with `clear`
pub fn run(blog: &Blog, clear: bool) -> Result<()> {
    let mut store = blog.store();
    let mut recent = RecentlyViewed::load(&store, blog.config.recent_limit);

    if clear {
        recent.clear(&mut store);
        println!("Cleared recently viewed posts.");
        return Ok(());
    }

    let repo = blog.load()?;
    println!("Recently viewed ({}):", recent.ids().len());
    for id in recent.ids() {
        match repo.get(id) {
            Some(post) => println!("  {} [{}]", post.meta.title, id),
            None => tracing::debug!("Skipping recently viewed post {} that no longer exists", id),
        }
    }

    Ok(())
}
