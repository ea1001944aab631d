//! List site content

use anyhow::Result;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let repo = blog.load()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", repo.len());
            for post in repo.posts() {
                let date = if post.meta.date.is_empty() {
                    "----------"
                } else {
                    post.meta.date.as_str()
                };
                let featured = if post.meta.featured { " *" } else { "" };
                println!(
                    "  {} - {} [{}] ({} min){}",
                    date, post.meta.title, post.meta.id, post.meta.reading_time, featured
                );
            }
        }
        "tag" | "tags" => {
            let tags = repo.tags();
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = repo.categories();
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        "archive" | "archives" => {
            let archives = repo.archives();
            println!("Archives ({}):", archives.len());
            for (month, count) in archives {
                println!("  {} ({})", month, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, archive",
                content_type
            );
        }
    }

    Ok(())
}
