//! RSS 2.0 feed

use chrono::Utc;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{article_url, date_rfc2822, escape_xml, strip_invalid_xml_chars};

/// Render an RSS 2.0 document with one item per post, newest first
pub fn render_rss(config: &SiteConfig, posts: &[Post]) -> String {
    let mut items: Vec<&Post> = posts.iter().collect();
    // Stable: undated posts keep repository order at the end
    items.sort_by(|a, b| match (a.published, b.published) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", text(&config.title)));
    feed.push_str(&format!(
        "    <link>{}/</link>\n",
        text(config.url.trim_end_matches('/'))
    ));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        text(&config.description)
    ));
    if !config.language.is_empty() {
        feed.push_str(&format!("    <language>{}</language>\n", text(&config.language)));
    }
    feed.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        Utc::now().to_rfc2822()
    ));

    for post in items {
        let link = text(&article_url(config, &post.meta.id));

        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", text(&post.meta.title)));
        feed.push_str(&format!("      <link>{}</link>\n", link));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        if let Some(published) = &post.published {
            feed.push_str(&format!(
                "      <pubDate>{}</pubDate>\n",
                date_rfc2822(published)
            ));
        }
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            text(&post.meta.description)
        ));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}

fn text(s: &str) -> String {
    escape_xml(&strip_invalid_xml_chars(s))
}
