//! Section heading ids and table of contents

use serde::{Deserialize, Serialize};

use crate::helpers::strip_html;

/// One entry of a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    /// Anchor id injected onto the heading
    pub id: String,
    /// Heading text with inline markup removed
    pub title: String,
    /// 2 or 3
    pub level: u8,
}

/// Give every `<h2>`/`<h3>` in `html` an `id` and collect them in document order.
///
/// Any attributes already present on the opening tag are replaced, so running
/// this over its own output yields the same html and items.
pub fn index_headings(html: &str) -> (String, Vec<TocItem>) {
    let mut out = String::with_capacity(html.len() + 64);
    let mut toc: Vec<TocItem> = Vec::new();

    let mut copied = 0;
    let mut cursor = 0;

    while let Some(rel) = html[cursor..].find('<') {
        let start = cursor + rel;
        let Some(heading) = match_heading(html, start) else {
            cursor = start + 1;
            continue;
        };

        let inner = &html[heading.inner_start..heading.inner_end];
        let title = strip_html(inner).trim().to_string();
        let mut id = slugify(&title);
        if id.is_empty() {
            id = format!("heading-{}", toc.len());
        }

        out.push_str(&html[copied..start]);
        out.push_str(&format!(
            r#"<h{level} id="{id}">{inner}</h{level}>"#,
            level = heading.level,
            id = id,
            inner = inner
        ));

        toc.push(TocItem {
            id,
            title,
            level: heading.level,
        });

        copied = heading.end;
        cursor = heading.end;
    }

    out.push_str(&html[copied..]);
    (out, toc)
}

/// Anchor id for a heading's display text.
///
/// Whitespace runs become `-`, then everything except ASCII word characters,
/// `-` and CJK unified ideographs is dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;

        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_cjk(c) {
            slug.push(c.to_ascii_lowercase());
        }
    }

    slug
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

struct HeadingMatch {
    level: u8,
    inner_start: usize,
    inner_end: usize,
    end: usize,
}

/// Match `<h2 ...>inner</h2>` (or h3, any case) starting at byte `start`
fn match_heading(html: &str, start: usize) -> Option<HeadingMatch> {
    let bytes = html.as_bytes();
    if !matches!(bytes.get(start + 1), Some(b'h' | b'H')) {
        return None;
    }
    let level = match bytes.get(start + 2) {
        Some(b'2') => 2,
        Some(b'3') => 3,
        _ => return None,
    };
    match bytes.get(start + 3) {
        Some(b'>') => {}
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let inner_start = start + 3 + html[start + 3..].find('>')? + 1;
    let closing = format!("</h{}>", level);
    let inner_end = inner_start + find_ignore_case(&html[inner_start..], &closing)?;

    Some(HeadingMatch {
        level,
        inner_start,
        inner_end,
        end: inner_end + closing.len(),
    })
}

/// Byte offset of an ASCII `needle` in `haystack`, ignoring case
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getting_started() {
        let (html, toc) = index_headings("<h2>Getting Started</h2>\n<p>...</p>\n");
        assert_eq!(
            toc,
            vec![TocItem {
                id: "getting-started".to_string(),
                title: "Getting Started".to_string(),
                level: 2,
            }]
        );
        assert_eq!(html, "<h2 id=\"getting-started\">Getting Started</h2>\n<p>...</p>\n");
    }

    #[test]
    fn test_only_levels_two_and_three() {
        let html = "<h1>Title</h1><h2>A</h2><h3>B</h3><h4>C</h4>";
        let (out, toc) = index_headings(html);
        let levels: Vec<u8> = toc.iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![2, 3]);
        assert!(out.contains("<h1>Title</h1>"));
        assert!(out.contains("<h4>C</h4>"));
    }

    #[test]
    fn test_strips_markup_and_replaces_attributes() {
        let html = r#"<H3 class="x">Using <code>malloc()</code> &amp; <em>free</em></H3>"#;
        let (out, toc) = index_headings(html);
        assert_eq!(toc[0].title, "Using malloc() &amp; free");
        assert_eq!(toc[0].id, "using-malloc-amp-free");
        assert_eq!(
            out,
            r#"<h3 id="using-malloc-amp-free">Using <code>malloc()</code> &amp; <em>free</em></h3>"#
        );
    }

    #[test]
    fn test_cjk_slug() {
        let (_, toc) = index_headings("<h2>第一章：GPIO 配置</h2>");
        assert_eq!(toc[0].id, "第一章gpio-配置");
        assert_eq!(toc[0].title, "第一章：GPIO 配置");
    }

    #[test]
    fn test_empty_slug_falls_back_to_index() {
        let (out, toc) = index_headings("<h2>Intro</h2><h2>!!!</h2><h3>？？</h3>");
        assert_eq!(toc[1].id, "heading-1");
        assert_eq!(toc[2].id, "heading-2");
        assert!(out.contains(r#"<h2 id="heading-1">!!!</h2>"#));
    }

    #[test]
    fn test_collisions_are_not_deduplicated() {
        let (_, toc) = index_headings("<h2>Setup</h2><h3>Setup</h3>");
        assert_eq!(toc[0].id, "setup");
        assert_eq!(toc[1].id, "setup");
    }

    #[test]
    fn test_idempotent() {
        let html = "<h2>One Two</h2><p>x</p><h3 data-x=\"1\">Three</h3><h2>中文</h2>";
        let (first_html, first_toc) = index_headings(html);
        let (second_html, second_toc) = index_headings(&first_html);
        assert_eq!(first_toc, second_toc);
        assert_eq!(first_html, second_html);
    }

    #[test]
    fn test_unclosed_heading_left_alone() {
        let html = "<h2>Broken <p>text</p>";
        let (out, toc) = index_headings(html);
        assert!(toc.is_empty());
        assert_eq!(out, html);
    }

    #[test]
    fn test_slugify_whitespace_runs() {
        assert_eq!(slugify("a \t b"), "a-b");
        assert_eq!(slugify("a & b"), "a--b");
        assert_eq!(slugify("Hello_World-2"), "hello_world-2");
    }
}
