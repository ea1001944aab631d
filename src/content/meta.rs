//! Filling in post metadata from front-matter and the body

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

use super::timestamps::Timestamps;
use super::{Document, FrontMatter, FrontValue, PostMeta};
use crate::config::SiteConfig;
use crate::helpers::{format_ymd, parse_date_string, truncate};

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]*`").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref MARKDOWN_PUNCT: Regex = Regex::new(r"[#>*_|~-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref READING_PUNCT: Regex = Regex::new(r"[#*`\[\]()!<>]").unwrap();
}

const OMISSION: &str = "...";

/// Metadata plus the instant the post counts as published
#[derive(Debug, Clone)]
pub struct Synthesized {
    pub meta: PostMeta,
    pub published: Option<DateTime<FixedOffset>>,
}

/// Resolves every [`PostMeta`] field: explicit front-matter first, then
/// derived values, then defaults. Descriptions and dates are the exceptions,
/// where the derived value wins.
#[derive(Debug, Clone)]
pub struct MetaSynthesizer {
    default_category: String,
    description_length: usize,
    reading_speed: usize,
}

impl MetaSynthesizer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            default_category: config.default_category.clone(),
            description_length: config.description_length,
            reading_speed: config.reading_speed.max(1),
        }
    }

    pub fn synthesize(
        &self,
        doc: &Document,
        fm: &FrontMatter,
        body: &str,
        timestamps: Option<&Timestamps>,
    ) -> Synthesized {
        let id = fm.text_field("id").unwrap_or_else(|| doc.id.clone());
        let title = fm.text_field("title").unwrap_or_else(|| doc.id.clone());

        let date = timestamps
            .map(|t| format_ymd(&t.created))
            .or_else(|| fm.text_field("date"))
            .unwrap_or_default();

        let updated_at = timestamps
            .map(|t| format_ymd(&t.updated))
            .or_else(|| fm.text_field("updated"))
            .unwrap_or_else(|| date.clone());

        let published = timestamps
            .map(|t| t.created)
            .or_else(|| fm.text_field("date").and_then(|d| parse_date_string(&d)));

        let category = fm
            .text_field("category")
            .unwrap_or_else(|| self.default_category.clone());

        let tags = fm
            .get("tags")
            .and_then(FrontValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let generated = self.generate_description(body);
        let description = if generated.is_empty() {
            fm.text_field("description").unwrap_or_default()
        } else {
            generated
        };

        let reading_time = fm
            .get("readingTime")
            .and_then(FrontValue::as_int)
            .filter(|n| *n > 0)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or_else(|| self.estimate_reading_time(body));

        let featured = fm
            .get("featured")
            .and_then(FrontValue::as_bool)
            .unwrap_or(false);

        Synthesized {
            meta: PostMeta {
                id,
                title,
                date,
                updated_at,
                category,
                tags,
                description,
                reading_time,
                featured,
            },
            published,
        }
    }

    /// Plain-text summary of the body, cut to the configured length
    pub fn generate_description(&self, markdown: &str) -> String {
        let plain = markdown_to_plain_text(markdown);
        truncate(&plain, self.description_length, OMISSION)
    }

    /// Minutes to read, counting characters of prose (code blocks excluded)
    pub fn estimate_reading_time(&self, markdown: &str) -> u32 {
        let stripped = FENCED_CODE.replace_all(markdown, "");
        let stripped = READING_PUNCT.replace_all(&stripped, "");
        let chars = stripped.chars().count();
        let minutes = chars.div_ceil(self.reading_speed).max(1);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

/// Reduce markdown to a single line of prose
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let text = FENCED_CODE.replace_all(markdown, " ");
    let text = INLINE_CODE.replace_all(&text, " ");
    let text = IMAGE.replace_all(&text, " ");
    let text = LINK.replace_all(&text, "$1");
    let text = HTML_TAG.replace_all(&text, " ");
    let text = MARKDOWN_PUNCT.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn synthesizer() -> MetaSynthesizer {
        MetaSynthesizer::new(&SiteConfig::default())
    }

    fn doc(id: &str) -> Document {
        Document {
            id: id.to_string(),
            path: PathBuf::from(format!("{}.md", id)),
            raw: String::new(),
        }
    }

    fn stamps(created: &str, updated: &str) -> Timestamps {
        Timestamps {
            created: DateTime::parse_from_rfc3339(created).unwrap(),
            updated: DateTime::parse_from_rfc3339(updated).unwrap(),
        }
    }

    #[test]
    fn test_defaults_without_frontmatter() {
        let out = synthesizer().synthesize(&doc("hello"), &FrontMatter::default(), "", None);
        let meta = out.meta;
        assert_eq!(meta.id, "hello");
        assert_eq!(meta.title, "hello");
        assert_eq!(meta.date, "");
        assert_eq!(meta.updated_at, "");
        assert_eq!(meta.category, "uncategorized");
        assert!(meta.tags.is_empty());
        assert_eq!(meta.description, "");
        assert_eq!(meta.reading_time, 1);
        assert!(!meta.featured);
        assert!(out.published.is_none());
    }

    #[test]
    fn test_explicit_frontmatter() {
        let (fm, body) = FrontMatter::parse(
            "---\nid: custom-id\ntitle: UART 与 DMA\ndate: 2024-03-09\ncategory: 通信协议\ntags: [uart, dma]\nreadingTime: 7\nfeatured: true\n---\nSome body",
        );
        let out = synthesizer().synthesize(&doc("file-stem"), &fm, body, None);
        let meta = out.meta;
        assert_eq!(meta.id, "custom-id");
        assert_eq!(meta.title, "UART 与 DMA");
        assert_eq!(meta.date, "2024-03-09");
        assert_eq!(meta.updated_at, "2024-03-09");
        assert_eq!(meta.category, "通信协议");
        assert_eq!(meta.tags, vec!["uart", "dma"]);
        assert_eq!(meta.reading_time, 7);
        assert!(meta.featured);
        assert_eq!(format_ymd(&out.published.unwrap()), "2024-03-09");
    }

    #[test]
    fn test_numeric_id() {
        let (fm, body) = FrontMatter::parse("---\nid: 1024\n---\nbody");
        let out = synthesizer().synthesize(&doc("stem"), &fm, body, None);
        assert_eq!(out.meta.id, "1024");
    }

    #[test]
    fn test_timestamps_win_over_frontmatter_date() {
        let (fm, body) = FrontMatter::parse("---\ndate: 2020-01-01\n---\nbody");
        let ts = stamps("2024-05-01T12:00:00+00:00", "2024-06-02T12:00:00+00:00");
        let out = synthesizer().synthesize(&doc("a"), &fm, body, Some(&ts));
        assert_eq!(out.meta.date, "2024-05-01");
        assert_eq!(out.meta.updated_at, "2024-06-02");
        assert_eq!(out.published, Some(ts.created));
    }

    #[test]
    fn test_unparseable_date_kept_as_text() {
        let (fm, body) = FrontMatter::parse("---\ndate: someday\n---\nbody");
        let out = synthesizer().synthesize(&doc("a"), &fm, body, None);
        assert_eq!(out.meta.date, "someday");
        assert!(out.published.is_none());
    }

    #[test]
    fn test_generated_description_beats_frontmatter() {
        let (fm, body) = FrontMatter::parse(
            "---\ndescription: Stale hand-written summary\n---\n## Intro\n\nSee [the docs](https://x.io) for **details**.",
        );
        let out = synthesizer().synthesize(&doc("a"), &fm, body, None);
        assert_eq!(out.meta.description, "Intro See the docs for details .");
    }

    #[test]
    fn test_description_falls_back_when_body_empty() {
        let (fm, body) = FrontMatter::parse(
            "---\ndescription: Only code here\n---\n```c\nint main(void) {}\n```",
        );
        let out = synthesizer().synthesize(&doc("a"), &fm, body, None);
        assert_eq!(out.meta.description, "Only code here");
    }

    #[test]
    fn test_description_truncated_by_chars() {
        let body = "嵌".repeat(60);
        let description = synthesizer().generate_description(&body);
        assert_eq!(description, format!("{}...", "嵌".repeat(50)));
    }

    #[test]
    fn test_markdown_to_plain_text() {
        let md = "# Title\n\n![img](a.png) Use `gpio_set()` and <b>bold</b>\n\n```\ncode\n```\n- item | cell ~x~";
        assert_eq!(markdown_to_plain_text(md), "Title Use and bold item cell x");
    }

    #[test]
    fn test_reading_time() {
        let s = synthesizer();
        assert_eq!(s.estimate_reading_time(""), 1);
        assert_eq!(s.estimate_reading_time(&"字".repeat(400)), 1);
        assert_eq!(s.estimate_reading_time(&"字".repeat(401)), 2);

        let with_code = format!("{}\n```\n{}\n```", "字".repeat(399), "x".repeat(5000));
        assert_eq!(s.estimate_reading_time(&with_code), 1);

        let punct = format!("{}{}", "字".repeat(400), "#*`[]()!<>".repeat(100));
        assert_eq!(s.estimate_reading_time(&punct), 1);
    }

    #[test]
    fn test_zero_reading_time_is_estimated() {
        let (fm, body) = FrontMatter::parse("---\nreadingTime: 0\n---\nshort");
        let out = synthesizer().synthesize(&doc("a"), &fm, body, None);
        assert_eq!(out.meta.reading_time, 1);
    }

    #[test]
    fn test_tags_must_be_list() {
        let (fm, body) = FrontMatter::parse("---\ntags: single\n---\nbody");
        let out = synthesizer().synthesize(&doc("a"), &fm, body, None);
        assert!(out.meta.tags.is_empty());
    }
}
