//! Markdown rendering with lazy-loading images

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::helpers::escape_attr;

/// Markdown to HTML renderer
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        // Front-matter is split off before rendering, so no YAML metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        Self { options }
    }

    /// Render markdown to HTML
    ///
    /// Never fails: anything the parser does not recognize comes out as text.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        let mut image: Option<PendingImage> = None;

        for event in parser {
            if let Some(pending) = image.as_mut() {
                if !pending.absorb(&event) {
                    if let Some(done) = image.take() {
                        events.push(Event::InlineHtml(CowStr::from(done.to_html())));
                    }
                }
                continue;
            }

            match event {
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some(PendingImage {
                        src: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                        depth: 0,
                    });
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// An image whose alt text is still being collected
struct PendingImage {
    src: String,
    title: String,
    alt: String,
    depth: usize,
}

impl PendingImage {
    /// Feed an event from inside the image. Returns false on the closing tag.
    fn absorb(&mut self, event: &Event) -> bool {
        match event {
            Event::Start(Tag::Image { .. }) => self.depth += 1,
            Event::End(TagEnd::Image) => {
                if self.depth == 0 {
                    return false;
                }
                self.depth -= 1;
            }
            Event::Text(text) | Event::Code(text) => self.alt.push_str(text),
            Event::SoftBreak | Event::HardBreak => self.alt.push(' '),
            _ => {}
        }
        true
    }

    fn to_html(&self) -> String {
        let referrer = if is_absolute_http(&self.src) {
            r#" referrerpolicy="no-referrer""#
        } else {
            ""
        };
        let title = if self.title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_attr(&self.title))
        };

        format!(
            r#"<img src="{}" alt="{}" loading="lazy" decoding="async"{}{} />"#,
            escape_attr(&self.src),
            escape_attr(&self.alt),
            referrer,
            title
        )
    }
}

fn is_absolute_http(src: &str) -> bool {
    let lower = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello\nWorld");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn test_render_table_and_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n```c\nint x = 1 < 2;\n```");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains(r#"<code class="language-c">"#));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_local_image() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![板子 \"照片\"](/img/board.png)");
        assert!(html.contains(
            r#"<img src="/img/board.png" alt="板子 &quot;照片&quot;" loading="lazy" decoding="async" />"#
        ));
        assert!(!html.contains("referrerpolicy"));
        assert!(!html.contains("title="));
    }

    #[test]
    fn test_remote_image_with_title() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(r#"![logo](HTTPS://cdn.example.com/a.png?x=1&y=2 "The <logo>")"#);
        assert!(html.contains(r#"src="HTTPS://cdn.example.com/a.png?x=1&amp;y=2""#));
        assert!(html.contains(r#" referrerpolicy="no-referrer""#));
        assert!(html.contains(r#" title="The &lt;logo&gt;" />"#));
    }

    #[test]
    fn test_image_alt_flattens_markup() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![an *emphasized* `code` alt](x.png)");
        assert!(html.contains(r#"alt="an emphasized code alt""#));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_malformed_markdown_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[unclosed link(foo\n\n**not bold");
        assert!(html.contains("[unclosed link(foo"));
        assert!(html.contains("**not bold"));
    }
}
