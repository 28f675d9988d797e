//! Task Description Markdown
//!
//! pulldown-cmark with strikethrough, tables and task lists. Raw HTML in the
//! source is rendered as text and script URLs are dropped, so the output is
//! safe to set as `inner_html`.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a description to HTML
pub fn parse_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, options()).map(sanitize);
    let mut html = String::new();
    push_html(&mut html, events);
    html
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:text/html") {
        CowStr::from("#")
    } else {
        url
    }
}

/// Plain text of the first paragraph, cut at `max` chars, for card previews
pub fn excerpt(text: &str, max: usize) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) if !out.is_empty() => break,
            _ => {}
        }
    }
    let trimmed = out.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rendering() {
        let html = parse_markdown("**Scope**\n\n- [x] wireframes\n- [ ] copy\n\n~~old~~");
        assert!(html.contains("<strong>Scope</strong>"));
        assert!(html.contains("type=\"checkbox\""));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_tables() {
        let html = parse_markdown("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hi <script>alert(1)</script>\n\n<div onclick=\"x\">block</div>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div onclick"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_dropped() {
        let html = parse_markdown("[click](javascript:alert(1)) [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("# Brief\n\nmore text", 50), "Brief");
        assert_eq!(excerpt("Call the *client* about\nthe invoice", 50), "Call the client about the invoice");
        assert_eq!(excerpt("abcdefghij", 4), "abcd…");
        assert_eq!(excerpt("", 10), "");
    }
}
