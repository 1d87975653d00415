//! Task Description Markdown
//!
//! Renders descriptions with pulldown-cmark. Descriptions come from other
//! users, so raw HTML is shown as text and images collapse to their alt text.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Parse markdown into safe HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// First line of a description as plain text, for card previews
pub fn summary_line(text: &str, max_chars: usize) -> String {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let line = line.trim_start_matches(|c| c == '#' || c == '-' || c == '*' || c == '>').trim();
    if line.chars().count() > max_chars {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    } else {
        line.to_string()
    }
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
}

// State for the event transformer
#[derive(Clone, Copy)]
enum State {
    Normal,
    /// Inside an image; its alt text is kept, the tag is dropped
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Image { .. }) => state = State::InImage { depth: 0 },
                Event::Start(Tag::Link { link_type, dest_url, title, id }) if is_unsafe_url(&dest_url) => {
                    events.push(Event::Start(Tag::Link { link_type, dest_url: CowStr::from("#"), title, id }));
                }
                other => events.push(other),
            },
            State::InImage { depth } => match event {
                Event::Start(_) => state = State::InImage { depth: depth + 1 },
                Event::End(TagEnd::Image) if depth == 0 => state = State::Normal,
                Event::End(_) => state = State::InImage { depth: depth.saturating_sub(1) },
                Event::Text(alt) => events.push(Event::Text(alt)),
                _ => {}
            },
        }
    }

    events
}

fn is_unsafe_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = parse_markdown("**bold** and ~~gone~~");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = parse_markdown("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn images_keep_alt_text_only() {
        let html = parse_markdown("see ![diagram](http://x/y.png) here");
        assert!(!html.contains("<img"));
        assert!(html.contains("diagram"));
    }

    #[test]
    fn script_links_are_neutralised() {
        let html = parse_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn summary_takes_first_non_empty_line() {
        assert_eq!(summary_line("\n\n## Goal\nmore", 40), "Goal");
        assert_eq!(summary_line("abcdefghij", 4), "abcd…");
        assert_eq!(summary_line("", 10), "");
    }
}
