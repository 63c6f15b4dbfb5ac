//! Assistant message formatting.
//!
//! Assistant replies are plain text that may contain paragraph breaks and
//! Google Maps links. [`format_message`] turns such text into paragraphs made
//! of text runs and map links, leaving rendering to the caller. Text with
//! neither feature comes back untouched as [`MessageBody::Plain`].

use regex::Regex;
use std::sync::LazyLock;

/// Label shown in place of a map URL.
pub const MAP_LINK_LABEL: &str = "View location on Google Maps 📍";

const PARAGRAPH_BREAK: &str = "\n\n";

/// Sentence punctuation that ends a sentence after a URL rather than the URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

static MAP_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://www\.google\.com/maps\S*").expect("map url pattern is valid")
});

/// A map location link extracted from a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLink {
    url: String,
}

impl MapLink {
    /// The target URL, exactly as it appeared in the reply.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fixed display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        MAP_LINK_LABEL
    }
}

/// Inline run inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    MapLink(MapLink),
}

/// One paragraph of a formatted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    /// Paragraph without links.
    Text(String),
    /// Paragraph with at least one map link, in source order.
    Mixed(Vec<Span>),
}

/// A formatted assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// No paragraph breaks and no links: the text as received.
    Plain(String),
    /// Non-empty paragraphs in source order.
    Paragraphs(Vec<Paragraph>),
}

/// Formats raw assistant text for display. Pure and deterministic.
#[must_use]
pub fn format_message(raw: &str) -> MessageBody {
    if !raw.contains(PARAGRAPH_BREAK) && !MAP_URL.is_match(raw) {
        return MessageBody::Plain(raw.to_string());
    }

    let paragraphs = raw
        .split(PARAGRAPH_BREAK)
        .filter(|p| !p.trim().is_empty())
        .map(format_paragraph)
        .collect();

    MessageBody::Paragraphs(paragraphs)
}

fn format_paragraph(text: &str) -> Paragraph {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for found in MAP_URL.find_iter(text) {
        let url = found.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        push_text(&mut spans, &text[cursor..found.start()]);
        spans.push(Span::MapLink(MapLink {
            url: url.to_string(),
        }));
        // Trimmed punctuation falls into the next text run.
        cursor = found.start() + url.len();
    }

    if spans.is_empty() {
        return Paragraph::Text(text.to_string());
    }

    push_text(&mut spans, &text[cursor..]);
    Paragraph::Mixed(spans)
}

fn push_text(spans: &mut Vec<Span>, text: &str) {
    if !text.is_empty() {
        spans.push(Span::Text(text.to_string()));
    }
}
