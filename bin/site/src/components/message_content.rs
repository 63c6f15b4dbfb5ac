//! Rendering of formatted assistant replies.

use excursions_conversation::{MessageBody, Paragraph, Span, format_message};
use leptos::prelude::*;

/// Renders an assistant reply, turning paragraph breaks into `<p>` blocks
/// and map URLs into links that open in a new tab.
#[component]
pub fn MessageContent(text: String) -> impl IntoView {
    match format_message(&text) {
        MessageBody::Plain(text) => text.into_any(),
        MessageBody::Paragraphs(paragraphs) => paragraphs
            .into_iter()
            .map(|paragraph| {
                view! { <p class="chat-paragraph">{paragraph_view(paragraph)}</p> }
            })
            .collect_view()
            .into_any(),
    }
}

fn paragraph_view(paragraph: Paragraph) -> AnyView {
    match paragraph {
        Paragraph::Text(text) => text.into_any(),
        Paragraph::Mixed(spans) => spans.into_iter().map(span_view).collect_view().into_any(),
    }
}

fn span_view(span: Span) -> AnyView {
    match span {
        Span::Text(text) => text.into_any(),
        Span::MapLink(link) => view! {
            <a
                class="map-link"
                href=link.url().to_string()
                target="_blank"
                rel="noopener noreferrer"
            >
                {link.label()}
            </a>
        }
        .into_any(),
    }
}
