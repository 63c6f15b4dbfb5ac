//! Floating assistant chat widget.
//!
//! The widget keeps its whole conversation in one `RwSignal`, read through
//! per-field memos, and drives each turn in two steps: `begin_turn` runs
//! synchronously in the submit handler, the backend call runs in
//! `spawn_local`, and `complete_turn` applies the reply when it arrives. Session id and context are restored from
//! `localStorage` once the widget is mounted in the browser.

use crate::components::MessageContent;
use crate::endpoint::get_chat_endpoint;
use crate::storage::BrowserStorage;
use excursions_conversation::{
    ChatBackend, ConversationState, HttpChatBackend, Message, TransportError,
};
use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Chat launcher button and conversation window.
#[component]
pub fn ChatBubble() -> impl IntoView {
    let endpoint = Resource::new(|| (), |_| get_chat_endpoint());
    let conversation = RwSignal::new(ConversationState::new());
    let (is_open, set_open) = signal(false);
    let messages_ref = NodeRef::<html::Div>::new();

    // Effects only run in the browser, so this is the mount-time restore.
    Effect::new(move |_| {
        conversation.update(|state| state.initialize(&BrowserStorage));
    });

    // Views read through memos so a keystroke in the draft only touches the input.
    let messages = Memo::new(move |_| conversation.with(|state| state.messages().to_vec()));
    let draft = Memo::new(move |_| conversation.with(|state| state.draft().to_string()));
    let language = Memo::new(move |_| {
        conversation.with(|state| state.language().map(str::to_string))
    });
    let is_pending = Memo::new(move |_| conversation.with(ConversationState::is_pending));

    // Keep the newest message in view.
    Effect::new(move |_| {
        messages.track();
        is_pending.track();
        is_open.track();
        if let Some(container) = messages_ref.get() {
            container.set_scroll_top(container.scroll_height());
        }
    });

    let submit = move || {
        let text = conversation.with_untracked(|state| state.draft().to_string());
        let Some(request) = conversation
            .try_update(|state| state.begin_turn(&text))
            .flatten()
        else {
            return;
        };

        let endpoint = endpoint.get_untracked().and_then(Result::ok);
        spawn_local(async move {
            let outcome = match endpoint {
                Some(endpoint) => HttpChatBackend::new(endpoint).send(&request).await,
                None => Err(TransportError::NotConfigured.into()),
            };
            conversation.update(|state| {
                let outcome = state.complete_turn(outcome, &BrowserStorage);
                tracing::debug!(?outcome, "Chat turn completed");
            });
        });
    };

    view! {
        <div class="chat-bubble">
            <Show
                when=move || is_open.get()
                fallback=move || {
                    view! {
                        <button class="chat-launcher" on:click=move |_| set_open.set(true)>
                            <span class="chat-launcher-icon" aria-hidden="true">"💬"</span>
                            <span>"Chat with us"</span>
                        </button>
                    }
                }
            >
                <div
                    class="chat-window"
                    lang=move || language.get()
                >
                    <div class="chat-header">
                        <h3>"Chat with Reykjavík Excursions"</h3>
                        <button
                            class="chat-close"
                            aria-label="Close chat"
                            on:click=move |_| set_open.set(false)
                        >
                            "✕"
                        </button>
                    </div>

                    <div class="chat-messages" node_ref=messages_ref>
                        {move || {
                            messages
                                .get()
                                .into_iter()
                                .map(|message| view! { <MessageRow message=message/> })
                                .collect_view()
                        }}
                        <Show when=move || is_pending.get()>
                            <div class="chat-row assistant">
                                <div
                                    class="chat-message assistant chat-loading"
                                    aria-label="Assistant is typing"
                                >
                                    <span class="spinner"></span>
                                </div>
                            </div>
                        </Show>
                    </div>

                    <form
                        class="chat-input"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            submit();
                        }
                    >
                        <input
                            type="text"
                            placeholder="Type your message..."
                            prop:value=move || draft.get()
                            on:input=move |ev| {
                                let draft = event_target_value(&ev);
                                conversation.update(|state| state.set_draft(draft));
                            }
                        />
                        <button type="submit" disabled=move || is_pending.get()>
                            "Send"
                        </button>
                    </form>
                </div>
            </Show>
        </div>
    }
}

/// One message, aligned by sender. Only assistant text is formatted.
#[component]
fn MessageRow(message: Message) -> impl IntoView {
    let role = if message.is_user() { "user" } else { "assistant" };
    let body = if message.is_user() {
        message.text().to_string().into_any()
    } else {
        view! { <MessageContent text=message.text().to_string()/> }.into_any()
    };

    view! {
        <div class=format!("chat-row {role}")>
            <div class=format!("chat-message {role}")>{body}</div>
        </div>
    }
}
