//! Conversation session state.
//!
//! `ConversationState` is the single writer of everything the widget shows.
//! A turn is split in two so the caller can await the backend between them
//! without holding a borrow of the state:
//!
//! 1. [`ConversationState::begin_turn`] validates the input, appends the user
//!    message, clears the draft, marks the state pending and returns the
//!    request to send.
//! 2. [`ConversationState::complete_turn`] applies the backend outcome: on
//!    success it adopts the session, replaces the context, persists both and
//!    appends the reply; on failure it appends the fallback reply and leaves
//!    session and context alone.
//!
//! While a turn is pending `begin_turn` refuses new input, so at most one
//! request is ever in flight.

use crate::backend::{ChatBackend, ChatRequest, ChatResponse};
use crate::context::ConversationContext;
use crate::error::TransportError;
use crate::message::Message;
use crate::storage::{DurableStore, PersistedSession, persist_context, persist_session_id};
use excursions_core::{ChatSessionId, Result};

/// Synthetic first message shown when the history is empty.
pub const GREETING: &str = "Hi there! 👋 I'm the Reykjavík Excursions assistant. \
     Ask me about tours, airport transfers or anything else about your trip.";

/// Reply shown when a turn fails for any reason.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again shortly.";

/// How a completed turn resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant replied.
    Replied,
    /// The turn failed and the fallback reply was appended.
    Failed,
}

/// Everything the chat widget renders, plus the identity it carries between
/// turns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    messages: Vec<Message>,
    session_id: Option<ChatSessionId>,
    context: ConversationContext,
    draft: String,
    pending: bool,
    language: Option<String>,
}

impl ConversationState {
    /// Creates an empty state with no history and no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores session and context from durable storage and seeds the
    /// greeting if there is no history yet.
    ///
    /// The greeting is independent of whether a session was restored.
    pub fn initialize(&mut self, store: &impl DurableStore) {
        let restored = PersistedSession::restore(store);
        self.session_id = restored.session_id;
        self.context = restored.context;

        if self.messages.is_empty() {
            self.messages.push(Message::assistant(GREETING));
        }

        tracing::debug!(
            restored_session = self.session_id.is_some(),
            "Initialized chat conversation"
        );
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&ChatSessionId> {
        self.session_id.as_ref()
    }

    #[must_use]
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the input draft. Allowed while a turn is pending.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Returns true while a turn is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Language tag of the latest reply, if any.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Starts a turn.
    ///
    /// Returns `None` without touching the state when the text is blank or a
    /// turn is already pending.
    pub fn begin_turn(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if self.pending {
            tracing::debug!("Ignoring submit while a turn is pending");
            return None;
        }

        self.messages.push(Message::user(text));
        self.draft.clear();
        self.pending = true;

        Some(ChatRequest {
            message: text.to_string(),
            session_id: self.session_id.clone(),
            context: self.context.clone(),
        })
    }

    /// Finishes the pending turn with the backend outcome.
    ///
    /// Storage write failures are logged and do not change the outcome.
    pub fn complete_turn(
        &mut self,
        outcome: Result<ChatResponse, TransportError>,
        store: &impl DurableStore,
    ) -> TurnOutcome {
        self.pending = false;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Chat turn failed");
                self.messages.push(Message::assistant(FALLBACK_REPLY));
                return TurnOutcome::Failed;
            }
        };

        match ChatSessionId::new(reply.session_id) {
            Ok(session_id) if self.session_id.as_ref() != Some(&session_id) => {
                if let Err(e) = persist_session_id(store, &session_id) {
                    tracing::warn!(error = %e, "Failed to persist chat session id");
                }
                self.session_id = Some(session_id);
            }
            Ok(_) => {}
            Err(_) => tracing::debug!("Reply carried no session id, keeping the current one"),
        }

        if let Err(e) = persist_context(store, &reply.context) {
            tracing::warn!(error = %e, "Failed to persist chat context");
        }
        self.context = reply.context;
        self.language = Some(reply.language);
        self.messages.push(Message::assistant(reply.message));

        TurnOutcome::Replied
    }

    /// Runs a whole turn against `backend`.
    ///
    /// Returns `None` when the submit was ignored. For callers that can hold
    /// the state across the await; the widget drives the two halves itself.
    pub async fn submit(
        &mut self,
        text: &str,
        backend: &impl ChatBackend,
        store: &impl DurableStore,
    ) -> Option<TurnOutcome> {
        let request = self.begin_turn(text)?;
        let outcome = backend.send(&request).await;
        Some(self.complete_turn(outcome, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CONTEXT_KEY, MemoryStore, SESSION_ID_KEY};
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Backend that answers from a script and records every request.
    struct ScriptedBackend {
        replies: RefCell<VecDeque<Result<ChatResponse, TransportError>>>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn replying(replies: Vec<Result<ChatResponse, TransportError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl ChatBackend for ScriptedBackend {
        async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::NotConfigured.into()))
        }
    }

    fn reply(message: &str, session_id: &str, context: ConversationContext) -> ChatResponse {
        ChatResponse {
            message: message.to_string(),
            session_id: session_id.to_string(),
            language: "en".to_string(),
            context,
        }
    }

    fn ok(
        message: &str,
        session_id: &str,
        context: ConversationContext,
    ) -> Result<ChatResponse, TransportError> {
        Ok(reply(message, session_id, context))
    }

    fn failure() -> Result<ChatResponse, TransportError> {
        Err(TransportError::UnexpectedStatus { status: 500 }.into())
    }

    fn context(value: serde_json::Value) -> ConversationContext {
        serde_json::from_value(value).expect("context object")
    }

    fn topic(name: &str) -> ConversationContext {
        context(json!({ "lastTopic": name }))
    }

    fn initialized(store: &MemoryStore) -> ConversationState {
        let mut state = ConversationState::new();
        state.initialize(store);
        state
    }

    #[test]
    fn initialize_seeds_a_single_greeting() {
        let store = MemoryStore::new();
        let mut state = initialized(&store);
        assert_eq!(state.messages(), &[Message::assistant(GREETING)]);

        state.initialize(&store);
        assert_eq!(state.messages().len(), 1);
        assert!(store.is_empty(), "greeting must not be persisted");
    }

    #[test]
    fn initialize_restores_session_with_a_fresh_greeting() {
        let store = MemoryStore::new();
        store.set(SESSION_ID_KEY, "sess-old").expect("write");
        store
            .set(CONTEXT_KEY, r#"{"lastTopic":"whale_watching"}"#)
            .expect("write");

        let state = initialized(&store);
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-old"));
        assert_eq!(state.context(), &topic("whale_watching"));
        assert_eq!(state.messages(), &[Message::assistant(GREETING)]);
    }

    #[test]
    fn initialize_with_corrupted_context_uses_default() {
        let store = MemoryStore::new();
        store.set(CONTEXT_KEY, "{\"lastTopic\": ").expect("write");

        let state = initialized(&store);
        assert_eq!(state.context(), &ConversationContext::default());
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let store = MemoryStore::new();
        let mut state = initialized(&store);
        state.set_draft("   ");
        let before = state.clone();

        assert!(state.begin_turn("   ").is_none());
        assert!(state.begin_turn("").is_none());
        assert_eq!(state, before);
        assert!(!state.is_pending());
    }

    #[test]
    fn begin_turn_appends_user_message_and_goes_pending() {
        let mut state = initialized(&MemoryStore::new());
        state.set_draft("Is the Golden Circle tour running today?");

        let request = state
            .begin_turn("Is the Golden Circle tour running today?")
            .expect("turn starts");

        assert!(state.is_pending());
        assert_eq!(state.draft(), "");
        assert_eq!(
            state.messages().last(),
            Some(&Message::user("Is the Golden Circle tour running today?"))
        );
        assert_eq!(request.message, "Is the Golden Circle tour running today?");
        assert!(request.session_id.is_none());
    }

    #[test]
    fn second_submit_while_pending_is_ignored() {
        let mut state = initialized(&MemoryStore::new());

        assert!(state.begin_turn("first").is_some());
        let len = state.messages().len();
        assert!(state.begin_turn("second").is_none());
        assert_eq!(state.messages().len(), len);
        assert!(state.is_pending());
    }

    #[test]
    fn editing_the_draft_leaves_history_and_identity_untouched() {
        let store = MemoryStore::new();
        store.set(SESSION_ID_KEY, "sess-1").expect("write");
        let mut state = initialized(&store);
        let messages = state.messages().to_vec();
        let context = state.context().clone();

        for draft in ["G", "Gu", "Gul", "Gullfoss"] {
            state.set_draft(draft);
            assert_eq!(state.messages(), messages.as_slice());
            assert_eq!(state.context(), &context);
            assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));
        }
        assert_eq!(state.draft(), "Gullfoss");
    }

    #[test]
    fn draft_stays_editable_while_pending() {
        let mut state = initialized(&MemoryStore::new());
        state.begin_turn("first").expect("turn starts");

        state.set_draft("typing ahead");
        assert_eq!(state.draft(), "typing ahead");
    }

    #[tokio::test]
    async fn successful_turn_adopts_session_and_persists() {
        let store = MemoryStore::new();
        let backend =
            ScriptedBackend::replying(vec![ok("Yes, at 9:00.", "sess-1", topic("golden_circle"))]);
        let mut state = initialized(&store);

        let outcome = state.submit("Golden Circle tomorrow?", &backend, &store).await;

        assert_eq!(outcome, Some(TurnOutcome::Replied));
        assert!(!state.is_pending());
        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[2], Message::assistant("Yes, at 9:00."));
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));
        assert_eq!(state.language(), Some("en"));
        assert_eq!(store.get(SESSION_ID_KEY).as_deref(), Some("sess-1"));

        let stored: ConversationContext =
            serde_json::from_str(&store.get(CONTEXT_KEY).expect("context stored")).expect("json");
        assert_eq!(stored, topic("golden_circle"));
    }

    #[tokio::test]
    async fn failed_turn_appends_fallback_and_keeps_identity() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![ok("Hello", "sess-1", topic("tours")), failure()]);
        let mut state = initialized(&store);

        state.submit("hi", &backend, &store).await;
        let outcome = state.submit("and then?", &backend, &store).await;

        assert_eq!(outcome, Some(TurnOutcome::Failed));
        assert!(!state.is_pending());
        assert_eq!(state.messages().last(), Some(&Message::assistant(FALLBACK_REPLY)));
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));
        assert_eq!(state.context(), &topic("tours"));
        assert_eq!(store.get(SESSION_ID_KEY).as_deref(), Some("sess-1"));
    }

    #[tokio::test]
    async fn failed_first_turn_writes_nothing() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![failure()]);
        let mut state = initialized(&store);

        state.submit("hello?", &backend, &store).await;

        assert!(store.is_empty());
        assert!(state.session_id().is_none());
    }

    #[tokio::test]
    async fn every_turn_adds_exactly_two_messages() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![
            ok("one", "sess-1", topic("a")),
            failure(),
            ok("three", "sess-1", topic("c")),
            failure(),
        ]);
        let mut state = initialized(&store);

        for text in ["a", "b", "c", "d"] {
            let before = state.messages().len();
            state.submit(text, &backend, &store).await.expect("turn ran");
            assert_eq!(state.messages().len(), before + 2);
        }
        assert_eq!(backend.request_count(), 4);
    }

    #[tokio::test]
    async fn session_id_is_sticky() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![
            ok("one", "sess-1", topic("a")),
            ok("two", "", topic("b")),
            failure(),
            ok("four", "sess-2", topic("d")),
        ]);
        let mut state = initialized(&store);

        state.submit("1", &backend, &store).await;
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));

        state.submit("2", &backend, &store).await;
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));
        assert_eq!(store.get(SESSION_ID_KEY).as_deref(), Some("sess-1"));

        state.submit("3", &backend, &store).await;
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-1"));

        state.submit("4", &backend, &store).await;
        assert_eq!(state.session_id().map(ChatSessionId::as_str), Some("sess-2"));
        assert_eq!(store.get(SESSION_ID_KEY).as_deref(), Some("sess-2"));
    }

    #[tokio::test]
    async fn context_is_replaced_wholesale() {
        let store = MemoryStore::new();
        let rich = context(json!({
            "lastTopic": "airport_transfer",
            "flightTime": "07:10",
            "isGroupBooking": true,
            "groupDetails": { "adults": 2, "youths": 0, "children": 1 }
        }));
        let sparse = context(json!({ "lastQuery": "northern lights" }));
        let backend = ScriptedBackend::replying(vec![
            ok("one", "sess-1", rich.clone()),
            ok("two", "sess-1", sparse.clone()),
        ]);
        let mut state = initialized(&store);

        state.submit("1", &backend, &store).await;
        assert_eq!(state.context(), &rich);

        state.submit("2", &backend, &store).await;
        assert_eq!(state.context(), &sparse);
        let stored: ConversationContext =
            serde_json::from_str(&store.get(CONTEXT_KEY).expect("stored")).expect("json");
        assert_eq!(stored, sparse);
    }

    #[tokio::test]
    async fn requests_echo_session_and_context() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![
            ok("one", "sess-1", topic("glaciers")),
            ok("two", "sess-1", topic("glaciers")),
        ]);
        let mut state = initialized(&store);

        state.submit("first", &backend, &store).await;
        state.submit("second", &backend, &store).await;

        let requests = backend.requests.borrow();
        assert!(requests[0].session_id.is_none());
        assert_eq!(requests[0].context, ConversationContext::default());
        assert_eq!(requests[1].session_id.as_ref().map(ChatSessionId::as_str), Some("sess-1"));
        assert_eq!(requests[1].context, topic("glaciers"));
    }

    #[tokio::test]
    async fn unexpected_context_shape_is_stored_and_echoed_unchanged() {
        let store = MemoryStore::new();
        let odd = json!({ "lastTopic": "x", "isGroupBooking": null, "groupDetails": null });
        let backend = ScriptedBackend::replying(vec![
            ok("one", "sess-1", context(odd.clone())),
            ok("two", "sess-1", topic("x")),
        ]);
        let mut state = initialized(&store);

        assert_eq!(state.submit("1", &backend, &store).await, Some(TurnOutcome::Replied));
        let stored: serde_json::Value =
            serde_json::from_str(&store.get(CONTEXT_KEY).expect("stored")).expect("json");
        assert_eq!(stored, odd);

        state.submit("2", &backend, &store).await;
        let echoed = serde_json::to_value(&backend.requests.borrow()[1].context).expect("json");
        assert_eq!(echoed, odd);
    }

    #[tokio::test]
    async fn overlapping_submits_send_one_request() {
        let store = MemoryStore::new();
        let backend = ScriptedBackend::replying(vec![ok("one", "sess-1", topic("a"))]);
        let mut state = initialized(&store);

        let first = state.begin_turn("first").expect("turn starts");
        assert!(state.begin_turn("second").is_none());

        let outcome = backend.send(&first).await;
        state.complete_turn(outcome, &store);

        assert_eq!(backend.request_count(), 1);
        assert_eq!(state.messages().len(), 3);
    }
}
