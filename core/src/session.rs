//! Session / Conversation Client
//!
//! Owns the session identifier, the form state store, and the
//! currently displayed tree, and drives the three-phase conversation
//! state machine:
//!
//! ```text
//! Idle --start--> Awaiting --response--> Displaying
//!                 Awaiting --failure---> Idle (tree cleared, error surfaced)
//! Displaying --submit--> Awaiting
//! Displaying --reset---> Idle (local only, no request)
//! ```
//!
//! Transport calls run on a spawned task and post their outcome back
//! over a channel tagged with the turn number that produced them. A
//! result whose tag no longer matches the client's current turn is
//! stale (superseded by a reset) and is dropped silently. While
//! Awaiting, start and submit are ignored, so two in-flight requests
//! can never race on the session id or the form drain.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::form::{FieldSetter, FormState};
use crate::node::UiPayload;
use crate::protocol::{TalkRequest, TalkResponse};
use crate::transport::Transport;

/// Conversation phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No tree displayed, ready to start
    Idle,
    /// A start or submit request is in flight
    Awaiting,
    /// A tree is displayed and the session id is set
    Displaying,
}

/// Outcome of a completed turn, reported from [`SessionClient::poll`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A response was adopted; the displayed tree was swapped
    TreeReplaced,
    /// The turn failed; the client is back at Idle
    TurnFailed { error: String },
}

struct TurnResult {
    turn: u64,
    outcome: Result<TalkResponse, TransportError>,
}

/// Client for one multi-turn conversation with the agent backend.
pub struct SessionClient {
    transport: Arc<dyn Transport>,
    form: FormState,
    session_id: Option<String>,
    phase: SessionPhase,
    /// Monotonic tag for in-flight requests; bumped on every dispatch
    /// and on reset so superseded results can be recognized
    turn: u64,
    tree: Option<UiPayload>,
    tx: mpsc::UnboundedSender<TurnResult>,
    rx: mpsc::UnboundedReceiver<TurnResult>,
}

impl SessionClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            transport,
            form: FormState::new(),
            session_id: None,
            phase: SessionPhase::Idle,
            turn: 0,
            tree: None,
            tx,
            rx,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == SessionPhase::Awaiting
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The currently displayed tree, if any
    pub fn tree(&self) -> Option<&UiPayload> {
        self.tree.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Write handle for stateful leaves
    pub fn form_setter(&self) -> FieldSetter {
        self.form.setter()
    }

    /// Begin a new conversation. Only valid from Idle; returns
    /// whether a request was dispatched.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            tracing::debug!(phase = ?self.phase, "ignoring start outside Idle");
            return false;
        }
        self.dispatch(TalkRequest::start())
    }

    /// Submit the accumulated form. Only valid from Displaying with
    /// an issued session id; in particular, ignored while a request
    /// is already in flight.
    pub fn submit(&mut self) -> bool {
        if self.phase != SessionPhase::Displaying {
            tracing::debug!(phase = ?self.phase, "ignoring submit outside Displaying");
            return false;
        }
        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => {
                tracing::warn!("displaying without a session id, ignoring submit");
                return false;
            }
        };
        let fields = self.form.drain_and_clear();
        tracing::debug!(fields = fields.len(), "submitting form");
        self.dispatch(TalkRequest::submit(&session_id, &fields))
    }

    /// Clear the displayed tree and return to Idle without contacting
    /// the server. Allowed while a request is in flight; the late
    /// result is dropped by the turn tag check when it arrives.
    pub fn reset(&mut self) {
        self.turn += 1;
        self.tree = None;
        self.session_id = None;
        self.form.clear();
        self.phase = SessionPhase::Idle;
    }

    fn dispatch(&mut self, request: TalkRequest) -> bool {
        self.turn += 1;
        let turn = self.turn;
        self.phase = SessionPhase::Awaiting;

        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = transport.send(&request).await;
            // Receiver gone means the client was dropped; nothing to do
            let _ = tx.send(TurnResult { turn, outcome });
        });
        true
    }

    /// Drain completed turns and apply their transitions. Call once
    /// per event-loop pass.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            if result.turn != self.turn || self.phase != SessionPhase::Awaiting {
                tracing::debug!(turn = result.turn, current = self.turn, "dropping stale turn result");
                continue;
            }
            match result.outcome {
                Ok(response) => {
                    // Adopt the issued id and swap the tree; the old
                    // payload (and any per-leaf state derived from
                    // it) is gone before the new one is visible.
                    self.session_id = Some(response.session_id);
                    self.form.clear();
                    self.tree = Some(response.message);
                    self.phase = SessionPhase::Displaying;
                    events.push(SessionEvent::TreeReplaced);
                }
                Err(error) => {
                    tracing::warn!(%error, "conversation turn failed");
                    // Back to Idle; a retry starts a fresh session
                    self.tree = None;
                    self.session_id = None;
                    self.phase = SessionPhase::Idle;
                    events.push(SessionEvent::TurnFailed {
                        error: error.to_string(),
                    });
                }
            }
        }
        events
    }
}
