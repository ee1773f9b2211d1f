//! Adapta Core - headless server-driven UI engine
//!
//! The agent backend describes the user interface as a JSON component
//! tree, one tree per conversation turn. This crate owns everything
//! below the rendering surface:
//!
//! - **Node model**: the untyped tree the server sends
//! - **Registry**: the fixed map of known leaf component types
//! - **Actions**: symbolic action names resolved to callables
//! - **Form state**: field values accumulated between submissions
//! - **Interpreter**: the recursive core that turns a tree into
//!   renderable output
//! - **Session client**: the start/submit/reset state machine that
//!   round-trips form data against the backend
//!
//! # Architecture
//!
//! Surfaces (e.g. the TUI) are thin clients: they hand terminal events
//! to the [`session::SessionClient`], poll it for turn outcomes, and
//! draw whatever the [`interpreter::Interpreter`] produced. All
//! interpretation and state transitions happen on the surface's single
//! logical event thread; the only async work is the transport call.

pub mod actions;
pub mod config;
pub mod error;
pub mod form;
pub mod interpreter;
pub mod node;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod transport;

pub use actions::{ActionTable, Invokable};
pub use config::AgentConfig;
pub use error::TransportError;
pub use form::{FieldSetter, FormState};
pub use interpreter::{Interpreter, RenderedChildren, RenderedNode};
pub use node::{Children, NodeDescription, PropMap, PropValue, UiPayload};
pub use protocol::{TalkRequest, TalkResponse, NEW_SESSION};
pub use registry::{LeafKind, LeafRegistry, LeafSpec};
pub use session::{SessionClient, SessionEvent, SessionPhase};
pub use transport::{HttpTransport, Transport};
