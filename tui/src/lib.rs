//! Adapta TUI - terminal surface for the server-driven UI engine
//!
//! The agent backend decides what the screen looks like; this crate
//! just interprets and draws it. Each conversation turn the backend
//! returns a component tree, the core interpreter resolves it, and
//! the surface flattens it into a focusable element list the user can
//! tab through, type into, and submit.
//!
//! # Architecture
//!
//! - **Screen**: the flattened element list with focus and transient
//!   input state, rebuilt wholesale on every tree swap
//! - **View**: buffer-level drawing of the welcome screen, the
//!   element list, and the status line
//! - **App**: the event loop bridging terminal events, the session
//!   client, and rendering

pub mod app;
pub mod screen;
pub mod theme;
pub mod view;

pub use app::App;
