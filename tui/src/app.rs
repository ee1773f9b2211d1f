//! Main Application
//!
//! The App is a thin client over the core session engine:
//! 1. Terminal events become focus moves, edits, and action presses
//! 2. Screen-level actions (submit, reset) flow through a command
//!    channel so resolved hooks stay plain callables
//! 3. The session client is polled each pass; an adopted response
//!    swaps the displayed tree and rebuilds the screen from scratch
//! 4. Rendering draws whatever the current phase dictates

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc;

use adapta_core::{
    ActionTable, AgentConfig, HttpTransport, Interpreter, LeafRegistry, SessionClient,
    SessionEvent, SessionPhase,
};
use std::sync::Arc;

use crate::screen::Screen;
use crate::view;

/// Screen-level commands produced by resolved action hooks.
#[derive(Clone, Copy, Debug)]
enum AppCommand {
    /// The designated submit action fired
    Submit,
    /// The reset action fired
    Reset,
}

/// Main application state.
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Session/conversation client (owns session id, form, tree)
    client: SessionClient,
    /// Tree interpreter with this screen's action table
    interpreter: Interpreter,
    /// Flattened representation of the displayed tree
    screen: Screen,
    /// Last turn failure, shown in the status line until the next start
    last_error: Option<String>,
    /// Commands emitted by action hooks
    commands: mpsc::UnboundedReceiver<AppCommand>,
}

impl App {
    /// Build the app: transport from environment config, one session
    /// client, and the action table the agent's trees may reference.
    pub fn new() -> anyhow::Result<Self> {
        let config = AgentConfig::from_env();
        tracing::info!(endpoint = %config.endpoint, "connecting to agent backend");
        let transport = Arc::new(HttpTransport::new(config)?);
        let client = SessionClient::new(transport);

        let (tx, commands) = mpsc::unbounded_channel();

        // The action table is fixed for the lifetime of this screen.
        // storeData writes edits into the session's form store; the
        // submit/reset actions loop back through the command channel.
        let mut actions = ActionTable::new();
        let setter = client.form_setter();
        actions.insert("storeData", move |args| {
            if let [field, value] = args {
                setter.set(field, value);
            } else {
                tracing::warn!("storeData invoked without [field, value] arguments");
            }
        });
        let submit_tx = tx.clone();
        actions.insert("handleSubmit", move |_| {
            let _ = submit_tx.send(AppCommand::Submit);
        });
        let reset_tx = tx;
        actions.insert("handleReset", move |_| {
            let _ = reset_tx.send(AppCommand::Reset);
        });

        let interpreter = Interpreter::new(LeafRegistry::standard(), actions, client.form_setter());

        Ok(Self {
            running: true,
            client,
            interpreter,
            screen: Screen::empty(),
            last_error: None,
            commands,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Paint the welcome screen before the first event
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Resize(_, _) => {}
                            _ => {}
                        }
                    }
                }

                // Tick so session poll keeps running while idle
                _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            }

            self.drain_commands();
            self.apply_session_events();
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.client.phase() {
            SessionPhase::Idle => match key.code {
                KeyCode::Enter => {
                    self.last_error = None;
                    self.client.start();
                }
                KeyCode::Esc => {
                    self.running = false;
                }
                _ => {}
            },

            // Submit and start are disabled while a request is in
            // flight; Esc still abandons the turn locally.
            SessionPhase::Awaiting => {
                if key.code == KeyCode::Esc {
                    self.client.reset();
                    self.screen = Screen::empty();
                }
            }

            SessionPhase::Displaying => match key.code {
                KeyCode::Esc => {
                    // "Start Over": local-only, no request
                    self.client.reset();
                    self.screen = Screen::empty();
                }
                KeyCode::Tab => self.screen.focus_next(),
                KeyCode::BackTab => self.screen.focus_prev(),
                KeyCode::Enter => {
                    if !self.screen.press_focused() {
                        // Enter on a non-button moves on, like Tab
                        self.screen.focus_next();
                    }
                }
                KeyCode::Backspace => self.screen.backspace(),
                KeyCode::Char(c) => self.screen.type_char(c),
                _ => {}
            },
        }
    }

    /// Apply commands emitted by action hooks since the last pass
    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                AppCommand::Submit => {
                    self.client.submit();
                }
                AppCommand::Reset => {
                    self.client.reset();
                    self.screen = Screen::empty();
                }
            }
        }
    }

    /// Poll the session client and react to completed turns
    fn apply_session_events(&mut self) {
        for event in self.client.poll() {
            match event {
                SessionEvent::TreeReplaced => {
                    // Old screen (and its transient input state) is
                    // dropped before the new tree becomes visible
                    self.screen = match self.client.tree() {
                        Some(tree) => match self.interpreter.render(tree) {
                            Some(rendered) => Screen::from_tree(&rendered),
                            None => Screen::empty(),
                        },
                        None => Screen::empty(),
                    };
                    self.last_error = None;
                }
                SessionEvent::TurnFailed { error } => {
                    self.screen = Screen::empty();
                    self.last_error = Some(error);
                }
            }
        }
    }

    /// Render the UI for the current phase
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();

            let body = Rect {
                height: area.height.saturating_sub(1),
                ..area
            };

            let hint = match self.client.phase() {
                SessionPhase::Idle => " [Enter] Start  [Esc] Quit",
                SessionPhase::Awaiting => " waiting for the agent...  [Esc] Cancel",
                SessionPhase::Displaying => {
                    " [Tab] Next field  [Enter] Press  [Esc] Start over  [Ctrl+C] Quit"
                }
            };

            match self.client.phase() {
                SessionPhase::Idle => view::render_welcome(buf, body),
                SessionPhase::Awaiting => view::render_loading(buf, body),
                SessionPhase::Displaying => {
                    view::render_screen(buf, body, &self.screen);
                }
            }
            view::render_status(buf, area, hint, self.last_error.as_deref());
        })?;
        Ok(())
    }
}
