//! Action Resolution
//!
//! The screen that owns an interpreter supplies an [`ActionTable`]:
//! a mapping from symbolic action name (as it appears in the server's
//! tree) to callable behavior. Resolution is a pure table lookup; a
//! missing entry yields a diagnostic no-op rather than an error, so a
//! bad action reference can never abort a render pass.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A cloneable callable handle.
///
/// Press hooks invoke with no arguments; change hooks invoke with
/// `[field_name, new_value]`.
#[derive(Clone)]
pub struct Invokable {
    name: Arc<str>,
    handler: Arc<dyn Fn(&[&str]) + Send + Sync>,
}

impl Invokable {
    /// Wrap a callable under a symbolic name
    pub fn new(name: &str, handler: impl Fn(&[&str]) + Send + Sync + 'static) -> Self {
        Self {
            name: Arc::from(name),
            handler: Arc::new(handler),
        }
    }

    /// A no-op that logs a warning identifying the missing action
    /// every time it is invoked.
    pub fn noop(name: &str) -> Self {
        let missing = name.to_string();
        Self {
            name: Arc::from(name),
            handler: Arc::new(move |_args| {
                tracing::warn!(action = %missing, "action is not available in the action table");
            }),
        }
    }

    /// Invoke the underlying callable
    pub fn invoke(&self, args: &[&str]) {
        (self.handler)(args);
    }

    /// The symbolic name this handle was resolved from
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Invokable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invokable").field("name", &self.name).finish()
    }
}

/// Screen-supplied mapping from symbolic name to callable.
///
/// Fixed for the lifetime of one screen instance; the interpreter
/// only ever reads it.
#[derive(Clone, Default)]
pub struct ActionTable {
    entries: HashMap<String, Invokable>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under a symbolic name
    pub fn insert(&mut self, name: &str, handler: impl Fn(&[&str]) + Send + Sync + 'static) {
        self.entries
            .insert(name.to_string(), Invokable::new(name, handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Pure table lookup. Unknown names return the diagnostic no-op.
    pub fn resolve(&self, name: &str) -> Invokable {
        match self.entries.get(name) {
            Some(invokable) => invokable.clone(),
            None => Invokable::noop(name),
        }
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
