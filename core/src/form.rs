//! Form State Store
//!
//! A single mutable mapping from field name to current string value.
//! Stateful input leaves write into it through a [`FieldSetter`]
//! handle on each change event; the session client drains it exactly
//! once per submission, immediately before building the outgoing
//! request.
//!
//! One store per session client. There is deliberately no ambient or
//! module-level instance: two screens mounted at once get two stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Accumulated field values for the current conversation turn.
#[derive(Clone, Default)]
pub struct FormState {
    fields: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a field value; last write wins. Values are plain
    /// strings, the store performs no coercion.
    pub fn set(&self, name: &str, value: &str) {
        self.fields
            .lock()
            .insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.fields.lock().get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.lock().is_empty()
    }

    /// Atomically take the accumulated mapping and reset the store.
    /// A write racing with submission lands fully before or fully
    /// after the drain, never in between.
    pub fn drain_and_clear(&self) -> BTreeMap<String, String> {
        std::mem::take(&mut *self.fields.lock())
    }

    /// Discard all accumulated values
    pub fn clear(&self) {
        self.fields.lock().clear();
    }

    /// A write-only handle for leaves. Leaves never hold the store
    /// itself.
    pub fn setter(&self) -> FieldSetter {
        FieldSetter {
            fields: Arc::clone(&self.fields),
        }
    }
}

/// Write-only handle into a [`FormState`], given to stateful input
/// leaves so they can report edits.
#[derive(Clone)]
pub struct FieldSetter {
    fields: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FieldSetter {
    pub fn set(&self, name: &str, value: &str) {
        self.fields
            .lock()
            .insert(name.to_string(), value.to_string());
    }
}
