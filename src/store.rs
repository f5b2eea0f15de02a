//! Shared error sink
//!
//! The one piece of state shared across pages and fetch collaborators: the
//! message behind the global error banner. Writers only ever hand over a
//! plain message; whatever failed keeps its own state unchanged.

use parking_lot::RwLock;

use crate::ClientError;

/// Holds the currently displayed error message, if any. Last write wins.
#[derive(Debug, Default)]
pub struct ErrorStore {
    current: RwLock<Option<String>>,
}

impl ErrorStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an error message, replacing any prior one
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("upstream error reported: {}", message);
        *self.current.write() = Some(message);
    }

    /// Forward a typed client error as its display message
    pub fn report(&self, error: &ClientError) {
        self.set_error(error.to_string());
    }

    /// Dismiss the current error
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// The message currently on display
    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Whether a message is on display
    pub fn has_error(&self) -> bool {
        self.current.read().is_some()
    }
}
