use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{DocumentEvent, EventHandler};

/// Records every event it receives.
///
/// Clones share the same record, so one clone can be subscribed to a bus
/// while another is kept to inspect what was emitted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<DocumentEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<DocumentEvent> {
        self.events.lock().clone()
    }

    /// Returns the recorded events and clears the log
    pub fn take(&self) -> Vec<DocumentEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Titles of the user notices recorded so far
    pub fn notices(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DocumentEvent::Notice { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, event: &DocumentEvent) -> bool {
        self.events.lock().iter().any(|e| e == event)
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &DocumentEvent) {
        self.events.lock().push(event.clone());
    }
}
