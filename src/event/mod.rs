mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{DocumentEvent, HistoryEvent, SelectionEvent};
pub use handlers::EventLog;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &DocumentEvent);
}
