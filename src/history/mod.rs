mod edit;
mod partial_pixel;
mod selection_edits;
mod stack;

use thiserror::Error;

use crate::error::EditError;

pub use edit::Edit;
pub use partial_pixel::PartialPixelEdit;
pub use selection_edits::{DeselectEdit, NewSelectionEdit, SelectionChangeEdit};
pub use stack::History;

/// Errors that can occur while moving through the history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    /// The entry could not be applied. It is left where it was, so the
    /// caller can retry or drop it with [`History::discard_undo`] or
    /// [`History::discard_redo`].
    #[error("failed to apply '{name}': {source}")]
    EditFailed {
        name: String,
        #[source]
        source: EditError,
    },
}

/// Result type for undo/redo operations
pub type HistoryResult<T> = Result<T, HistoryError>;
