use thiserror::Error;

use crate::geometry::PixelRect;
use crate::layer::LayerId;

/// Errors raised while applying or inspecting a history entry.
///
/// These are runtime conditions the caller can recover from, usually by
/// dropping the entry. Misuse of the selection protocol panics instead.
#[derive(Debug, Error)]
pub enum EditError {
    /// The backed-up rectangle no longer fits the layer, typically because
    /// the layer was resized after the backup was taken.
    #[error(
        "edit rectangle {rect} does not fit the {buffer} buffer of size {width}x{height}"
    )]
    TargetOutOfBounds {
        rect: PixelRect,
        buffer: &'static str,
        width: u32,
        height: u32,
    },

    /// The entry was evicted from the history and its data released.
    #[error("the history entry '{name}' was released")]
    Released { name: String },

    #[error("no layer with id {0}")]
    UnknownLayer(LayerId),

    #[error("the document has no selection to change")]
    NoSelection,
}

/// Result type for history entry operations
pub type EditResult<T> = Result<T, EditError>;
