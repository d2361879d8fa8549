use crate::geometry::PixelRect;
use crate::layer::LayerId;

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    /// Pixels of a layer changed; caches and thumbnails derived from it are stale.
    ImageChanged { layer: LayerId },
    LayerIconChanged { layer: LayerId },
    SelectionChanged(SelectionEvent),
    HistoryChanged(HistoryEvent),
    /// The view should repaint without any model change.
    Repaint,
    /// An informational message for the user.
    Notice { title: String, body: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    InProgress { bounds: PixelRect },
    Committed { bounds: PixelRect },
    Modified { bounds: PixelRect },
    Cleared,
    Hidden,
    Shown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Added { name: String },
    Undone { name: String },
    Redone { name: String },
    Evicted { count: usize },
    Cleared,
}
