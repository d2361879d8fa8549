#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod fade;
pub mod geometry;
pub mod history;
pub mod layer;
pub mod pixels;
pub mod selection;

pub use config::EditorConfig;
pub use document::Document;
pub use error::{EditError, EditResult};
pub use event::{DocumentEvent, EventBus, EventLog};
pub use geometry::{PixelRect, Region};
pub use history::{Edit, History, HistoryError, PartialPixelEdit};
pub use layer::{Layer, LayerId};
pub use pixels::PixelBuffer;
pub use selection::{
    combine, InteractionMode, PointerSample, Selection, SelectionBuilder, Shape, ShapeKind,
};
