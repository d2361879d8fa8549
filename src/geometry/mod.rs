mod rect;
mod region;

pub use rect::PixelRect;
pub(crate) use rect::to_grid;
pub use region::{Region, Span};
