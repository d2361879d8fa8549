//! Selections and their interactive construction.
//!
//! A [`Selection`] lives in one of the document's two slots: the committed
//! selection, or the transient built selection that a [`SelectionBuilder`]
//! grows while the pointer is dragged. Once a selection dies it keeps no
//! shape and must not be touched again.

mod builder;
mod interaction;
mod shape;

pub use builder::{BuilderPhase, PendingStatus, SelectionBuilder};
pub use interaction::{combine, InteractionMode};
pub use shape::{PointerSample, Shape, ShapeKind};

use std::cell::OnceCell;

use log::trace;

use crate::geometry::{PixelRect, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Alive,
    Dead,
}

/// A selected area of the document.
///
/// The pixel region is only rasterized when something reads it, and is then
/// cached until the shape changes. A selection under construction is given a
/// clip rectangle so that an outline dragged far past the canvas never costs
/// more than the canvas itself.
#[derive(Debug, Clone)]
pub struct Selection {
    shape: Option<Shape>,
    clip: Option<PixelRect>,
    region: OnceCell<Region>,
    state: SelectionState,
    frozen: bool,
    hidden: bool,
    marching: bool,
}

impl Selection {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            clip: None,
            region: OnceCell::new(),
            state: SelectionState::Alive,
            frozen: false,
            hidden: false,
            marching: false,
        }
    }

    /// A live selection that covers nothing yet.
    pub fn empty() -> Self {
        Self::new(Shape::empty())
    }

    /// Limits the region to `clip`. The shape itself is kept as drawn.
    pub fn with_clip(mut self, clip: PixelRect) -> Self {
        self.clip = Some(clip);
        self.region = OnceCell::new();
        self
    }

    pub fn set_clip(&mut self, clip: Option<PixelRect>) {
        self.assert_alive();
        self.clip = clip;
        self.region = OnceCell::new();
    }

    pub fn clip(&self) -> Option<PixelRect> {
        self.clip
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == SelectionState::Alive
    }

    /// `None` once the selection is dead.
    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn region(&self) -> Option<&Region> {
        let shape = self.shape.as_ref().filter(|_| self.is_alive())?;
        Some(self.region.get_or_init(|| shape.to_region_clipped(self.clip)))
    }

    pub fn bounds(&self) -> Option<PixelRect> {
        self.region().map(Region::bounds)
    }

    /// Box around the outline as drawn, limited to the clip rectangle.
    /// Unlike [`bounds`](Self::bounds) this never rasterizes the shape.
    pub fn outline_bounds(&self) -> Option<PixelRect> {
        let shape = self.shape.as_ref().filter(|_| self.is_alive())?;
        let outline = match self.region.get() {
            Some(region) => region.bounds(),
            None => shape.outline_bounds(),
        };
        Some(match self.clip {
            Some(clip) => outline.intersect(&clip),
            None => outline,
        })
    }

    /// Whether the region has been computed for the current shape.
    pub fn is_rasterized(&self) -> bool {
        self.region.get().is_some()
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.assert_alive();
        self.shape = Some(shape);
        self.region = OnceCell::new();
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.assert_alive();
        self.frozen = frozen;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Toggles visibility. Announcing the change to the view is done by
    /// [`Document::set_selection_hidden`](crate::Document::set_selection_hidden).
    pub fn set_hidden(&mut self, hidden: bool) {
        self.assert_alive();
        self.hidden = hidden;
    }

    pub fn is_marching(&self) -> bool {
        self.marching
    }

    /// Turns on the marching-ants outline. The animation timer itself belongs
    /// to the view.
    pub fn start_marching(&mut self) {
        self.assert_alive();
        self.marching = true;
    }

    pub fn stop_marching(&mut self) {
        self.marching = false;
    }

    /// Kills the selection and releases its shape. Calling it again is a
    /// no-op.
    pub fn die(&mut self) {
        if !self.is_alive() {
            trace!("die() called on an already dead selection");
            return;
        }
        self.state = SelectionState::Dead;
        self.marching = false;
        self.shape = None;
        self.region = OnceCell::new();
    }

    /// The shape of a selection the caller knows to be alive.
    pub(crate) fn alive_shape(&self) -> &Shape {
        match &self.shape {
            Some(shape) if self.is_alive() => shape,
            _ => panic!("dead selection"),
        }
    }

    pub(crate) fn alive_region(&self) -> &Region {
        match self.region() {
            Some(region) => region,
            None => panic!("dead selection"),
        }
    }

    fn assert_alive(&self) {
        assert!(self.is_alive(), "dead selection");
    }
}
