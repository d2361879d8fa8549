use log::{debug, info};

use crate::document::Document;
use crate::event::{DocumentEvent, SelectionEvent};
use crate::geometry::Region;
use crate::history::{NewSelectionEdit, SelectionChangeEdit};

use super::{InteractionMode, PointerSample, Selection, Shape, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderPhase {
    Constructing,
    Finished,
    Cancelled,
}

/// What happened to the selection that existed when the builder started.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingStatus {
    /// There was no selection.
    Active,
    /// Replace mode: the old selection is hidden, not killed, until the
    /// pointer is released. Whether the result is a new selection or a
    /// deselect is only known then.
    PendingReplace { replaced: Shape },
    /// Add, subtract or intersect: the old selection is frozen while the new
    /// shape is drawn.
    PendingFreeze,
}

/// Drives the construction of one selection, from pointer press to release.
///
/// Create it when the pointer is pressed, feed it every drag sample through
/// [`update_built_selection`](Self::update_built_selection) and finish with
/// [`combine_shapes`](Self::combine_shapes) on release. If the interaction
/// ends any other way call [`cancel_if_not_finished`](Self::cancel_if_not_finished).
#[derive(Debug)]
pub struct SelectionBuilder {
    kind: ShapeKind,
    mode: InteractionMode,
    phase: BuilderPhase,
    pending: PendingStatus,
}

impl SelectionBuilder {
    pub fn new(kind: ShapeKind, mode: InteractionMode, doc: &mut Document) -> Self {
        let pending = match doc.selection() {
            None => PendingStatus::Active,
            Some(existing) => {
                assert!(existing.is_alive(), "dead selection");
                let replaced = (mode == InteractionMode::Replace)
                    .then(|| existing.alive_shape().clone());

                let canvas = doc.canvas_bounds();
                doc.set_built_selection(Some(Selection::empty().with_clip(canvas)));
                match replaced {
                    Some(replaced) => {
                        doc.set_selection_hidden(true, true);
                        PendingStatus::PendingReplace { replaced }
                    }
                    None => {
                        if let Some(existing) = doc.selection_mut() {
                            existing.set_frozen(true);
                        }
                        PendingStatus::PendingFreeze
                    }
                }
            }
        };

        debug!("selection builder started: {:?} {:?}, {:?}", kind, mode, pending);
        Self {
            kind,
            mode,
            phase: BuilderPhase::Constructing,
            pending,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn phase(&self) -> BuilderPhase {
        self.phase
    }

    pub fn pending(&self) -> &PendingStatus {
        &self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BuilderPhase::Finished
    }

    /// Grows the built selection to follow the pointer.
    ///
    /// The outline is only rasterized on release, and then only inside the
    /// canvas, so the cost of a sample does not depend on how far the pointer
    /// has travelled.
    pub fn update_built_selection(&mut self, doc: &mut Document, sample: &PointerSample) {
        self.assert_constructing("update_built_selection");

        let canvas = doc.canvas_bounds();
        let bounds = match doc.built_selection_mut() {
            None => {
                let shape = self.kind.create_shape(sample, None);
                let built = Selection::new(shape).with_clip(canvas);
                let bounds = built.outline_bounds().unwrap_or_default();
                doc.set_built_selection(Some(built));
                bounds
            }
            Some(built) => {
                assert!(built.is_alive(), "dead selection");
                let shape = self.kind.create_shape(sample, Some(built.alive_shape()));
                built.set_shape(shape);
                if !built.is_marching() {
                    built.start_marching();
                }
                built.outline_bounds().unwrap_or_default()
            }
        };
        doc.emit(DocumentEvent::SelectionChanged(SelectionEvent::InProgress {
            bounds,
        }));
    }

    /// Combines the drawn shape with the existing selection when the pointer
    /// is released, commits the result and records it in the history.
    ///
    /// # Panics
    ///
    /// If called a second time or after the builder was cancelled.
    pub fn combine_shapes(&mut self, doc: &mut Document) {
        self.assert_constructing("combine_shapes");

        if doc.built_selection().is_none() {
            // released without any drag sample
            let canvas = doc.canvas_bounds();
            doc.set_built_selection(Some(Selection::empty().with_clip(canvas)));
        }
        let new_region = doc
            .built_selection()
            .map(|built| doc.clip_shape_to_canvas(built.alive_region()))
            .unwrap_or_default();

        let old_shape = doc.selection().map(|old| old.alive_shape().clone());
        match old_shape {
            Some(old_shape) => self.combine_with_existing(doc, old_shape, new_region),
            None => self.commit_without_existing(doc, new_region),
        }

        self.phase = BuilderPhase::Finished;
    }

    fn combine_with_existing(&mut self, doc: &mut Document, old_shape: Shape, new_region: Region) {
        let combined = self.mode.combine(&old_shape.to_region(), &new_region);

        if combined.bounds().is_empty() {
            // keep the old shape on the promoted selection so that undoing
            // the deselect brings back what was there before
            set_built_shape(doc, old_shape);
            doc.kill_selection();
            doc.promote_selection();
            doc.deselect(true);

            info!("{} left nothing selected", self.mode);
            doc.notify(
                "Nothing selected",
                &format!(
                    "As a result of the {} operation, nothing is selected now.",
                    self.mode.to_string().to_lowercase()
                ),
            );
        } else {
            doc.kill_selection();
            set_built_shape(doc, Shape::Region(combined));
            doc.promote_selection();

            info!("selection combined: {}", self.mode);
            let edit = SelectionChangeEdit::new(self.mode.undo_name(), old_shape);
            doc.add_edit(edit.into());
        }
    }

    fn commit_without_existing(&mut self, doc: &mut Document, new_region: Region) {
        if new_region.bounds().is_empty() {
            // nothing was there before, so there is nothing to undo
            doc.deselect(false);
            self.pending = PendingStatus::Active;
            return;
        }

        let shape = Shape::Region(new_region);
        set_built_shape(doc, shape.clone());
        doc.promote_selection();

        let replaced = std::mem::replace(&mut self.pending, PendingStatus::Active);
        match replaced {
            PendingStatus::PendingReplace { replaced } => {
                info!("selection replaced");
                let edit = SelectionChangeEdit::new(self.mode.undo_name(), replaced);
                doc.add_edit(edit.into());
            }
            PendingStatus::Active | PendingStatus::PendingFreeze => {
                info!("new selection created");
                doc.add_edit(NewSelectionEdit::new(shape).into());
            }
        }
    }

    /// Discards an unfinished construction. Safe to call at any time; does
    /// nothing once the builder has finished or was already cancelled.
    ///
    /// A selection frozen by add, subtract or intersect mode is unfrozen. A
    /// selection hidden by replace mode stays hidden.
    pub fn cancel_if_not_finished(&mut self, doc: &mut Document) {
        if self.phase != BuilderPhase::Constructing {
            return;
        }

        if doc.built_selection().is_some() {
            doc.set_built_selection(None);
        }
        if let Some(selection) = doc.selection_mut() {
            if selection.is_alive() && selection.is_frozen() {
                selection.set_frozen(false);
            }
        }

        debug!("selection builder cancelled ({:?})", self.pending);
        self.phase = BuilderPhase::Cancelled;
    }

    fn assert_constructing(&self, operation: &str) {
        assert!(
            self.phase == BuilderPhase::Constructing,
            "{operation}() called on a {:?} selection builder",
            self.phase
        );
    }
}

/// Installs the final shape on the built selection. The shape is already
/// combined, so the canvas clip used while drawing no longer applies.
fn set_built_shape(doc: &mut Document, shape: Shape) {
    match doc.built_selection_mut() {
        Some(built) => {
            built.set_clip(None);
            built.set_shape(shape);
        }
        None => panic!("no built selection"),
    }
}
