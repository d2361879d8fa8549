use log::debug;

use crate::document::Document;
use crate::error::{EditError, EditResult};
use crate::event::{DocumentEvent, SelectionEvent};
use crate::selection::Shape;

/// The committed selection changed shape. Undo and redo both swap the
/// current shape with the stored one.
#[derive(Debug)]
pub struct SelectionChangeEdit {
    name: String,
    backup: Option<Shape>,
}

impl SelectionChangeEdit {
    pub fn new(name: impl Into<String>, backup: Shape) -> Self {
        Self {
            name: name.into(),
            backup: Some(backup),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shape that the next undo or redo installs
    pub fn backup_shape(&self) -> Option<&Shape> {
        self.backup.as_ref()
    }

    pub fn undo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.swap_shapes(doc)
    }

    pub fn redo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.swap_shapes(doc)
    }

    pub fn die(&mut self) {
        self.backup = None;
    }

    pub fn is_alive(&self) -> bool {
        self.backup.is_some()
    }

    fn swap_shapes(&mut self, doc: &mut Document) -> EditResult<()> {
        if self.backup.is_none() {
            return Err(EditError::Released {
                name: self.name.clone(),
            });
        }
        let selection = doc
            .selection_mut()
            .filter(|s| s.is_alive())
            .ok_or(EditError::NoSelection)?;

        let current = selection.alive_shape().clone();
        if let Some(backup) = self.backup.replace(current) {
            selection.set_shape(backup);
        }
        let bounds = selection.bounds().unwrap_or_default();

        debug!("'{}': selection shape swapped, bounds now {}", self.name, bounds);
        doc.emit(DocumentEvent::SelectionChanged(SelectionEvent::Modified {
            bounds,
        }));
        Ok(())
    }
}

/// A selection was made where there was none.
#[derive(Debug)]
pub struct NewSelectionEdit {
    shape: Option<Shape>,
}

impl NewSelectionEdit {
    pub const NAME: &'static str = "Create Selection";

    pub fn new(shape: Shape) -> Self {
        Self { shape: Some(shape) }
    }

    pub fn undo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.check_alive()?;
        doc.deselect(false);
        Ok(())
    }

    pub fn redo(&mut self, doc: &mut Document) -> EditResult<()> {
        let shape = self.check_alive()?.clone();
        doc.create_selection_from_shape(shape);
        Ok(())
    }

    pub fn die(&mut self) {
        self.shape = None;
    }

    pub fn is_alive(&self) -> bool {
        self.shape.is_some()
    }

    fn check_alive(&self) -> EditResult<&Shape> {
        self.shape.as_ref().ok_or_else(|| EditError::Released {
            name: Self::NAME.to_string(),
        })
    }
}

/// The selection was removed. Keeps its shape so undo can bring it back.
#[derive(Debug)]
pub struct DeselectEdit {
    backup: Option<Shape>,
}

impl DeselectEdit {
    pub const NAME: &'static str = "Deselect";

    pub fn new(backup: Shape) -> Self {
        Self {
            backup: Some(backup),
        }
    }

    pub fn backup_shape(&self) -> Option<&Shape> {
        self.backup.as_ref()
    }

    pub fn undo(&mut self, doc: &mut Document) -> EditResult<()> {
        let shape = self.check_alive()?.clone();
        doc.create_selection_from_shape(shape);
        Ok(())
    }

    pub fn redo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.check_alive()?;
        doc.deselect(false);
        Ok(())
    }

    pub fn die(&mut self) {
        self.backup = None;
    }

    pub fn is_alive(&self) -> bool {
        self.backup.is_some()
    }

    fn check_alive(&self) -> EditResult<&Shape> {
        self.backup.as_ref().ok_or_else(|| EditError::Released {
            name: Self::NAME.to_string(),
        })
    }
}
