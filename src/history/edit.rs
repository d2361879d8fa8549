use crate::document::Document;
use crate::error::EditResult;

use super::{DeselectEdit, NewSelectionEdit, PartialPixelEdit, SelectionChangeEdit};

/// An entry of the undo/redo history.
#[derive(Debug)]
pub enum Edit {
    PartialPixel(PartialPixelEdit),
    SelectionChange(SelectionChangeEdit),
    NewSelection(NewSelectionEdit),
    Deselect(DeselectEdit),
}

impl Edit {
    pub fn undo(&mut self, doc: &mut Document) -> EditResult<()> {
        match self {
            Edit::PartialPixel(edit) => edit.undo(doc),
            Edit::SelectionChange(edit) => edit.undo(doc),
            Edit::NewSelection(edit) => edit.undo(doc),
            Edit::Deselect(edit) => edit.undo(doc),
        }
    }

    pub fn redo(&mut self, doc: &mut Document) -> EditResult<()> {
        match self {
            Edit::PartialPixel(edit) => edit.redo(doc),
            Edit::SelectionChange(edit) => edit.redo(doc),
            Edit::NewSelection(edit) => edit.redo(doc),
            Edit::Deselect(edit) => edit.redo(doc),
        }
    }

    /// Releases the data held by the entry. It cannot be applied afterwards.
    pub fn die(&mut self) {
        match self {
            Edit::PartialPixel(edit) => edit.die(),
            Edit::SelectionChange(edit) => edit.die(),
            Edit::NewSelection(edit) => edit.die(),
            Edit::Deselect(edit) => edit.die(),
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Edit::PartialPixel(edit) => edit.is_alive(),
            Edit::SelectionChange(edit) => edit.is_alive(),
            Edit::NewSelection(edit) => edit.is_alive(),
            Edit::Deselect(edit) => edit.is_alive(),
        }
    }

    /// Whether the operation behind this entry can be repeated
    pub fn can_repeat(&self) -> bool {
        match self {
            Edit::PartialPixel(edit) => edit.can_repeat(),
            Edit::SelectionChange(_) | Edit::NewSelection(_) | Edit::Deselect(_) => false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Edit::PartialPixel(edit) => edit.name(),
            Edit::SelectionChange(edit) => edit.name(),
            Edit::NewSelection(_) => NewSelectionEdit::NAME,
            Edit::Deselect(_) => DeselectEdit::NAME,
        }
    }
}

impl From<PartialPixelEdit> for Edit {
    fn from(edit: PartialPixelEdit) -> Self {
        Edit::PartialPixel(edit)
    }
}

impl From<SelectionChangeEdit> for Edit {
    fn from(edit: SelectionChangeEdit) -> Self {
        Edit::SelectionChange(edit)
    }
}

impl From<NewSelectionEdit> for Edit {
    fn from(edit: NewSelectionEdit) -> Self {
        Edit::NewSelection(edit)
    }
}

impl From<DeselectEdit> for Edit {
    fn from(edit: DeselectEdit) -> Self {
        Edit::Deselect(edit)
    }
}
