use std::collections::VecDeque;

use log::debug;

use super::Edit;

/// Manages the history of edits for undo/redo functionality
#[derive(Debug)]
pub struct History {
    /// Edits that can be undone, oldest first
    undo_stack: VecDeque<Edit>,
    /// Edits that can be redone, most recently undone last
    redo_stack: Vec<Edit>,
    /// Maximum number of undoable edits kept
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

impl History {
    /// Creates a new empty history keeping at most `limit` undoable edits
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Adds an edit that has just been performed.
    ///
    /// Clears the redo stack and evicts the oldest edits beyond the limit.
    /// Discarded edits release their data. Returns how many undoable edits
    /// were evicted.
    pub fn push(&mut self, edit: Edit) -> usize {
        for mut discarded in self.redo_stack.drain(..) {
            discarded.die();
        }

        debug!("history: adding '{}'", edit.name());
        self.undo_stack.push_back(edit);

        let mut evicted = 0;
        while self.undo_stack.len() > self.limit {
            if let Some(mut oldest) = self.undo_stack.pop_front() {
                debug!("history: evicting '{}'", oldest.name());
                oldest.die();
                evicted += 1;
            }
        }
        evicted
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Edit> {
        self.undo_stack.pop_back()
    }

    pub(crate) fn push_undo(&mut self, edit: Edit) {
        self.undo_stack.push_back(edit);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Edit> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_redo(&mut self, edit: Edit) {
        self.redo_stack.push(edit);
    }

    /// Drops the next edit to undo, e.g. after it failed to apply
    pub fn discard_undo(&mut self) -> Option<String> {
        let mut edit = self.undo_stack.pop_back()?;
        edit.die();
        Some(edit.name().to_string())
    }

    /// Drops the next edit to redo
    pub fn discard_redo(&mut self) -> Option<String> {
        let mut edit = self.redo_stack.pop()?;
        edit.die();
        Some(edit.name().to_string())
    }

    /// Returns true if there are edits that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Whether the last performed operation may be repeated
    pub fn can_repeat(&self) -> bool {
        self.last_edit().is_some_and(|edit| edit.is_alive() && edit.can_repeat())
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(Edit::name)
    }

    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(Edit::name)
    }

    /// The next edit to undo
    pub fn last_edit(&self) -> Option<&Edit> {
        self.undo_stack.back()
    }

    /// Names of the undoable edits, oldest first
    pub fn edit_names(&self) -> Vec<String> {
        self.undo_stack.iter().map(|e| e.name().to_string()).collect()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Bytes held by pixel backups
    pub fn memory_usage(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|edit| match edit {
                Edit::PartialPixel(e) => e.memory_size(),
                _ => 0,
            })
            .sum()
    }

    /// Clear the history, releasing every entry
    pub fn clear(&mut self) {
        for mut edit in self.undo_stack.drain(..).chain(self.redo_stack.drain(..)) {
            edit.die();
        }
    }
}
