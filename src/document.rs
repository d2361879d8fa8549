use log::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::event::{DocumentEvent, EventBus, EventHandler, HistoryEvent, SelectionEvent};
use crate::geometry::{PixelRect, Region};
use crate::history::{DeselectEdit, Edit, History, HistoryError, HistoryResult};
use crate::layer::{Layer, LayerId};
use crate::selection::{Selection, Shape};

/// An image being edited: its layers, selection and history.
///
/// The document has two selection slots. `selection` is the committed
/// selection; `built_selection` holds the selection a
/// [`SelectionBuilder`](crate::SelectionBuilder) is drawing until it is
/// promoted. A selection is in at most one slot.
#[derive(Debug)]
pub struct Document {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active_layer: usize,
    selection: Option<Selection>,
    built_selection: Option<Selection>,
    history: History,
    config: EditorConfig,
    event_bus: EventBus,
}

impl Document {
    /// A document with a single transparent layer covering the canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, EditorConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: EditorConfig) -> Self {
        Self {
            width,
            height,
            layers: vec![Layer::new("Background", width, height)],
            active_layer: 0,
            selection: None,
            built_selection: None,
            history: History::new(config.history_limit),
            config,
            event_bus: EventBus::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas_bounds(&self) -> PixelRect {
        PixelRect::of_size(self.width, self.height)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ---- layers ----

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Adds a layer on top and makes it active
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        self.layers.push(layer);
        self.active_layer = self.layers.len() - 1;
        id
    }

    pub fn layer(&self, id: LayerId) -> EditResult<&Layer> {
        self.layers
            .iter()
            .find(|l| l.id() == id)
            .ok_or(EditError::UnknownLayer(id))
    }

    pub fn layer_mut(&mut self, id: LayerId) -> EditResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or(EditError::UnknownLayer(id))
    }

    /// Removes a layer. History entries referring to it fail from now on.
    pub fn remove_layer(&mut self, id: LayerId) -> EditResult<Layer> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id() == id)
            .ok_or(EditError::UnknownLayer(id))?;
        let layer = self.layers.remove(index);
        self.active_layer = self.active_layer.min(self.layers.len().saturating_sub(1));
        Ok(layer)
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.get(self.active_layer)
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.active_layer)
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.active_layer().map(Layer::id)
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> EditResult<()> {
        self.active_layer = self
            .layers
            .iter()
            .position(|l| l.id() == id)
            .ok_or(EditError::UnknownLayer(id))?;
        Ok(())
    }

    /// Announces that the pixels of a layer changed
    pub fn image_changed(&self, layer: LayerId) {
        self.emit(DocumentEvent::ImageChanged { layer });
        self.emit(DocumentEvent::LayerIconChanged { layer });
    }

    // ---- selection slots ----

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut Selection> {
        self.selection.as_mut()
    }

    /// Replaces the committed selection. A live selection that gets replaced
    /// is killed.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        if let Some(mut old) = std::mem::replace(&mut self.selection, selection) {
            old.die();
        }
    }

    pub fn built_selection(&self) -> Option<&Selection> {
        self.built_selection.as_ref()
    }

    pub fn built_selection_mut(&mut self) -> Option<&mut Selection> {
        self.built_selection.as_mut()
    }

    /// Replaces the built selection. A live selection that gets replaced
    /// is killed.
    pub fn set_built_selection(&mut self, selection: Option<Selection>) {
        if let Some(mut old) = std::mem::replace(&mut self.built_selection, selection) {
            old.die();
        }
    }

    /// Kills and removes the committed selection, without history.
    pub fn kill_selection(&mut self) {
        self.set_selection(None);
    }

    /// Moves the built selection into the committed slot.
    ///
    /// # Panics
    ///
    /// If there is no built selection, or the committed slot still holds a
    /// live selection.
    pub fn promote_selection(&mut self) {
        let Some(built) = self.built_selection.take() else {
            panic!("no built selection to promote");
        };
        assert!(built.is_alive(), "dead selection");
        assert!(
            self.selection.as_ref().is_none_or(|s| !s.is_alive()),
            "promoting over a live selection"
        );

        let bounds = built.bounds().unwrap_or_default();
        self.selection = Some(built);
        self.emit(DocumentEvent::SelectionChanged(SelectionEvent::Committed {
            bounds,
        }));
    }

    /// Replaces any selection with a new one of the given shape, without
    /// history.
    pub fn create_selection_from_shape(&mut self, shape: Shape) {
        let selection = Selection::new(shape);
        let bounds = selection.bounds().unwrap_or_default();
        self.set_selection(Some(selection));
        self.emit(DocumentEvent::SelectionChanged(SelectionEvent::Committed {
            bounds,
        }));
    }

    /// Removes both the committed and the built selection. With
    /// `add_to_history` the removal of the committed one can be undone.
    pub fn deselect(&mut self, add_to_history: bool) {
        self.set_built_selection(None);

        let Some(mut selection) = self.selection.take() else {
            return;
        };
        if add_to_history {
            match selection.shape() {
                Some(shape) => {
                    let edit = DeselectEdit::new(shape.clone());
                    self.add_edit(edit.into());
                }
                None => warn!("deselecting a dead selection, nothing to record"),
            }
        }
        selection.die();

        info!("selection cleared");
        self.emit(DocumentEvent::SelectionChanged(SelectionEvent::Cleared));
        self.emit(DocumentEvent::Repaint);
    }

    /// Hides or shows the committed selection; `announce` asks the view to
    /// repaint.
    pub fn set_selection_hidden(&mut self, hidden: bool, announce: bool) {
        let Some(selection) = self.selection.as_mut() else {
            return;
        };
        selection.set_hidden(hidden);
        if announce {
            let event = if hidden {
                SelectionEvent::Hidden
            } else {
                SelectionEvent::Shown
            };
            self.emit(DocumentEvent::SelectionChanged(event));
            self.emit(DocumentEvent::Repaint);
        }
    }

    pub fn clip_shape_to_canvas(&self, region: &Region) -> Region {
        region.clip_to(self.canvas_bounds())
    }

    // ---- history ----

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn add_edit(&mut self, edit: Edit) {
        let name = edit.name().to_string();
        let evicted = self.history.push(edit);
        self.emit(DocumentEvent::HistoryChanged(HistoryEvent::Added { name }));
        if evicted > 0 {
            self.emit(DocumentEvent::HistoryChanged(HistoryEvent::Evicted {
                count: evicted,
            }));
        }
    }

    /// Undoes the last edit and returns its name.
    pub fn undo(&mut self) -> HistoryResult<String> {
        let mut edit = self.history.pop_undo().ok_or(HistoryError::NothingToUndo)?;
        let name = edit.name().to_string();
        if let Err(source) = edit.undo(self) {
            warn!("undo of '{}' failed: {}", name, source);
            self.history.push_undo(edit);
            return Err(HistoryError::EditFailed { name, source });
        }
        debug!("undone '{}'", name);
        self.history.push_redo(edit);
        self.emit(DocumentEvent::HistoryChanged(HistoryEvent::Undone {
            name: name.clone(),
        }));
        Ok(name)
    }

    /// Redoes the last undone edit and returns its name.
    pub fn redo(&mut self) -> HistoryResult<String> {
        let mut edit = self.history.pop_redo().ok_or(HistoryError::NothingToRedo)?;
        let name = edit.name().to_string();
        if let Err(source) = edit.redo(self) {
            warn!("redo of '{}' failed: {}", name, source);
            self.history.push_redo(edit);
            return Err(HistoryError::EditFailed { name, source });
        }
        debug!("redone '{}'", name);
        self.history.push_undo(edit);
        self.emit(DocumentEvent::HistoryChanged(HistoryEvent::Redone {
            name: name.clone(),
        }));
        Ok(name)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.emit(DocumentEvent::HistoryChanged(HistoryEvent::Cleared));
    }

    // ---- events ----

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn emit(&self, event: DocumentEvent) {
        self.event_bus.emit(event);
    }

    /// Shows an informational message to the user, unless running headless.
    pub fn notify(&self, title: &str, body: &str) {
        info!("{}: {}", title, body);
        if self.config.headless {
            return;
        }
        self.emit(DocumentEvent::Notice {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
