//! History entry that backs up only the pixels an operation touches.
//!
//! Keeping a full copy of the layer for every brush stroke would make the
//! history cost grow with the canvas; a [`PartialPixelEdit`] keeps just the
//! rectangle that is about to change. Undo and redo are the same operation:
//! the stored pixels and the pixels currently in the layer trade places.

use image::RgbaImage;
use log::{debug, error};

use crate::document::Document;
use crate::error::{EditError, EditResult};
use crate::geometry::PixelRect;
use crate::layer::LayerId;
use crate::pixels::PixelBuffer;

#[derive(Debug)]
pub struct PartialPixelEdit {
    name: String,
    layer: LayerId,
    /// In layer image coordinates
    target_rect: PixelRect,
    /// Always exactly `target_rect` sized; `None` once released
    backup: Option<RgbaImage>,
    can_repeat: bool,
}

impl PartialPixelEdit {
    /// Backs up `target_rect` of the layer's image. Must be called before
    /// the pixels are modified.
    ///
    /// # Panics
    ///
    /// If the layer does not exist or `target_rect` is not inside its image.
    pub fn capture(
        name: impl Into<String>,
        doc: &Document,
        layer: LayerId,
        target_rect: PixelRect,
        can_repeat: bool,
    ) -> Self {
        let name = name.into();
        let image = match doc.layer(layer) {
            Ok(layer) => layer.image(),
            Err(err) => panic!("cannot capture '{name}': {err}"),
        };
        let Some(backup) = image.read_rect(target_rect) else {
            panic!(
                "cannot capture '{name}': {target_rect} is outside the {}x{} image",
                image.width(),
                image.height()
            );
        };

        debug!(
            "'{}': backed up {} ({} bytes)",
            name,
            target_rect,
            backup.as_raw().len()
        );
        Self {
            name,
            layer,
            target_rect,
            backup: Some(backup),
            can_repeat,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn target_rect(&self) -> PixelRect {
        self.target_rect
    }

    pub fn can_repeat(&self) -> bool {
        self.can_repeat
    }

    pub fn is_alive(&self) -> bool {
        self.backup.is_some()
    }

    /// Bytes held by the backup
    pub fn memory_size(&self) -> usize {
        self.backup.as_ref().map_or(0, |b| b.as_raw().len())
    }

    pub fn undo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.swap_pixels(doc)
    }

    pub fn redo(&mut self, doc: &mut Document) -> EditResult<()> {
        self.swap_pixels(doc)
    }

    /// Releases the backup. The entry stays as a named tombstone.
    pub fn die(&mut self) {
        self.backup = None;
    }

    fn swap_pixels(&mut self, doc: &mut Document) -> EditResult<()> {
        let Some(backup) = self.backup.as_ref() else {
            return Err(EditError::Released {
                name: self.name.clone(),
            });
        };
        let rect = self.target_rect;

        let layer = doc.layer_mut(self.layer)?;
        let image = layer.image_mut();
        let current = match image.read_rect(rect) {
            Some(current) if image.write_rect(rect.x, rect.y, backup) => current,
            _ => {
                let err = EditError::TargetOutOfBounds {
                    rect,
                    buffer: image.buffer_kind(),
                    width: image.width(),
                    height: image.height(),
                };
                error!(
                    "'{}': cannot swap pixels: rect = {}, backup = {}x{}, image = {}x{}",
                    self.name,
                    rect,
                    backup.width(),
                    backup.height(),
                    image.width(),
                    image.height()
                );
                return Err(err);
            }
        };
        layer.update_icon_image();

        self.backup = Some(current);
        doc.image_changed(self.layer);
        Ok(())
    }

    /// The area of the layer image that [`backup_image`](Self::backup_image)
    /// returns: the whole image, or the part under the selection.
    pub fn backup_area(&self, doc: &Document) -> EditResult<PixelRect> {
        let layer = doc.layer(self.layer)?;
        let image_bounds = layer.image_bounds();
        let area = match doc.selection().and_then(|s| s.bounds()) {
            Some(bounds) => bounds
                .translate(-layer.tx(), -layer.ty())
                .intersect(&image_bounds),
            None => image_bounds,
        };
        Ok(area)
    }

    /// The layer as it looked before the operation.
    ///
    /// Rebuilt at full size from the current image with the backup pasted in,
    /// because consumers compare it against an image of the same size. With
    /// an active selection, only the part under the selection is returned.
    pub fn backup_image(&self, doc: &Document) -> EditResult<RgbaImage> {
        let Some(backup) = self.backup.as_ref() else {
            return Err(EditError::Released {
                name: self.name.clone(),
            });
        };
        let layer = doc.layer(self.layer)?;

        let mut previous = layer.image().clone();
        if !previous.write_rect(self.target_rect.x, self.target_rect.y, backup) {
            return Err(EditError::TargetOutOfBounds {
                rect: self.target_rect,
                buffer: previous.buffer_kind(),
                width: previous.width(),
                height: previous.height(),
            });
        }

        if doc.selection().is_none() {
            return Ok(previous);
        }
        let area = self.backup_area(doc)?;
        previous
            .read_rect(area)
            .ok_or(EditError::TargetOutOfBounds {
                rect: area,
                buffer: previous.buffer_kind(),
                width: previous.width(),
                height: previous.height(),
            })
    }
}
