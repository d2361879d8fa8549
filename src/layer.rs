use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::geometry::PixelRect;

/// A stable handle to a layer of a [`Document`](crate::Document).
///
/// History entries keep this instead of a reference, and look the layer up
/// again whenever they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raster layer: an RGBA image placed on the canvas at an offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: LayerId,
    /// Display name of the layer
    pub name: String,
    image: RgbaImage,
    /// Translation of the image relative to the canvas
    tx: i32,
    ty: i32,
    icon_version: u64,
    pub needs_thumbnail_update: bool,
}

impl Layer {
    /// A transparent layer of the given size
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self::from_image(name, RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])))
    }

    pub fn from_image(name: &str, image: RgbaImage) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            image,
            tx: 0,
            ty: 0,
            icon_version: 0,
            needs_thumbnail_update: true,
        }
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Replaces the pixels, e.g. after a canvas resize.
    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = image;
        self.update_icon_image();
    }

    pub fn image_bounds(&self) -> PixelRect {
        PixelRect::of_size(self.image.width(), self.image.height())
    }

    pub fn tx(&self) -> i32 {
        self.tx
    }

    pub fn ty(&self) -> i32 {
        self.ty
    }

    pub fn set_translation(&mut self, tx: i32, ty: i32) {
        self.tx = tx;
        self.ty = ty;
    }

    /// Marks the layer thumbnail as stale
    pub fn update_icon_image(&mut self) {
        self.icon_version += 1;
        self.needs_thumbnail_update = true;
    }

    pub fn icon_version(&self) -> u64 {
        self.icon_version
    }
}
