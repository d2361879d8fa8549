//! Fading the last pixel edit back toward its "before" state.

use image::RgbaImage;
use log::info;
use thiserror::Error;

use crate::document::Document;
use crate::error::EditError;
use crate::history::{Edit, PartialPixelEdit};
use crate::pixels::PixelBuffer;

#[derive(Debug, Error)]
pub enum FadeError {
    #[error("opacity must be between 0 and 1, got {0}")]
    InvalidOpacity(f32),

    #[error("the last edit cannot be faded")]
    NothingToFade,

    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type FadeResult<T> = Result<T, FadeError>;

/// Mixes `after` over `before`: `opacity` 1 keeps `after`, 0 gives `before`.
pub fn blend(before: &RgbaImage, after: &RgbaImage, opacity: f32) -> RgbaImage {
    let mut out = after.clone();
    for (dst, (b, a)) in out.pixels_mut().zip(before.pixels().zip(after.pixels())) {
        for c in 0..4 {
            let mixed = b.0[c] as f32 + (a.0[c] as f32 - b.0[c] as f32) * opacity;
            dst.0[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Weakens the last edit of the active layer to `opacity`.
///
/// Only a live pixel edit on the active layer can be faded. The fade is
/// itself recorded as an undoable edit named "Fade".
pub fn fade_last_edit(doc: &mut Document, opacity: f32) -> FadeResult<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(FadeError::InvalidOpacity(opacity));
    }

    let active = doc.active_layer_id().ok_or(FadeError::NothingToFade)?;
    let (area, before) = match doc.history().last_edit() {
        Some(Edit::PartialPixel(edit)) if edit.layer() == active && edit.is_alive() => {
            (edit.backup_area(doc)?, edit.backup_image(doc)?)
        }
        _ => return Err(FadeError::NothingToFade),
    };
    if area.is_empty() {
        return Err(FadeError::NothingToFade);
    }

    let after = doc
        .layer(active)?
        .image()
        .read_rect(area)
        .ok_or(FadeError::NothingToFade)?;
    let faded = blend(&before, &after, opacity);

    let edit = PartialPixelEdit::capture("Fade", doc, active, area, false);
    let layer = doc.layer_mut(active)?;
    let image = layer.image_mut();
    if !image.write_rect(area.x, area.y, &faded) {
        return Err(EditError::TargetOutOfBounds {
            rect: area,
            buffer: image.buffer_kind(),
            width: image.width(),
            height: image.height(),
        }
        .into());
    }
    layer.update_icon_image();
    doc.image_changed(active);
    doc.add_edit(edit.into());

    info!("faded last edit to {:.0}%", opacity * 100.0);
    Ok(())
}
