//! Rectangular access to pixel buffers, independent of the pixel layout.

use image::{ImageBuffer, Pixel};

use crate::geometry::PixelRect;

/// A 2D pixel buffer that can copy rectangles in and out.
pub trait PixelBuffer: Sized {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn bounds(&self) -> PixelRect {
        PixelRect::of_size(self.width(), self.height())
    }

    fn fits(&self, rect: &PixelRect) -> bool {
        self.bounds().contains_rect(rect)
    }

    /// Copies `rect` into a new buffer of exactly its size. `None` if `rect`
    /// is not inside the buffer.
    fn read_rect(&self, rect: PixelRect) -> Option<Self>;

    /// Writes `src` with its top-left corner at `(x, y)`. Returns `false` and
    /// leaves `self` untouched if `src` does not fit there.
    fn write_rect(&mut self, x: i32, y: i32, src: &Self) -> bool;

    /// Name of the pixel layout, for diagnostics
    fn buffer_kind(&self) -> &'static str;
}

impl<P> PixelBuffer for ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn read_rect(&self, rect: PixelRect) -> Option<Self> {
        if !self.fits(&rect) {
            return None;
        }
        let view = image::imageops::crop_imm(
            self,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
        );
        Some(view.to_image())
    }

    fn write_rect(&mut self, x: i32, y: i32, src: &Self) -> bool {
        let target = PixelRect::new(x, y, src.width() as i32, src.height() as i32);
        if !self.fits(&target) {
            return false;
        }
        image::imageops::replace(self, src, x as i64, y as i64);
        true
    }

    fn buffer_kind(&self) -> &'static str {
        std::any::type_name::<P>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn numbered(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn read_rect_copies_only_the_rect() {
        let image = numbered(8, 6);
        let part = image.read_rect(PixelRect::new(2, 1, 3, 2)).unwrap();
        assert_eq!((part.width(), part.height()), (3, 2));
        assert_eq!(*part.get_pixel(0, 0), Rgba([2, 1, 0, 255]));
        assert_eq!(*part.get_pixel(2, 1), Rgba([4, 2, 0, 255]));
    }

    #[test]
    fn out_of_bounds_access_is_refused() {
        let mut image = numbered(4, 4);
        assert!(image.read_rect(PixelRect::new(2, 2, 3, 3)).is_none());

        let patch = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 9]));
        assert!(!image.write_rect(3, 0, &patch));
        assert_eq!(image, numbered(4, 4));
        assert!(image.write_rect(2, 2, &patch));
        assert_eq!(*image.get_pixel(3, 3), Rgba([9, 9, 9, 9]));
    }
}
