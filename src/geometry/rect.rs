use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis-aligned rectangle on the pixel grid.
///
/// `width` and `height` are never negative; a rectangle with either of them
/// equal to zero is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const EMPTY: PixelRect = PixelRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Rectangle spanning `[min_x, max_x) x [min_y, max_y)`, normalized so the
    /// corners may be given in any order.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Snaps two pointer positions to the nearest pixel corners.
    pub fn from_points(a: Pos2, b: Pos2) -> Self {
        Self::from_corners(
            to_grid(a.x.round()),
            to_grid(a.y.round()),
            to_grid(b.x.round()),
            to_grid(b.y.round()),
        )
    }

    /// Smallest pixel rectangle covering an egui rectangle.
    pub fn from_egui(rect: Rect) -> Self {
        if !rect.is_positive() {
            return Self::EMPTY;
        }
        Self::from_corners(
            to_grid(rect.min.x.floor()),
            to_grid(rect.min.y.floor()),
            to_grid(rect.max.x.ceil()),
            to_grid(rect.max.y.ceil()),
        )
    }

    pub fn to_egui(self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.x as f32, self.y as f32),
            Pos2::new(self.right() as f32, self.bottom() as f32),
        )
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True if `other` lies completely inside `self`. An empty `other`
    /// is contained only if its origin is.
    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Overlap of the two rectangles, `EMPTY` if they do not overlap.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Self::EMPTY;
        }
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> PixelRect {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// The `0,0`-anchored rectangle of an image with the given dimensions.
    pub fn of_size(width: u32, height: u32) -> PixelRect {
        Self::new(0, 0, width as i32, height as i32)
    }
}

/// Largest pointer coordinate taken as is. Anything further out is pulled
/// back to it, so the width of any snapped rectangle still fits an `i32`.
pub(crate) const COORD_LIMIT: f32 = (1 << 29) as f32;

/// Converts a whole-numbered coordinate to the pixel grid. NaN maps to 0.
pub(crate) fn to_grid(v: f32) -> i32 {
    v.clamp(-COORD_LIMIT, COORD_LIMIT) as i32
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x={}, y={}, w={}, h={}]",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let rect = PixelRect::from_corners(5, 7, 1, 2);
        assert_eq!(rect, PixelRect::new(1, 2, 4, 5));
    }

    #[test]
    fn extreme_pointer_positions_are_pulled_in() {
        let limit = COORD_LIMIT as i32;
        let rect = PixelRect::from_points(Pos2::new(-10.0, 0.0), Pos2::new(2.2e9, 5.0));
        assert_eq!(rect.x, -10);
        assert_eq!(rect.right(), limit);
        assert_eq!(rect.height, 5);

        let far = PixelRect::from_points(Pos2::new(-3.0e9, f32::NAN), Pos2::new(3.0e9, 3.0e9));
        assert_eq!(far.width, 2 * limit);
        assert_eq!(
            far.intersect(&PixelRect::of_size(20, 10)),
            PixelRect::of_size(20, 10)
        );
    }

    #[test]
    fn edges_saturate_instead_of_overflowing() {
        let rect = PixelRect::new(i32::MAX - 1, 0, 10, 1);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.translate(5, 0).x, i32::MAX);
        assert_eq!(PixelRect::from_corners(i32::MIN, 0, i32::MAX, 1).width, i32::MAX);
    }

    #[test]
    fn intersect_of_disjoint_rects_is_empty() {
        let a = PixelRect::new(0, 0, 4, 4);
        let b = PixelRect::new(4, 0, 4, 4);
        assert!(a.intersect(&b).is_empty());
        assert_eq!(a.intersect(&PixelRect::new(2, 2, 5, 5)), PixelRect::new(2, 2, 2, 2));
    }

    #[test]
    fn contains_rect_checks_all_edges() {
        let outer = PixelRect::of_size(20, 10);
        assert!(outer.contains_rect(&PixelRect::new(2, 2, 4, 4)));
        assert!(!outer.contains_rect(&PixelRect::new(18, 2, 4, 4)));
        assert!(!outer.contains_rect(&PixelRect::new(-1, 0, 2, 2)));
    }

    #[test]
    fn egui_round_trip_keeps_pixel_edges() {
        let rect = PixelRect::new(3, 4, 10, 2);
        assert_eq!(PixelRect::from_egui(rect.to_egui()), rect);
        assert_eq!(PixelRect::from_egui(Rect::NOTHING), PixelRect::EMPTY);
    }
}
