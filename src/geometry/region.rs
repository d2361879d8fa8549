//! Pixel regions stored as scanline spans.
//!
//! A [`Region`] is the set of pixels covered by a selection. Each row keeps a
//! sorted list of half-open, disjoint and non-touching spans, and rows
//! without spans are not stored. Because the layout is canonical, two regions
//! covering the same pixels compare equal.

use std::collections::BTreeMap;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::PixelRect;

/// Horizontal run of pixels `[start, end)` on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOp {
    Or,
    And,
    AMinusB,
}

impl BoolOp {
    fn apply(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BoolOp::Or => in_a || in_b,
            BoolOp::And => in_a && in_b,
            BoolOp::AMinusB => in_a && !in_b,
        }
    }
}

/// An immutable set of pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    rows: BTreeMap<i32, Vec<Span>>,
}

impl Region {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: PixelRect) -> Self {
        let mut rows = BTreeMap::new();
        if !rect.is_empty() {
            for y in rect.y..rect.bottom() {
                rows.insert(
                    y,
                    vec![Span {
                        start: rect.x,
                        end: rect.right(),
                    }],
                );
            }
        }
        Self { rows }
    }

    /// Fills a closed polygon with the even-odd rule. A pixel belongs to the
    /// region when its center lies inside the outline.
    pub fn from_polygon(points: &[Pos2]) -> Self {
        Self::polygon(points, None)
    }

    /// Like [`from_polygon`](Self::from_polygon), but only rows and columns
    /// inside `clip` are ever visited.
    pub fn from_polygon_clipped(points: &[Pos2], clip: PixelRect) -> Self {
        Self::polygon(points, Some(clip))
    }

    /// Ellipse inscribed in `rect`.
    pub fn from_ellipse(rect: PixelRect) -> Self {
        Self::ellipse(rect, None)
    }

    pub fn from_ellipse_clipped(rect: PixelRect, clip: PixelRect) -> Self {
        Self::ellipse(rect, Some(clip))
    }

    fn polygon(points: &[Pos2], clip: Option<PixelRect>) -> Self {
        let mut region = Self::empty();
        if points.len() < 3 {
            return region;
        }

        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let (first_row, last_row) = clip_range(
            (min_y - 0.5).ceil() as i32,
            (max_y - 0.5).ceil() as i32,
            clip.map(|c| (c.y, c.bottom())),
        );
        let columns = clip.map(|c| (c.x, c.right()));

        let mut crossings = Vec::new();
        for y in first_row..last_row {
            let center_y = y as f32 + 0.5;
            crossings.clear();
            for (i, p0) in points.iter().enumerate() {
                let p1 = points[(i + 1) % points.len()];
                let crosses = (p0.y <= center_y && p1.y > center_y)
                    || (p1.y <= center_y && p0.y > center_y);
                if crosses {
                    let t = (center_y - p0.y) / (p1.y - p0.y);
                    crossings.push(p0.x + t * (p1.x - p0.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            let mut spans = Vec::new();
            for pair in crossings.chunks_exact(2) {
                let (start, end) = clip_range(
                    (pair[0] - 0.5).ceil() as i32,
                    (pair[1] - 0.5).ceil() as i32,
                    columns,
                );
                push_span(&mut spans, start, end);
            }
            if !spans.is_empty() {
                region.rows.insert(y, spans);
            }
        }
        region
    }

    fn ellipse(rect: PixelRect, clip: Option<PixelRect>) -> Self {
        let mut region = Self::empty();
        if rect.is_empty() {
            return region;
        }

        let rx = rect.width as f32 / 2.0;
        let ry = rect.height as f32 / 2.0;
        let cx = rect.x as f32 + rx;
        let cy = rect.y as f32 + ry;
        let (first_row, last_row) =
            clip_range(rect.y, rect.bottom(), clip.map(|c| (c.y, c.bottom())));
        let columns = clip.map(|c| (c.x, c.right()));

        for y in first_row..last_row {
            let dy = (y as f32 + 0.5 - cy) / ry;
            let t = 1.0 - dy * dy;
            if t <= 0.0 {
                continue;
            }
            let half_width = rx * t.sqrt();
            let (start, end) = clip_range(
                ((cx - half_width - 0.5).ceil() as i32).max(rect.x),
                ((cx + half_width - 0.5).ceil() as i32).min(rect.right()),
                columns,
            );
            if end > start {
                region.rows.insert(y, vec![Span { start, end }]);
            }
        }
        region
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounding box, [`PixelRect::EMPTY`] for the empty region.
    pub fn bounds(&self) -> PixelRect {
        let (Some((&top, _)), Some((&bottom, _))) =
            (self.rows.first_key_value(), self.rows.last_key_value())
        else {
            return PixelRect::EMPTY;
        };

        let mut left = i32::MAX;
        let mut right = i32::MIN;
        for spans in self.rows.values() {
            if let (Some(first), Some(last)) = (spans.first(), spans.last()) {
                left = left.min(first.start);
                right = right.max(last.end);
            }
        }
        PixelRect::from_corners(left, top, right, bottom + 1)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rows
            .get(&y)
            .is_some_and(|spans| covers(spans, x))
    }

    /// Number of pixels in the region.
    pub fn area(&self) -> u64 {
        self.rows
            .values()
            .flatten()
            .map(|span| span.len() as u64)
            .sum()
    }

    pub fn union(&self, other: &Region) -> Region {
        self.combine(other, BoolOp::Or)
    }

    pub fn intersect(&self, other: &Region) -> Region {
        self.combine(other, BoolOp::And)
    }

    pub fn subtract(&self, other: &Region) -> Region {
        self.combine(other, BoolOp::AMinusB)
    }

    pub fn clip_to(&self, rect: PixelRect) -> Region {
        self.intersect(&Region::from_rect(rect))
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Region {
        let rows = self
            .rows
            .iter()
            .map(|(y, spans)| {
                let moved = spans
                    .iter()
                    .map(|s| Span {
                        start: s.start.saturating_add(dx),
                        end: s.end.saturating_add(dx),
                    })
                    .collect();
                (y.saturating_add(dy), moved)
            })
            .collect();
        Region { rows }
    }

    /// Every span together with its row, top to bottom.
    pub fn spans(&self) -> impl Iterator<Item = (i32, Span)> + '_ {
        self.rows
            .iter()
            .flat_map(|(y, spans)| spans.iter().map(move |s| (*y, *s)))
    }

    fn combine(&self, other: &Region, op: BoolOp) -> Region {
        let mut rows = BTreeMap::new();
        let keys: Vec<i32> = match op {
            BoolOp::Or => {
                let mut keys: Vec<i32> = self.rows.keys().chain(other.rows.keys()).copied().collect();
                keys.sort_unstable();
                keys.dedup();
                keys
            }
            BoolOp::And => self
                .rows
                .keys()
                .filter(|y| other.rows.contains_key(y))
                .copied()
                .collect(),
            BoolOp::AMinusB => self.rows.keys().copied().collect(),
        };

        for y in keys {
            let a = self.rows.get(&y).map(Vec::as_slice).unwrap_or(&[]);
            let b = other.rows.get(&y).map(Vec::as_slice).unwrap_or(&[]);
            let spans = combine_spans(a, b, op);
            if !spans.is_empty() {
                rows.insert(y, spans);
            }
        }
        Region { rows }
    }
}

impl From<PixelRect> for Region {
    fn from(rect: PixelRect) -> Self {
        Region::from_rect(rect)
    }
}

/// Narrows `[start, end)` to `limits` when there are any.
fn clip_range(start: i32, end: i32, limits: Option<(i32, i32)>) -> (i32, i32) {
    match limits {
        Some((lo, hi)) => (start.max(lo), end.min(hi)),
        None => (start, end),
    }
}

fn covers(spans: &[Span], x: i32) -> bool {
    let i = spans.partition_point(|s| s.end <= x);
    spans.get(i).is_some_and(|s| s.start <= x)
}

/// Appends `[start, end)`, merging with the previous span when they touch.
fn push_span(spans: &mut Vec<Span>, start: i32, end: i32) {
    if end <= start {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.end >= start => last.end = last.end.max(end),
        _ => spans.push(Span { start, end }),
    }
}

fn combine_spans(a: &[Span], b: &[Span], op: BoolOp) -> Vec<Span> {
    let mut edges: Vec<i32> = a
        .iter()
        .chain(b)
        .flat_map(|s| [s.start, s.end])
        .collect();
    edges.sort_unstable();
    edges.dedup();

    let mut out = Vec::new();
    for pair in edges.windows(2) {
        let (x0, x1) = (pair[0], pair[1]);
        if op.apply(covers(a, x0), covers(b, x0)) {
            push_span(&mut out, x0, x1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Region {
        Region::from_rect(PixelRect::new(x, y, w, h))
    }

    #[test]
    fn union_of_touching_rects_is_canonical() {
        let merged = rect(0, 0, 2, 2).union(&rect(2, 0, 3, 2));
        assert_eq!(merged, rect(0, 0, 5, 2));
        assert_eq!(merged.area(), 10);
    }

    #[test]
    fn subtract_punches_a_hole() {
        let ring = rect(0, 0, 6, 6).subtract(&rect(2, 2, 2, 2));
        assert_eq!(ring.area(), 32);
        assert!(!ring.contains(2, 2));
        assert!(ring.contains(1, 2));
        assert_eq!(ring.bounds(), PixelRect::new(0, 0, 6, 6));
    }

    #[test]
    fn intersect_keeps_only_overlap() {
        let overlap = rect(0, 0, 10, 10).intersect(&rect(5, 5, 10, 10));
        assert_eq!(overlap, rect(5, 5, 5, 5));
        assert!(rect(0, 0, 2, 2).intersect(&rect(5, 5, 1, 1)).is_empty());
    }

    #[test]
    fn empty_region_has_empty_bounds() {
        assert!(Region::empty().bounds().is_empty());
        assert!(rect(3, 3, 0, 4).is_empty());
    }

    #[test]
    fn polygon_fill_matches_rect() {
        let square = [
            Pos2::new(1.0, 1.0),
            Pos2::new(6.0, 1.0),
            Pos2::new(6.0, 4.0),
            Pos2::new(1.0, 4.0),
        ];
        assert_eq!(Region::from_polygon(&square), rect(1, 1, 5, 3));
    }

    #[test]
    fn triangle_fill_stays_inside_its_bounds() {
        let triangle = [
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(0.0, 10.0),
        ];
        let region = Region::from_polygon(&triangle);
        assert!(region.contains(0, 0));
        assert!(!region.contains(9, 9));
        assert!(PixelRect::new(0, 0, 10, 10).contains_rect(&region.bounds()));
    }

    #[test]
    fn ellipse_is_inside_its_rect() {
        let bounds = PixelRect::new(2, 2, 8, 6);
        let ellipse = Region::from_ellipse(bounds);
        assert!(ellipse.contains(6, 5));
        assert!(!ellipse.contains(2, 2));
        assert!(bounds.contains_rect(&ellipse.bounds()));
    }

    #[test]
    fn clipped_fills_match_clipping_afterwards() {
        let clip = PixelRect::new(0, 0, 20, 10);
        let triangle = [
            Pos2::new(-30.0, -5.0),
            Pos2::new(40.0, 2.0),
            Pos2::new(5.0, 60.0),
        ];
        assert_eq!(
            Region::from_polygon_clipped(&triangle, clip),
            Region::from_polygon(&triangle).clip_to(clip)
        );

        let oval = PixelRect::new(-8, 3, 30, 20);
        assert_eq!(
            Region::from_ellipse_clipped(oval, clip),
            Region::from_ellipse(oval).clip_to(clip)
        );
    }

    #[test]
    fn clipping_bounds_the_work_for_far_away_outlines() {
        let clip = PixelRect::new(0, 0, 20, 10);
        let sliver = [
            Pos2::new(0.0, 0.0),
            Pos2::new(5.0, 0.0),
            Pos2::new(5.0, 1.0e9),
        ];
        let region = Region::from_polygon_clipped(&sliver, clip);
        assert!(clip.contains_rect(&region.bounds()));
        assert!(region.spans().count() <= 10);

        let huge = PixelRect::new(-1_000_000_000, -1_000_000_000, 2_000_000_000, 2_000_000_000);
        assert_eq!(Region::from_ellipse_clipped(huge, clip).bounds().height, 10);
    }

    #[test]
    fn translate_moves_bounds() {
        let moved = rect(0, 0, 3, 3).translate(4, -1);
        assert_eq!(moved.bounds(), PixelRect::new(4, -1, 3, 3));
    }
}
