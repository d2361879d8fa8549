use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::geometry::{to_grid, PixelRect, Region};

/// The outline held by a selection.
///
/// Drawn shapes keep their geometric description so that multi-point tools
/// can keep extending them; combined selections are stored as a plain
/// [`Region`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(PixelRect),
    Ellipse(PixelRect),
    /// Closed outline through the given points.
    Path(Vec<Pos2>),
    Region(Region),
}

impl Shape {
    pub fn empty() -> Self {
        Shape::Region(Region::empty())
    }

    /// The pixels covered by this shape.
    pub fn to_region(&self) -> Region {
        match self {
            Shape::Rect(rect) => Region::from_rect(*rect),
            Shape::Ellipse(rect) => Region::from_ellipse(*rect),
            Shape::Path(points) => Region::from_polygon(points),
            Shape::Region(region) => region.clone(),
        }
    }

    /// The pixels covered by this shape inside `clip`. Rows and columns
    /// outside of it are never rasterized.
    pub fn to_region_clipped(&self, clip: Option<PixelRect>) -> Region {
        let Some(clip) = clip else {
            return self.to_region();
        };
        match self {
            Shape::Rect(rect) => Region::from_rect(rect.intersect(&clip)),
            Shape::Ellipse(rect) => Region::from_ellipse_clipped(*rect, clip),
            Shape::Path(points) => Region::from_polygon_clipped(points, clip),
            Shape::Region(region) => region.clip_to(clip),
        }
    }

    /// Box around the outline, without rasterizing it.
    pub fn outline_bounds(&self) -> PixelRect {
        match self {
            Shape::Rect(rect) | Shape::Ellipse(rect) => *rect,
            Shape::Path(points) if points.len() < 3 => PixelRect::EMPTY,
            Shape::Path(points) => {
                let start = (
                    Pos2::new(f32::INFINITY, f32::INFINITY),
                    Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
                );
                let (min, max) = points
                    .iter()
                    .fold(start, |(min, max), p| (min.min(*p), max.max(*p)));
                PixelRect::from_corners(
                    to_grid(min.x.floor()),
                    to_grid(min.y.floor()),
                    to_grid(max.x.ceil()),
                    to_grid(max.y.ceil()),
                )
            }
            Shape::Region(region) => region.bounds(),
        }
    }
}

impl From<Region> for Shape {
    fn from(region: Region) -> Self {
        Shape::Region(region)
    }
}

impl From<PixelRect> for Shape {
    fn from(rect: PixelRect) -> Self {
        Shape::Rect(rect)
    }
}

/// One pointer event of an interactive selection, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Where the pointer was pressed.
    pub start: Pos2,
    /// Where the pointer is now.
    pub pos: Pos2,
    /// A click places a polygon vertex; a move only drags the rubber band.
    pub click: bool,
}

impl PointerSample {
    pub fn drag(start: Pos2, pos: Pos2) -> Self {
        Self {
            start,
            pos,
            click: false,
        }
    }

    pub fn click(start: Pos2, pos: Pos2) -> Self {
        Self {
            start,
            pos,
            click: true,
        }
    }
}

/// The kind of outline a selection tool draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    /// Freehand outline: every sample adds a point.
    Lasso,
    /// Straight-edged outline: clicks add vertices, moves drag the last one.
    Polygon,
}

impl ShapeKind {
    /// Builds the shape for `sample`, continuing `previous` where the kind
    /// extends an outline point by point.
    pub fn create_shape(&self, sample: &PointerSample, previous: Option<&Shape>) -> Shape {
        match self {
            ShapeKind::Rectangle => Shape::Rect(PixelRect::from_points(sample.start, sample.pos)),
            ShapeKind::Ellipse => Shape::Ellipse(PixelRect::from_points(sample.start, sample.pos)),
            ShapeKind::Lasso => {
                let mut points = previous_points(previous, sample.start);
                points.push(sample.pos);
                Shape::Path(points)
            }
            ShapeKind::Polygon => {
                let mut points = previous_points(previous, sample.start);
                // the last point of an unfinished outline is the rubber band
                if points.len() > 1 {
                    points.pop();
                }
                points.push(sample.pos);
                if sample.click {
                    points.push(sample.pos);
                }
                Shape::Path(points)
            }
        }
    }
}

fn previous_points(previous: Option<&Shape>, start: Pos2) -> Vec<Pos2> {
    match previous {
        Some(Shape::Path(points)) if !points.is_empty() => points.clone(),
        _ => vec![start],
    }
}
