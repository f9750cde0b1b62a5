//! Core value types: cell-space rectangles and accessor keys.

use geo::{Geometry, LineString, Point, Polygon, Rect};
use std::ops::Range;

/// A half-open axis-aligned rectangle in cell coordinates.
///
/// `min` is inclusive, `max` exclusive, so `width()` and `height()` are
/// simple differences and a rectangle with `min == max` is empty. Cell
/// coordinates are signed: geometry below the world origin produces
/// negative cells, even though the file format only stores unsigned
/// origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellRect {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The rectangle covering cells for the world-space box
    /// `(min_x, min_y)..(max_x, max_y)` at the given resolution.
    ///
    /// The minimum corner is floored and the maximum ceiled, so the cell
    /// rectangle always fully contains the world-space box.
    pub fn from_world(min_x: f64, min_y: f64, max_x: f64, max_y: f64, resolution: u8) -> Self {
        let res = f64::from(resolution);
        Self {
            min_x: (min_x / res).floor() as i32,
            min_y: (min_y / res).floor() as i32,
            max_x: (max_x / res).ceil() as i32,
            max_y: (max_y / res).ceil() as i32,
        }
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x).max(0) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y).max(0) as usize
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &CellRect) -> CellRect {
        CellRect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Overlap of `self` and `other`; may be empty.
    pub fn intersection(&self, other: &CellRect) -> CellRect {
        CellRect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        }
    }

    pub fn contains(&self, other: &CellRect) -> bool {
        other.is_empty()
            || (self.min_x <= other.min_x
                && self.min_y <= other.min_y
                && self.max_x >= other.max_x
                && self.max_y >= other.max_y)
    }
}

/// A key accepted by the grid accessors.
///
/// Reads accept both kinds; writes only accept geometries. Anything that is
/// neither is unrepresentable, so the remaining usage error is a write
/// through a range key.
#[derive(Debug, Clone)]
pub enum GridKey {
    /// An arbitrary 2D shape in world coordinates.
    Geometry(Geometry<f64>),
    /// Half-open world-coordinate ranges along each axis.
    Range { x: Range<f64>, y: Range<f64> },
}

impl From<Geometry<f64>> for GridKey {
    fn from(geometry: Geometry<f64>) -> Self {
        GridKey::Geometry(geometry)
    }
}

impl From<Polygon<f64>> for GridKey {
    fn from(polygon: Polygon<f64>) -> Self {
        GridKey::Geometry(Geometry::Polygon(polygon))
    }
}

impl From<Rect<f64>> for GridKey {
    fn from(rect: Rect<f64>) -> Self {
        GridKey::Geometry(Geometry::Rect(rect))
    }
}

impl From<Point<f64>> for GridKey {
    fn from(point: Point<f64>) -> Self {
        GridKey::Geometry(Geometry::Point(point))
    }
}

impl From<LineString<f64>> for GridKey {
    fn from(line: LineString<f64>) -> Self {
        GridKey::Geometry(Geometry::LineString(line))
    }
}

impl From<(Range<f64>, Range<f64>)> for GridKey {
    fn from((x, y): (Range<f64>, Range<f64>)) -> Self {
        GridKey::Range { x, y }
    }
}
