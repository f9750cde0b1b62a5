//! Rasterization: mapping continuous-space geometry onto discrete cells.

use crate::types::CellRect;
use geo::{BoundingRect, Geometry, PreparedGeometry, Rect, Relate, coord};

/// The cell-space bounding box of a geometry, or `None` for an empty
/// geometry with no extent.
///
/// The minimum corner is floored and the maximum ceiled so the returned
/// rectangle always fully contains the geometry's bounding box.
pub fn cell_bounds(geometry: &Geometry<f64>, resolution: u8) -> Option<CellRect> {
    let rect = geometry.bounding_rect()?;
    Some(CellRect::from_world(
        rect.min().x,
        rect.min().y,
        rect.max().x,
        rect.max().y,
        resolution,
    ))
}

/// Rasterize a geometry onto a grid, returning a row-major boolean mask
/// shaped like the grid rectangle.
///
/// Only cells inside `clip` (intersected with `grid`) are tested; nothing
/// outside the grid is ever marked, so callers that need coverage must grow
/// the grid *before* rasterizing. A cell is marked iff its
/// `resolution x resolution` world square intersects the geometry, with
/// touching-only contact counting.
///
/// The geometry is prepared once per call; the prepared form carries the
/// edge index that makes the per-cell intersection tests tractable and is
/// dropped when the call returns.
pub fn covered_cells(
    geometry: &Geometry<f64>,
    resolution: u8,
    grid: CellRect,
    clip: CellRect,
) -> Vec<bool> {
    let mut mask = vec![false; grid.area()];

    let clip = clip.intersection(&grid);
    if clip.is_empty() {
        return mask;
    }

    let prepared = PreparedGeometry::from(geometry);
    let res = f64::from(resolution);
    let width = grid.width();

    for cy in clip.min_y..clip.max_y {
        let wy = f64::from(cy) * res;
        let row = (cy - grid.min_y) as usize * width;

        for cx in clip.min_x..clip.max_x {
            let wx = f64::from(cx) * res;
            let square = Rect::new(
                coord! { x: wx, y: wy },
                coord! { x: wx + res, y: wy + res },
            )
            .to_polygon();

            if prepared.relate(&square).is_intersects() {
                mask[row + (cx - grid.min_x) as usize] = true;
            }
        }
    }

    mask
}
