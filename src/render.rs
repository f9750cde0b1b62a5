//! Diagnostic image export.
//!
//! Renders a grid as an 8-bit grayscale raster covering the *entire* map
//! extent rather than just the grid's own coverage, so successive exports
//! of a growing cache line up pixel-for-pixel.

use crate::codec::Cell;
use crate::grid::RasterGrid;
use crate::variant::GridVariant;
use geo::Rect;
use image::{GrayImage, Luma};

/// The external map-bounds collaborator.
///
/// Image export is the only consumer: it needs the map's global
/// world-space bounding box to size the output raster. A plain
/// [`geo::Rect`] can stand in for a full map model.
pub trait MapBounds {
    /// The map's global world-space bounding box.
    fn max_bounds(&self) -> Rect<f64>;
}

impl MapBounds for Rect<f64> {
    fn max_bounds(&self) -> Rect<f64> {
        *self
    }
}

/// Render a grid into a full-map-extent grayscale image.
///
/// Cell values are linearly normalized into 0-255 using
/// `min(data.min(), 0)` as the floor and `max(data.max(), floor + 0.01)`
/// as the ceiling, so an all-zero grid renders black instead of dividing
/// by zero. The grid is blitted at its own cell offset within the map
/// extent, and the image is flipped vertically: raster row 0 is the top
/// while world row 0 is the bottom.
pub fn grid_to_image<V: GridVariant>(grid: &RasterGrid<V>, map: &impl MapBounds) -> GrayImage {
    let extent = map.max_bounds();
    let res = f64::from(grid.resolution());
    let img_width = ((extent.max().x - extent.min().x) / res).ceil() as u32;
    let img_height = ((extent.max().y - extent.min().y) / res).ceil() as u32;
    let mut image = GrayImage::new(img_width, img_height);

    if grid.is_empty() {
        return image;
    }

    let data = grid.data();
    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;
    for &value in data {
        let value = value.to_f64();
        min_val = min_val.min(value);
        max_val = max_val.max(value);
    }
    let floor = min_val.min(0.0);
    let ceiling = max_val.max(floor + 0.01);
    let scale = 255.0 / (ceiling - floor);

    let (origin_x, origin_y) = grid.origin();
    let offset_x = origin_x - (extent.min().x / res).floor() as i32;
    let offset_y = origin_y - (extent.min().y / res).floor() as i32;

    for row in 0..grid.height() {
        let iy = offset_y + row as i32;
        if iy < 0 || iy >= img_height as i32 {
            continue;
        }
        let y_img = img_height - 1 - iy as u32;

        for col in 0..grid.width() {
            let ix = offset_x + col as i32;
            if ix < 0 || ix >= img_width as i32 {
                continue;
            }

            let value = data[row * grid.width() + col].to_f64();
            let pixel = ((value - floor) * scale).clamp(0.0, 255.0) as u8;
            image.put_pixel(ix as u32, y_img, Luma([pixel]));
        }
    }

    image
}
