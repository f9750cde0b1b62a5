//! The geometry-indexed raster grid.

use crate::codec::{self, Cell, HEADER_LEN, Header};
use crate::config::Config;
use crate::error::{GridError, Result};
use crate::raster;
use crate::types::{CellRect, GridKey};
use crate::variant::{GridVariant, Plain};
use bytes::BytesMut;
use geo::Geometry;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A persistent, resolution-quantized 2D grid of cell values, indexed by
/// world-space geometry.
///
/// The grid starts empty (zero cells) and grows exactly as far as writes
/// require: writing through a geometry first extends the backing storage to
/// the union of the current bounds and the geometry's cell bounding box,
/// then assigns the value to every intersected cell. Reads never grow the
/// grid; area outside current coverage simply yields no values.
///
/// World-space point `(wx, wy)` lives in cell
/// `(floor(wx / resolution), floor(wy / resolution))`, offset by the grid
/// origin; the same mapping is used on the read and write paths.
///
/// A grid is not thread-safe for mutation; callers needing shared access
/// must lock externally.
///
/// # Example
///
/// ```rust
/// use geo::polygon;
/// use gridcache::RasterGrid;
///
/// let mut grid: RasterGrid = RasterGrid::with_resolution(10);
/// let area = polygon![(x: 0.0, y: 0.0), (x: 25.0, y: 0.0), (x: 25.0, y: 15.0), (x: 0.0, y: 15.0)];
///
/// grid.set(area.clone(), 5)?;
/// assert_eq!(grid.get(area)?, vec![5, 5, 5, 5, 5, 5]);
/// # Ok::<(), gridcache::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RasterGrid<V: GridVariant = Plain> {
    resolution: u8,
    origin_x: i32,
    origin_y: i32,
    width: usize,
    height: usize,
    data: Vec<V::Cell>,
    meta: V,
    path: Option<PathBuf>,
}

impl<V: GridVariant + Default> RasterGrid<V> {
    /// Create an empty grid with the process-wide default resolution.
    pub fn new() -> Self {
        Self::with_resolution(Config::global().default_resolution)
    }

    /// Create an empty grid with an explicit resolution.
    pub fn with_resolution(resolution: u8) -> Self {
        Self::with_metadata(resolution, V::default())
    }
}

impl<V: GridVariant + Default> Default for RasterGrid<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: GridVariant> RasterGrid<V> {
    /// Create an empty grid carrying explicit variant metadata.
    pub fn with_metadata(resolution: u8, meta: V) -> Self {
        assert!(resolution > 0, "resolution must be greater than zero");

        Self {
            resolution,
            origin_x: 0,
            origin_y: 0,
            width: 0,
            height: 0,
            data: Vec::new(),
            meta,
            path: None,
        }
    }

    /// Load a grid from a file, remembering the path for later [`save`].
    ///
    /// [`save`]: RasterGrid::save
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut grid = Self::read_from(&mut reader)?;
        grid.path = Some(path.to_path_buf());
        debug!(
            "opened grid from {}: {}x{} cells at resolution {}",
            path.display(),
            grid.width,
            grid.height,
            grid.resolution
        );
        Ok(grid)
    }

    /// Decode a grid from a byte stream.
    ///
    /// Fails with [`GridError::VariantMismatch`] if the stream was written
    /// by a different variant, and with [`GridError::UnexpectedEof`] if it
    /// holds fewer cell bytes than the header declares.
    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let header = Header::read_from(reader)?;
        if header.variant_id != V::VARIANT_ID {
            return Err(GridError::VariantMismatch {
                expected: V::VARIANT_ID,
                found: header.variant_id,
            });
        }
        if header.resolution == 0 {
            return Err(GridError::InvalidInput(
                "resolution must be greater than zero".to_string(),
            ));
        }

        let meta = V::read_metadata(reader)?;

        let width = usize::from(header.width);
        let height = usize::from(header.height);
        let data = codec::read_cells(reader, width * height)?;

        Ok(Self {
            resolution: header.resolution,
            origin_x: i32::from(header.origin_x),
            origin_y: i32::from(header.origin_y),
            width,
            height,
            data,
            meta,
            path: None,
        })
    }

    /// Persist to the path this grid was opened from.
    pub fn save(&self) -> Result<()> {
        let path = self.path.clone().ok_or(GridError::MissingFilename)?;
        self.save_to(path)
    }

    /// Persist to an explicit path; the remembered path is unchanged.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        debug!("saved grid to {}", path.display());
        Ok(())
    }

    /// Encode the grid to a byte stream.
    ///
    /// The output is format-stable: encoding a freshly decoded grid
    /// reproduces the input bytes exactly.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        let field = |value: i64, name: &str| -> Result<u16> {
            u16::try_from(value).map_err(|_| {
                GridError::InvalidInput(format!("{name} {value} does not fit the file format"))
            })
        };

        let header = Header {
            variant_id: V::VARIANT_ID,
            resolution: self.resolution,
            origin_x: field(i64::from(self.origin_x), "origin x")?,
            origin_y: field(i64::from(self.origin_y), "origin y")?,
            width: field(self.width as i64, "width")?,
            height: field(self.height as i64, "height")?,
        };

        let mut buf = BytesMut::with_capacity(HEADER_LEN + self.data.len() * V::Cell::WIDTH);
        header.write_to(&mut buf);
        self.meta.write_metadata(&mut buf);
        for &cell in &self.data {
            cell.put_le(&mut buf);
        }

        writer.write_all(&buf)?;
        Ok(())
    }

    /// World-units per cell edge.
    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    /// Cell coordinates of the grid's bottom-left cell.
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True while no cells have been allocated.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major cell values, `width * height` entries.
    pub fn data(&self) -> &[V::Cell] {
        &self.data
    }

    /// Variant metadata carried alongside the cells.
    pub fn metadata(&self) -> &V {
        &self.meta
    }

    /// The path this grid was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The grid's current cell rectangle.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(
            self.origin_x,
            self.origin_y,
            self.origin_x + self.width as i32,
            self.origin_y + self.height as i32,
        )
    }

    /// Grow the backing storage so it covers both the current bounds and
    /// `rect`, preserving every stored value at its world coordinate.
    ///
    /// Growth is exact-fit: the new coverage equals the union rectangle,
    /// never more. Every extending write reallocates the full grid; callers
    /// observing [`bounds`](RasterGrid::bounds) after growth can rely on it
    /// being exactly the union.
    pub fn fit_bounds(&mut self, rect: CellRect) {
        let target = if self.data.is_empty() {
            rect
        } else {
            self.bounds().union(&rect)
        };
        if !self.data.is_empty() && target == self.bounds() {
            return;
        }

        let new_width = target.width();
        let mut data = vec![V::Cell::default(); target.area()];

        if !self.data.is_empty() {
            debug!(
                "growing grid from {:?} to {:?}",
                self.bounds(),
                target
            );
            let dx = (self.origin_x - target.min_x) as usize;
            let dy = (self.origin_y - target.min_y) as usize;
            for row in 0..self.height {
                let src = row * self.width;
                let dst = (dy + row) * new_width + dx;
                data[dst..dst + self.width].copy_from_slice(&self.data[src..src + self.width]);
            }
        }

        self.data = data;
        self.width = new_width;
        self.height = target.height();
        self.origin_x = target.min_x;
        self.origin_y = target.min_y;
    }

    /// The geometry's cell-space bounding box at this grid's resolution,
    /// or `None` for an empty geometry.
    pub fn geometry_bounds(&self, geometry: &Geometry<f64>) -> Option<CellRect> {
        raster::cell_bounds(geometry, self.resolution)
    }

    /// Rasterize a geometry against the current grid, returning a row-major
    /// mask shaped like the data array.
    ///
    /// The candidate region (`bounds`, or the geometry's own cell bounds)
    /// is clipped to the current coverage; this never grows the grid.
    pub fn geometry_cells(&self, geometry: &Geometry<f64>, bounds: Option<CellRect>) -> Vec<bool> {
        let Some(bounds) = bounds.or_else(|| self.geometry_bounds(geometry)) else {
            return vec![false; self.data.len()];
        };
        raster::covered_cells(geometry, self.resolution, self.bounds(), bounds)
    }

    /// Read the stored values under a key.
    ///
    /// For a geometry key: the flattened, unordered values of every covered
    /// cell within the geometry's clipped bounding box. For a range key:
    /// the flattened sub-array of the clamped cell rectangle. Either way an
    /// undersized grid answers with fewer (or no) values, never an error.
    pub fn get(&self, key: impl Into<GridKey>) -> Result<Vec<V::Cell>> {
        match key.into() {
            GridKey::Geometry(geometry) => Ok(self.values_in_geometry(&geometry)),
            GridKey::Range { x, y } => Ok(self.values_in_range(x, y)),
        }
    }

    /// Assign `value` to every cell intersected by the geometry, growing
    /// the grid first so the whole geometry is covered.
    ///
    /// This is the only mutation entry point; range keys are not writable
    /// and fail with [`GridError::UnsupportedKey`].
    pub fn set(&mut self, key: impl Into<GridKey>, value: V::Cell) -> Result<()> {
        match key.into() {
            GridKey::Geometry(geometry) => {
                self.fill_geometry(&geometry, value);
                Ok(())
            }
            GridKey::Range { .. } => Err(GridError::UnsupportedKey("coordinate range")),
        }
    }

    fn values_in_geometry(&self, geometry: &Geometry<f64>) -> Vec<V::Cell> {
        let Some(bounds) = self.geometry_bounds(geometry) else {
            return Vec::new();
        };
        let mask = raster::covered_cells(geometry, self.resolution, self.bounds(), bounds);

        self.data
            .iter()
            .zip(&mask)
            .filter(|&(_, &covered)| covered)
            .map(|(&value, _)| value)
            .collect()
    }

    fn values_in_range(&self, x: Range<f64>, y: Range<f64>) -> Vec<V::Cell> {
        let request = CellRect::from_world(x.start, y.start, x.end, y.end, self.resolution);
        let clipped = request.intersection(&self.bounds());
        if clipped.is_empty() {
            return Vec::new();
        }

        let mut values = Vec::with_capacity(clipped.area());
        for cy in clipped.min_y..clipped.max_y {
            let row = (cy - self.origin_y) as usize * self.width;
            let start = row + (clipped.min_x - self.origin_x) as usize;
            values.extend_from_slice(&self.data[start..start + clipped.width()]);
        }
        values
    }

    fn fill_geometry(&mut self, geometry: &Geometry<f64>, value: V::Cell) {
        let Some(bounds) = self.geometry_bounds(geometry) else {
            return;
        };
        self.fit_bounds(bounds);

        let mask = raster::covered_cells(geometry, self.resolution, self.bounds(), bounds);
        for (cell, &covered) in self.data.iter_mut().zip(&mask) {
            if covered {
                *cell = value;
            }
        }
    }
}
