//! Geometry-indexed raster cache for indoor-mapping backends.
//!
//! A [`RasterGrid`] stores one scalar per resolution-quantized cell, keyed
//! by world coordinates. It is read and written through arbitrary 2D
//! geometries, grows its backing storage exactly as far as writes require,
//! and round-trips through a compact self-describing binary format.
//!
//! ```rust
//! use geo::polygon;
//! use gridcache::RasterGrid;
//!
//! let mut grid: RasterGrid = RasterGrid::with_resolution(10);
//!
//! let lobby = polygon![(x: 0.0, y: 0.0), (x: 25.0, y: 0.0), (x: 25.0, y: 15.0), (x: 0.0, y: 15.0)];
//! grid.set(lobby.clone(), 5)?;
//!
//! assert_eq!(grid.get(lobby)?, vec![5, 5, 5, 5, 5, 5]);
//! # Ok::<(), gridcache::GridError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod raster;
pub mod render;
pub mod types;
pub mod variant;

pub use codec::{Cell, Header};
pub use config::Config;
pub use error::{GridError, Result};
pub use grid::RasterGrid;
pub use render::{MapBounds, grid_to_image};
pub use types::{CellRect, GridKey};
pub use variant::{GridVariant, Plain};

pub use geo::{Geometry, Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{CellRect, Config, GridError, GridKey, RasterGrid, Result};

    pub use crate::{GridVariant, Plain};

    pub use crate::{MapBounds, grid_to_image};

    pub use geo::{Geometry, Point, Polygon, Rect};
}
