//! Grid variants.
//!
//! A variant bundles everything that distinguishes one grid kind from
//! another in the file format: the variant id byte, the per-cell width, and
//! the metadata block serialized between the header and the cell data. The
//! hooks are resolved statically through the type parameter on
//! [`RasterGrid`](crate::RasterGrid); the codec itself stays a plain data
//! transform with no dynamic dispatch.

use crate::codec::Cell;
use crate::error::Result;
use bytes::BytesMut;
use std::io::Read;

/// A concrete grid kind: cell width, format discriminator, and metadata
/// codec hooks.
///
/// Implementations are typically zero-sized or small value types; the
/// metadata they carry is whatever the variant serializes after the file
/// header. Loading a file whose variant id byte differs from
/// [`GridVariant::VARIANT_ID`] fails hard with
/// [`GridError::VariantMismatch`](crate::GridError::VariantMismatch).
pub trait GridVariant: Sized {
    /// Stored cell value type; fixes the per-cell byte width.
    type Cell: Cell;

    /// Format discriminator written as the first header byte.
    const VARIANT_ID: u8;

    /// Parse the variant's metadata block, positioned directly after the
    /// header. The base variant has none and returns immediately.
    fn read_metadata(reader: &mut impl Read) -> Result<Self>;

    /// Append the variant's metadata block to the scratch buffer.
    fn write_metadata(&self, buf: &mut BytesMut);
}

/// The base grid variant: `u16` cells, variant id 0, no metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl GridVariant for Plain {
    type Cell = u16;

    const VARIANT_ID: u8 = 0;

    fn read_metadata(_reader: &mut impl Read) -> Result<Self> {
        Ok(Plain)
    }

    fn write_metadata(&self, _buf: &mut BytesMut) {}
}
