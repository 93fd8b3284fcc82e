//! Structured grid indexing and typed attribute arrays for vtk style datasets
//!
//! The [`structured`] module converts between `(i, j, k)` coordinates and flat point / cell
//! ids on an [`Extent`]. The [`array`] module holds the attribute storage: a growable,
//! tuple oriented [`TypedArray`], its type-erased form [`AbstractArray`] and the
//! borrow-scoped [`ArrayIterator`] for inner loops. [`StructuredData`] ties the two together
//! and can be written out as an `ImageData` file with [`write_vtk`].
//!
//! ```
//! use vtk_core::{structured, Extent, TypedArray};
//!
//! let extent = Extent::new(0, 3, 0, 2, 0, 1).unwrap();
//! let id = structured::compute_point_id_for_extent(&extent, [1, 2, 1]).unwrap();
//! assert_eq!(id, 1 + 2 * 4 + 1 * 12);
//!
//! let mut velocity = TypedArray::<f64>::with_components(3).unwrap();
//! velocity.insert_next_tuple(&[1.0, 0.0, 0.0]).unwrap();
//! assert_eq!(velocity.number_of_tuples(), 1);
//! ```

pub mod array;
mod data;
pub mod error;
pub mod prelude;
pub mod structured;
mod write_vtk;

pub use array::{AbstractArray, AffineArray, ArrayIterator, ArrayValue, ArrayView, DataType};
pub use array::{GrowthPolicy, ImageSpans, ImageSpansMut};
pub use array::{DoubleArray, FloatArray, IdTypeArray, IntArray, StringArray, TypedArray};
pub use data::{FieldData, StructuredData};
pub use structured::{DataDescription, Extent};
pub use write_vtk::{write_vtk, Encoding};

pub use ndarray;

/// Integer type of point and cell ids
///
/// 64 bits wide so that ids of grids with more than `i32::MAX` points stay exact.
pub type IdType = i64;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid extent: `{0}`")]
    InvalidExtent(#[from] error::InvalidExtent),
    #[error("Index out of range: `{0}`")]
    IndexOutOfRange(#[from] error::IndexOutOfRange),
    #[error("Invalid array configuration: `{0}`")]
    Configuration(#[from] error::Configuration),
    #[error("Allocation failure: `{0}`")]
    OutOfMemory(#[from] error::OutOfMemory),
    #[error("Could not parse extent: `{0}`")]
    ParseExtent(#[from] error::ParseExtent),
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
}
