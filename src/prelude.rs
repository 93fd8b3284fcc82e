//! Common traits and types that are useful for working with `vtk_core`

pub use crate::array::{
    AbstractArray, AffineArray, ArrayIterator, ArrayValue, ArrayView, DataType, GrowthPolicy,
    ImageSpans, ImageSpansMut, Numeric, TypedArray,
};
pub use crate::data::{FieldData, StructuredData};
pub use crate::structured::{self, DataDescription, Extent};
pub use crate::write_vtk::{write_vtk, Encoding};
pub use crate::{Error, IdType};
