//! container types for attribute data attached to a dataset
//!
//! [`TypedArray`] is the generic, monomorphized container. [`AbstractArray`] erases the
//! element type so that a dataset can hold arrays of different types side by side, and
//! [`ArrayIterator`] / [`ArrayView`] give unchecked, borrow-scoped access to the storage of
//! a single array for inner loops. [`ImageSpans`] walks the rows of a window of a point array
//! and [`AffineArray`] computes its values from a slope and an intercept instead of storing them.

mod abstract_array;
mod affine;
mod iter;
mod spans;
mod structured_field;
mod typed;
mod value;

pub use abstract_array::AbstractArray;
pub use affine::AffineArray;
pub use iter::{ArrayIterator, ArrayView};
pub use spans::{ImageSpans, ImageSpansMut};
pub use typed::{GrowthPolicy, TypedArray};
pub use value::{ArrayValue, DataType, Numeric};

/// Array of strings, one string per value
pub type StringArray = TypedArray<String>;
pub type DoubleArray = TypedArray<f64>;
pub type FloatArray = TypedArray<f32>;
pub type IntArray = TypedArray<i32>;
pub type IdTypeArray = TypedArray<crate::IdType>;
