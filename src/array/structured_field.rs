//! conversion between point arrays on a structured extent and `ndarray` fields
//!
//! A point array stores its tuples with x varying fastest, then y, then z. The `ndarray`
//! representation is indexed `[[i, j, k, component]]` so that it reads the same way as the
//! extent it lives on.

use super::{Numeric, TypedArray};
use crate::error::Configuration;
use crate::structured::{self, Extent};
use crate::Error;
use ndarray::Array4;

impl<T: Numeric> TypedArray<T> {
    /// Reshape a point array into a `(nx, ny, nz, components)` field over `extent`
    ///
    /// The number of tuples must equal the number of points of the extent.
    pub fn to_ndarray(&self, extent: &Extent) -> Result<Array4<T>, Error> {
        let expected = structured::number_of_points(extent);
        let tuple_count_error = || Configuration::TupleCount {
            name: self.name().unwrap_or_default().to_string(),
            expected,
            actual: self.number_of_tuples(),
        };

        if self.number_of_tuples() as i64 != expected {
            return Err(tuple_count_error().into());
        }

        let [nx, ny, nz] = structured::dimensions_from_extent(extent).map(|d| d as usize);

        let arr = Array4::from_shape_vec(
            (nz, ny, nx, self.number_of_components()),
            self.values().to_vec(),
        )
        .map_err(|_| tuple_count_error())?;

        // the buffer is read in as (z, y, x); swap it around so the first axis is x
        Ok(arr.permuted_axes([2, 1, 0, 3]))
    }

    /// Flatten a `(nx, ny, nz, components)` field into a point array
    pub fn from_ndarray(field: &Array4<T>) -> Result<Self, Error> {
        let (_, _, _, components) = field.dim();

        let values = field
            .view()
            .permuted_axes([2, 1, 0, 3])
            .iter()
            .copied()
            .collect();

        Self::from_values(values, components)
    }
}
