use crate::array::{AbstractArray, ArrayValue, ImageSpans, ImageSpansMut};
use crate::error::Configuration;
use crate::structured::{self, Extent};
use crate::{Error, IdType};
use derive_more::Deref;

/// An ordered collection of named arrays
///
/// Arrays are addressed by name, adding an array whose name is already present replaces
/// the old one in place. Unnamed arrays are kept but can only be reached by position.
#[derive(Debug, Clone, Default, PartialEq, Deref)]
pub struct FieldData(Vec<AbstractArray>);

impl FieldData {
    pub fn new() -> Self {
        Self::default()
    }

    /// add `array`, returning the array it replaced (if any)
    pub fn add_array<A: Into<AbstractArray>>(&mut self, array: A) -> Option<AbstractArray> {
        let array = array.into();

        if let Some(name) = array.name() {
            if let Some(index) = self.position(name) {
                return Some(std::mem::replace(&mut self.0[index], array));
            }
        }

        self.0.push(array);
        None
    }

    pub fn array(&self, name: &str) -> Option<&AbstractArray> {
        self.position(name).map(|index| &self.0[index])
    }

    pub fn array_mut(&mut self, name: &str) -> Option<&mut AbstractArray> {
        self.position(name).map(move |index| &mut self.0[index])
    }

    pub fn remove_array(&mut self, name: &str) -> Option<AbstractArray> {
        self.position(name).map(|index| self.0.remove(index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|array| array.name())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|array| array.name() == Some(name))
    }
}

/// A structured dataset: one extent plus the arrays defined on its points and cells
///
/// Every point array holds one tuple per point of the extent and every cell array one tuple
/// per cell, which is checked whenever an array is added.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredData {
    extent: Extent,
    point_data: FieldData,
    cell_data: FieldData,
}

impl StructuredData {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            point_data: FieldData::new(),
            cell_data: FieldData::new(),
        }
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn number_of_points(&self) -> IdType {
        structured::number_of_points(&self.extent)
    }

    pub fn number_of_cells(&self) -> IdType {
        structured::number_of_cells(&self.extent)
    }

    pub fn point_data(&self) -> &FieldData {
        &self.point_data
    }

    pub fn cell_data(&self) -> &FieldData {
        &self.cell_data
    }

    /// add an array with one tuple per point
    pub fn add_point_array<A: Into<AbstractArray>>(
        &mut self,
        array: A,
    ) -> Result<Option<AbstractArray>, Error> {
        let array = array.into();
        check_tuples(&array, self.number_of_points())?;
        Ok(self.point_data.add_array(array))
    }

    /// add an array with one tuple per cell
    pub fn add_cell_array<A: Into<AbstractArray>>(
        &mut self,
        array: A,
    ) -> Result<Option<AbstractArray>, Error> {
        let array = array.into();
        check_tuples(&array, self.number_of_cells())?;
        Ok(self.cell_data.add_array(array))
    }

    /// mutable access to a point array, see [`validate`](Self::validate) after resizing it
    pub fn point_array_mut(&mut self, name: &str) -> Option<&mut AbstractArray> {
        self.point_data.array_mut(name)
    }

    pub fn cell_array_mut(&mut self, name: &str) -> Option<&mut AbstractArray> {
        self.cell_data.array_mut(name)
    }

    /// rows of the point array `name` that lie in `sub`, see [`TypedArray::spans`]
    pub fn point_spans<T: ArrayValue>(
        &self,
        name: &str,
        sub: &Extent,
    ) -> Result<ImageSpans<'_, T>, Error> {
        let array = self.point_data.array(name).ok_or_else(|| unknown(name))?;
        let actual = array.data_type().vtk_name();
        array
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(actual))?
            .spans(&self.extent, sub)
    }

    pub fn point_spans_mut<T: ArrayValue>(
        &mut self,
        name: &str,
        sub: &Extent,
    ) -> Result<ImageSpansMut<'_, T>, Error> {
        let array = self.point_data.array_mut(name).ok_or_else(|| unknown(name))?;
        let actual = array.data_type().vtk_name();
        array
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(actual))?
            .spans_mut(&self.extent, sub)
    }

    pub fn remove_point_array(&mut self, name: &str) -> Option<AbstractArray> {
        self.point_data.remove_array(name)
    }

    pub fn remove_cell_array(&mut self, name: &str) -> Option<AbstractArray> {
        self.cell_data.remove_array(name)
    }

    /// check that every array still matches the extent
    pub fn validate(&self) -> Result<(), Error> {
        let points = self.number_of_points();
        let cells = self.number_of_cells();

        self.point_data
            .iter()
            .try_for_each(|array| check_tuples(array, points))?;
        self.cell_data
            .iter()
            .try_for_each(|array| check_tuples(array, cells))
    }
}

fn unknown(name: &str) -> Error {
    Configuration::UnknownArray {
        name: name.to_string(),
    }
    .into()
}

fn mismatch<T: ArrayValue>(actual: &'static str) -> Error {
    Configuration::TypeMismatch {
        expected: T::DATA_TYPE.vtk_name(),
        actual,
    }
    .into()
}

fn check_tuples(array: &AbstractArray, expected: IdType) -> Result<(), Error> {
    if array.number_of_tuples() as IdType != expected {
        return Err(Configuration::TupleCount {
            name: array.name().unwrap_or_default().to_string(),
            expected,
            actual: array.number_of_tuples(),
        }
        .into());
    }
    Ok(())
}
