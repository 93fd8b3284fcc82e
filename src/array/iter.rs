//! lightweight typed views over the storage of a [`TypedArray`]
//!
//! Both views borrow the array, so the borrow checker guarantees that the array is not
//! resized, reallocated, or dropped while a view is bound to it. A view never outlives the
//! storage it was initialized with.
//!
//! ## No error reporting
//!
//! Unlike the accessors on [`TypedArray`], the accessors here do not return `Result`. They
//! are meant for per-value inner loops: an index outside of `0..number_of_values()` is a bug
//! in the caller and panics (slice indexing) instead of producing an error.

use super::{ArrayValue, DataType, TypedArray};

/// A read-write view bound to one [`TypedArray`]
///
/// ```
/// use vtk_core::{ArrayIterator, TypedArray};
///
/// let mut array = TypedArray::<f32>::from_values(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// let mut iter = ArrayIterator::new(&mut array);
///
/// iter.tuple_mut(1)[0] = 30.0;
/// iter.set_value(0, 10.0);
///
/// assert_eq!(array.values(), &[10.0, 2.0, 30.0, 4.0]);
/// ```
#[derive(Debug)]
pub struct ArrayIterator<'a, T> {
    values: &'a mut [T],
    components: usize,
}

impl<'a, T> Default for ArrayIterator<'a, T> {
    /// an iterator that is not bound to any array and holds no values
    fn default() -> Self {
        Self {
            values: &mut [],
            components: 1,
        }
    }
}

impl<'a, T: ArrayValue> ArrayIterator<'a, T> {
    pub fn new(array: &'a mut TypedArray<T>) -> Self {
        let components = array.number_of_components();
        Self {
            values: array.values_mut(),
            components,
        }
    }

    /// rebind the iterator to `array`, dropping the previous binding
    pub fn initialize(&mut self, array: &'a mut TypedArray<T>) {
        *self = Self::new(array);
    }

    #[inline]
    pub fn value(&self, index: usize) -> &T {
        &self.values[index]
    }

    #[inline]
    pub fn value_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }

    #[inline]
    pub fn set_value(&mut self, index: usize, value: T) {
        self.values[index] = value;
    }

    /// the values of tuple `tuple`
    #[inline]
    pub fn tuple(&self, tuple: usize) -> &[T] {
        let start = tuple * self.components;
        &self.values[start..start + self.components]
    }

    #[inline]
    pub fn tuple_mut(&mut self, tuple: usize) -> &mut [T] {
        let start = tuple * self.components;
        &mut self.values[start..start + self.components]
    }

    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }

    pub fn number_of_components(&self) -> usize {
        self.components
    }

    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    pub fn as_slice(&self) -> &[T] {
        &*self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.values
    }
}

impl<'a, T> std::ops::Index<usize> for ArrayIterator<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<'a, T> std::ops::IndexMut<usize> for ArrayIterator<'a, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

/// A read only view bound to one [`TypedArray`]
///
/// Any number of views may be bound to the same array at once, including from several
/// threads, as long as none of them mutates it.
#[derive(Debug)]
pub struct ArrayView<'a, T> {
    values: &'a [T],
    components: usize,
}

impl<'a, T> Clone for ArrayView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ArrayView<'a, T> {}

impl<'a, T: ArrayValue> ArrayView<'a, T> {
    pub fn new(array: &'a TypedArray<T>) -> Self {
        Self {
            values: array.values(),
            components: array.number_of_components(),
        }
    }

    #[inline]
    pub fn value(&self, index: usize) -> &'a T {
        &self.values[index]
    }

    #[inline]
    pub fn tuple(&self, tuple: usize) -> &'a [T] {
        let start = tuple * self.components;
        &self.values[start..start + self.components]
    }

    pub fn tuples(&self) -> std::slice::ChunksExact<'a, T> {
        self.values.chunks_exact(self.components)
    }

    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }

    pub fn number_of_components(&self) -> usize {
        self.components
    }

    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.values
    }
}

impl<'a, T> std::ops::Index<usize> for ArrayView<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}
