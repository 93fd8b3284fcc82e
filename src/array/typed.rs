use super::{ArrayIterator, ArrayValue, ArrayView, DataType};
use crate::error::{Configuration, IndexOutOfRange, OutOfMemory};
use crate::Error;

/// How the storage of a [`TypedArray`] grows when an insert runs past its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthPolicy {
    /// at least double the capacity on every reallocation
    #[default]
    Doubling,
    /// grow to the next multiple of the given number of values
    Chunked(usize),
}

impl GrowthPolicy {
    fn next_capacity(&self, current: usize, required: usize) -> usize {
        match self {
            Self::Doubling => required.max(current.saturating_mul(2)),
            Self::Chunked(chunk) => {
                let chunk = (*chunk).max(1);
                required.div_ceil(chunk).saturating_mul(chunk)
            }
        }
    }
}

/// A resizable array of tuples stored contiguously, tuple-major
///
/// The array keeps two sizes: the logical number of values and the capacity (every slot of
/// the capacity is initialized, so growing the logical size never exposes uninitialized
/// memory). Appending through the `insert_*` methods grows the capacity following the
/// array's [`GrowthPolicy`], so a sequence of `n` appends costs amortized `O(n)`.
///
/// ## Shape
///
/// Values are addressed either by flat index (`tuple * components + component`) or by tuple
/// index. The number of components defaults to 1 and may only be changed while the array
/// holds no tuples.
///
/// ## Example
///
/// ```
/// use vtk_core::TypedArray;
///
/// let mut velocity = TypedArray::<f64>::with_components(3).unwrap().with_name("velocity");
/// velocity.insert_next_tuple(&[1.0, 0.0, 0.0]).unwrap();
/// velocity.insert_next_tuple(&[0.0, 2.0, 0.0]).unwrap();
///
/// assert_eq!(velocity.number_of_tuples(), 2);
/// assert_eq!(velocity.tuple(1).unwrap(), &[0.0, 2.0, 0.0]);
/// assert_eq!(*velocity.get_value(4).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct TypedArray<T> {
    name: Option<String>,
    buffer: Vec<T>,
    number_of_values: usize,
    components: usize,
    growth: GrowthPolicy,
}

impl<T> Default for TypedArray<T> {
    fn default() -> Self {
        Self {
            name: None,
            buffer: Vec::new(),
            number_of_values: 0,
            components: 1,
            growth: GrowthPolicy::default(),
        }
    }
}

impl<T: ArrayValue> PartialEq for TypedArray<T> {
    // capacity and growth policy are storage details
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.components == other.components
            && self.values() == other.values()
    }
}

impl<T: ArrayValue> TypedArray<T> {
    /// an empty array with a single component
    pub fn new() -> Self {
        Self::default()
    }

    /// an empty array with `components` values per tuple
    pub fn with_components(components: usize) -> Result<Self, Error> {
        let mut array = Self::new();
        array.set_number_of_components(components)?;
        Ok(array)
    }

    /// Wrap an existing buffer. `values.len()` must be a multiple of `components`.
    pub fn from_values(values: Vec<T>, components: usize) -> Result<Self, Error> {
        let mut array = Self::with_components(components)?;
        array.set_array(values)?;
        Ok(array)
    }

    /// an empty array with the same name, components and growth policy as `self`
    pub fn new_instance(&self) -> Self {
        Self {
            name: self.name.clone(),
            buffer: Vec::new(),
            number_of_values: 0,
            components: self.components,
            growth: self.growth,
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_growth_policy(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = Some(name.into());
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn set_growth_policy(&mut self, growth: GrowthPolicy) {
        self.growth = growth;
    }

    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    pub fn number_of_components(&self) -> usize {
        self.components
    }

    /// Set the number of values per tuple
    ///
    /// Changing the layout of an array that already holds tuples would reinterpret its
    /// values, so it is rejected with [`Configuration::ComponentsLocked`]. Call
    /// [`reset`](Self::reset) first to reuse the storage with a new layout.
    pub fn set_number_of_components(&mut self, components: usize) -> Result<(), Error> {
        if components == 0 {
            return Err(Configuration::ZeroComponents.into());
        }

        if components != self.components && self.number_of_tuples() > 0 {
            return Err(Configuration::ComponentsLocked {
                current: self.components,
                requested: components,
                tuples: self.number_of_tuples(),
            }
            .into());
        }

        self.components = components;
        Ok(())
    }

    pub fn number_of_tuples(&self) -> usize {
        self.number_of_values / self.components
    }

    pub fn number_of_values(&self) -> usize {
        self.number_of_values
    }

    /// number of values the array can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.number_of_values == 0
    }

    /// the values in the logical range of the array
    pub fn values(&self) -> &[T] {
        &self.buffer[..self.number_of_values]
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.buffer[..self.number_of_values]
    }

    /// iterate over every tuple as a slice of `components` values
    pub fn tuples(&self) -> std::slice::ChunksExact<'_, T> {
        self.values().chunks_exact(self.components)
    }

    /// a read-write iterator bound to the current storage of this array
    pub fn iterator(&mut self) -> ArrayIterator<'_, T> {
        ArrayIterator::new(self)
    }

    /// a read only view of the current storage of this array
    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView::new(self)
    }

    /// Set the logical number of values
    ///
    /// The capacity grows to exactly `number` if needed, it never shrinks. Values exposed by
    /// growing the logical size are reset to `T::default()`.
    pub fn set_number_of_values(&mut self, number: usize) -> Result<(), Error> {
        if number > self.capacity() {
            self.reallocate(number)?;
        }
        self.set_logical_len(number);
        Ok(())
    }

    /// Set the logical number of tuples, see [`set_number_of_values`](Self::set_number_of_values)
    pub fn set_number_of_tuples(&mut self, tuples: usize) -> Result<(), Error> {
        self.set_number_of_values(self.values_for_tuples(tuples)?)
    }

    /// Reallocate the storage to hold exactly `tuples` tuples
    ///
    /// Values up to the new size are kept and any new slots hold `T::default()` (zero for
    /// numbers, an empty string for strings). The logical size is truncated when the array
    /// shrinks below it, but never grows. Call [`set_number_of_tuples`](Self::set_number_of_tuples)
    /// for that.
    pub fn resize(&mut self, tuples: usize) -> Result<(), Error> {
        let size = self.values_for_tuples(tuples)?;
        self.reallocate(size)?;
        self.number_of_values = self.number_of_values.min(size);
        Ok(())
    }

    /// release all capacity that is not part of the logical size
    pub fn squeeze(&mut self) -> Result<(), Error> {
        self.reallocate(self.number_of_values)
    }

    /// Set the logical size to zero, keeping the capacity
    pub fn reset(&mut self) {
        tracing::trace!(capacity = self.capacity(), "resetting array");
        self.number_of_values = 0;
    }

    /// Adopt `values` as the storage of this array
    ///
    /// The array takes ownership of the buffer, its length becomes both the capacity and the
    /// logical size.
    pub fn set_array(&mut self, values: Vec<T>) -> Result<(), Error> {
        if values.len() % self.components != 0 {
            return Err(Configuration::PartialTuple {
                len: values.len(),
                components: self.components,
            }
            .into());
        }

        self.number_of_values = values.len();
        self.buffer = values;
        Ok(())
    }

    /// Take the storage out of the array, truncated to its logical size
    pub fn into_values(mut self) -> Vec<T> {
        self.buffer.truncate(self.number_of_values);
        self.buffer
    }

    pub fn get_value(&self, index: usize) -> Result<&T, Error> {
        self.values()
            .get(index)
            .ok_or_else(|| IndexOutOfRange::below("value index", index, self.number_of_values).into())
    }

    pub fn get_value_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.number_of_values;
        self.values_mut()
            .get_mut(index)
            .ok_or_else(|| IndexOutOfRange::below("value index", index, len).into())
    }

    /// overwrite an existing value
    pub fn set_value(&mut self, index: usize, value: T) -> Result<(), Error> {
        *self.get_value_mut(index)? = value;
        Ok(())
    }

    /// Write `value` at `index`, growing the array if `index` is past its end
    ///
    /// Any values between the old end and `index` are set to `T::default()`.
    pub fn insert_value(&mut self, index: usize, value: T) -> Result<(), Error> {
        let required = index
            .checked_add(1)
            .ok_or(OutOfMemory::new(usize::MAX))?;
        self.ensure_capacity(required)?;

        if index >= self.number_of_values {
            self.set_logical_len(required);
        }

        self.buffer[index] = value;
        Ok(())
    }

    /// append a value, returning the flat index it was written to
    pub fn insert_next_value(&mut self, value: T) -> Result<usize, Error> {
        let index = self.number_of_values;
        self.insert_value(index, value)?;
        Ok(index)
    }

    pub fn tuple(&self, tuple: usize) -> Result<&[T], Error> {
        let range = self.tuple_range(tuple)?;
        Ok(&self.buffer[range])
    }

    pub fn tuple_mut(&mut self, tuple: usize) -> Result<&mut [T], Error> {
        let range = self.tuple_range(tuple)?;
        Ok(&mut self.buffer[range])
    }

    /// overwrite an existing tuple
    pub fn set_tuple(&mut self, tuple: usize, values: &[T]) -> Result<(), Error> {
        self.check_tuple_width(values.len())?;
        self.tuple_mut(tuple)?.clone_from_slice(values);
        Ok(())
    }

    /// write the tuple `tuple`, growing the array if it is past the end
    pub fn insert_tuple_values(&mut self, tuple: usize, values: &[T]) -> Result<(), Error> {
        self.check_tuple_width(values.len())?;

        let end = tuple
            .checked_add(1)
            .and_then(|tuples| tuples.checked_mul(self.components))
            .ok_or(OutOfMemory::new(usize::MAX))?;
        let start = end - self.components;

        self.ensure_capacity(end)?;
        if end > self.number_of_values {
            self.set_logical_len(end);
        }

        self.buffer[start..end].clone_from_slice(values);
        Ok(())
    }

    /// append a full tuple, returning its tuple index
    pub fn insert_next_tuple(&mut self, values: &[T]) -> Result<usize, Error> {
        let tuple = self.number_of_tuples();
        self.insert_tuple_values(tuple, values)?;
        Ok(tuple)
    }

    /// copy tuple `source_tuple` of `source` into tuple `dest_tuple` of `self`, growing `self`
    pub fn insert_tuple(
        &mut self,
        dest_tuple: usize,
        source_tuple: usize,
        source: &TypedArray<T>,
    ) -> Result<(), Error> {
        self.check_tuple_width(source.components)?;
        let values = source.tuple(source_tuple)?;
        self.insert_tuple_values(dest_tuple, values)
    }

    /// append tuple `source_tuple` of `source`, returning the new tuple index
    pub fn insert_next_tuple_from(
        &mut self,
        source_tuple: usize,
        source: &TypedArray<T>,
    ) -> Result<usize, Error> {
        let tuple = self.number_of_tuples();
        self.insert_tuple(tuple, source_tuple, source)?;
        Ok(tuple)
    }

    /// Gather the tuples `ids` (any order, repeats allowed) into tuples `0..ids.len()` of `dest`
    ///
    /// Every id is validated before `dest` is touched. `dest` grows as needed and keeps any
    /// tuples past `ids.len()`.
    pub fn get_tuples(&self, ids: &[usize], dest: &mut TypedArray<T>) -> Result<(), Error> {
        dest.check_tuple_width(self.components)?;

        let tuples = self.number_of_tuples();
        if let Some(bad) = ids.iter().find(|id| **id >= tuples) {
            return Err(IndexOutOfRange::below("tuple index", *bad, tuples).into());
        }

        for (slot, id) in ids.iter().enumerate() {
            let range = self.tuple_range_unchecked(*id);
            dest.insert_tuple_values(slot, &self.buffer[range])?;
        }

        Ok(())
    }

    /// Gather the inclusive tuple range `start..=end` into tuples `0..=end-start` of `dest`
    pub fn get_tuples_range(
        &self,
        start: usize,
        end: usize,
        dest: &mut TypedArray<T>,
    ) -> Result<(), Error> {
        if start > end {
            return Err(Configuration::InvertedRange { start, end }.into());
        }
        let ids: Vec<usize> = (start..=end).collect();
        self.get_tuples(&ids, dest)
    }

    /// drop the final tuple, if there is one
    pub fn remove_last_tuple(&mut self) {
        let tuples = self.number_of_tuples();
        if tuples > 0 {
            self.number_of_values = (tuples - 1) * self.components;
        }
    }

    /// flat index of the first value equal to `value`
    pub fn lookup_value(&self, value: &T) -> Option<usize> {
        self.values().iter().position(|x| x == value)
    }

    fn values_for_tuples(&self, tuples: usize) -> Result<usize, Error> {
        tuples
            .checked_mul(self.components)
            .ok_or_else(|| OutOfMemory::new(usize::MAX).into())
    }

    fn check_tuple_width(&self, width: usize) -> Result<(), Error> {
        if width != self.components {
            return Err(Configuration::ComponentMismatch {
                expected: self.components,
                actual: width,
            }
            .into());
        }
        Ok(())
    }

    fn tuple_range(&self, tuple: usize) -> Result<std::ops::Range<usize>, Error> {
        let tuples = self.number_of_tuples();
        if tuple >= tuples {
            return Err(IndexOutOfRange::below("tuple index", tuple, tuples).into());
        }
        Ok(self.tuple_range_unchecked(tuple))
    }

    #[inline]
    fn tuple_range_unchecked(&self, tuple: usize) -> std::ops::Range<usize> {
        let start = tuple * self.components;
        start..start + self.components
    }

    /// move the logical end to `len` (within capacity), clearing any newly exposed slots
    fn set_logical_len(&mut self, len: usize) {
        if len > self.number_of_values {
            self.buffer[self.number_of_values..len].fill(T::default());
        }
        self.number_of_values = len;
    }

    fn ensure_capacity(&mut self, required: usize) -> Result<(), Error> {
        if required <= self.capacity() {
            return Ok(());
        }
        let size = self.growth.next_capacity(self.capacity(), required);
        self.reallocate(size)
    }

    /// set the capacity to exactly `size` values
    fn reallocate(&mut self, size: usize) -> Result<(), Error> {
        let old = self.capacity();
        if size == old {
            return Ok(());
        }

        tracing::debug!(
            name = self.name.as_deref().unwrap_or(""),
            data_type = %T::DATA_TYPE,
            old_capacity = old,
            new_capacity = size,
            "reallocating array storage"
        );

        if size < old {
            self.buffer.truncate(size);
            self.buffer.shrink_to_fit();
            return Ok(());
        }

        if self.buffer.try_reserve_exact(size - old).is_err() {
            tracing::error!(
                name = self.name.as_deref().unwrap_or(""),
                requested = size,
                "allocation failed while growing array"
            );
            return Err(OutOfMemory::new(size).into());
        }

        self.buffer.resize(size, T::default());
        Ok(())
    }
}
