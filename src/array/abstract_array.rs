use super::{ArrayValue, DataType, TypedArray};
use crate::error::Configuration;
use crate::Error;

/// A [`TypedArray`] of any supported element type
///
/// Datasets hold their arrays in this form so that arrays of different element types can
/// live side by side. Generic code that knows the element type can get the typed array back
/// with [`downcast_ref`](Self::downcast_ref).
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractArray {
    Int8(TypedArray<i8>),
    UInt8(TypedArray<u8>),
    Int16(TypedArray<i16>),
    UInt16(TypedArray<u16>),
    Int32(TypedArray<i32>),
    UInt32(TypedArray<u32>),
    Int64(TypedArray<i64>),
    UInt64(TypedArray<u64>),
    Float32(TypedArray<f32>),
    Float64(TypedArray<f64>),
    String(TypedArray<String>),
}

/// run `$body` with `$inner` bound to the typed array inside `$array`
macro_rules! dispatch {
    ($array:expr, $inner:ident => $body:expr) => {
        match $array {
            AbstractArray::Int8($inner) => $body,
            AbstractArray::UInt8($inner) => $body,
            AbstractArray::Int16($inner) => $body,
            AbstractArray::UInt16($inner) => $body,
            AbstractArray::Int32($inner) => $body,
            AbstractArray::UInt32($inner) => $body,
            AbstractArray::Int64($inner) => $body,
            AbstractArray::UInt64($inner) => $body,
            AbstractArray::Float32($inner) => $body,
            AbstractArray::Float64($inner) => $body,
            AbstractArray::String($inner) => $body,
        }
    };
}

/// run `$body` with both arrays bound to typed arrays of the same element type
macro_rules! dispatch_pair {
    ($left:expr, $right:expr, $l:ident, $r:ident => $body:expr) => {
        match ($left, $right) {
            (AbstractArray::Int8($l), AbstractArray::Int8($r)) => $body,
            (AbstractArray::UInt8($l), AbstractArray::UInt8($r)) => $body,
            (AbstractArray::Int16($l), AbstractArray::Int16($r)) => $body,
            (AbstractArray::UInt16($l), AbstractArray::UInt16($r)) => $body,
            (AbstractArray::Int32($l), AbstractArray::Int32($r)) => $body,
            (AbstractArray::UInt32($l), AbstractArray::UInt32($r)) => $body,
            (AbstractArray::Int64($l), AbstractArray::Int64($r)) => $body,
            (AbstractArray::UInt64($l), AbstractArray::UInt64($r)) => $body,
            (AbstractArray::Float32($l), AbstractArray::Float32($r)) => $body,
            (AbstractArray::Float64($l), AbstractArray::Float64($r)) => $body,
            (AbstractArray::String($l), AbstractArray::String($r)) => $body,
            (l, r) => Err(Configuration::TypeMismatch {
                expected: l.data_type().vtk_name(),
                actual: r.data_type().vtk_name(),
            }
            .into()),
        }
    };
}

impl AbstractArray {
    /// an empty array of element type `data_type`
    pub fn new(data_type: DataType) -> Self {
        match data_type {
            DataType::Int8 => Self::Int8(TypedArray::new()),
            DataType::UInt8 => Self::UInt8(TypedArray::new()),
            DataType::Int16 => Self::Int16(TypedArray::new()),
            DataType::UInt16 => Self::UInt16(TypedArray::new()),
            DataType::Int32 => Self::Int32(TypedArray::new()),
            DataType::UInt32 => Self::UInt32(TypedArray::new()),
            DataType::Int64 => Self::Int64(TypedArray::new()),
            DataType::UInt64 => Self::UInt64(TypedArray::new()),
            DataType::Float32 => Self::Float32(TypedArray::new()),
            DataType::Float64 => Self::Float64(TypedArray::new()),
            DataType::String => Self::String(TypedArray::new()),
        }
    }

    pub fn data_type(&self) -> DataType {
        dispatch!(self, a => a.data_type())
    }

    pub fn name(&self) -> Option<&str> {
        dispatch!(self, a => a.name())
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        dispatch!(self, a => a.set_name(name))
    }

    pub fn number_of_components(&self) -> usize {
        dispatch!(self, a => a.number_of_components())
    }

    pub fn set_number_of_components(&mut self, components: usize) -> Result<(), Error> {
        dispatch!(self, a => a.set_number_of_components(components))
    }

    pub fn number_of_tuples(&self) -> usize {
        dispatch!(self, a => a.number_of_tuples())
    }

    pub fn number_of_values(&self) -> usize {
        dispatch!(self, a => a.number_of_values())
    }

    pub fn set_number_of_tuples(&mut self, tuples: usize) -> Result<(), Error> {
        dispatch!(self, a => a.set_number_of_tuples(tuples))
    }

    pub fn capacity(&self) -> usize {
        dispatch!(self, a => a.capacity())
    }

    pub fn resize(&mut self, tuples: usize) -> Result<(), Error> {
        dispatch!(self, a => a.resize(tuples))
    }

    pub fn reset(&mut self) {
        dispatch!(self, a => a.reset())
    }

    /// the value at flat index `index` read as a float
    ///
    /// Strings are parsed, `Ok(None)` means the value has no numeric interpretation.
    pub fn value_as_f64(&self, index: usize) -> Result<Option<f64>, Error> {
        dispatch!(self, a => a.get_value(index).map(ArrayValue::to_f64))
    }

    /// gather tuples `ids` into `dest`, see [`TypedArray::get_tuples`]
    ///
    /// `dest` must have the same element type as `self`.
    pub fn get_tuples(&self, ids: &[usize], dest: &mut AbstractArray) -> Result<(), Error> {
        dispatch_pair!(self, dest, src, dst => src.get_tuples(ids, dst))
    }

    /// gather the inclusive range `start..=end` into `dest`
    pub fn get_tuples_range(
        &self,
        start: usize,
        end: usize,
        dest: &mut AbstractArray,
    ) -> Result<(), Error> {
        dispatch_pair!(self, dest, src, dst => src.get_tuples_range(start, end, dst))
    }

    /// copy tuple `source_tuple` of `source` into tuple `dest_tuple` of `self`
    pub fn insert_tuple(
        &mut self,
        dest_tuple: usize,
        source_tuple: usize,
        source: &AbstractArray,
    ) -> Result<(), Error> {
        dispatch_pair!(self, source, dst, src => dst.insert_tuple(dest_tuple, source_tuple, src))
    }

    /// an empty array with the same element type, components and name as `self`
    pub fn new_instance(&self) -> Self {
        dispatch!(self, a => AbstractArray::from(a.new_instance()))
    }

    /// every value as little endian bytes
    pub(crate) fn le_bytes(&self) -> Vec<u8> {
        dispatch!(self, a => {
            let mut bytes = Vec::with_capacity(a.number_of_values() * a.data_type().size().unwrap_or(1));
            a.values().iter().for_each(|value| value.extend_le_bytes(&mut bytes));
            bytes
        })
    }

    /// every value in ascii, space separated
    pub(crate) fn ascii(&self) -> String {
        dispatch!(self, a => {
            let mut out = String::new();
            for (index, value) in a.values().iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                value.push_ascii(&mut out);
            }
            out
        })
    }

    pub fn downcast_ref<T: ArrayValue>(&self) -> Option<&TypedArray<T>> {
        T::downcast(self)
    }

    pub fn downcast_mut<T: ArrayValue>(&mut self) -> Option<&mut TypedArray<T>> {
        T::downcast_mut(self)
    }
}

impl<T: ArrayValue> From<TypedArray<T>> for AbstractArray {
    fn from(array: TypedArray<T>) -> Self {
        T::into_abstract(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_round_trip() {
        let typed = TypedArray::<f32>::from_values(vec![1.0, 2.0], 1)
            .unwrap()
            .with_name("pressure");
        let mut array = AbstractArray::from(typed.clone());

        assert_eq!(array.data_type(), DataType::Float32);
        assert_eq!(array.name(), Some("pressure"));
        assert_eq!(array.downcast_ref::<f32>(), Some(&typed));
        assert!(array.downcast_ref::<f64>().is_none());

        array.downcast_mut::<f32>().unwrap().insert_next_value(3.0).unwrap();
        assert_eq!(array.number_of_tuples(), 3);
    }

    #[test]
    fn gather_requires_matching_types() {
        let source = AbstractArray::from(TypedArray::<i32>::from_values(vec![5, 6, 7], 1).unwrap());
        let mut ints = AbstractArray::new(DataType::Int32);
        let mut floats = AbstractArray::new(DataType::Float64);

        source.get_tuples(&[2, 0], &mut ints).unwrap();
        assert_eq!(ints.downcast_ref::<i32>().unwrap().values(), &[7, 5]);

        let err = source.get_tuples(&[0], &mut floats).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(Configuration::TypeMismatch {
                expected: "Int32",
                actual: "Float64"
            })
        ));
    }

    #[test]
    fn values_as_floats() {
        let strings = TypedArray::from_values(vec!["1.5".to_string(), "abc".to_string()], 1).unwrap();
        let array = AbstractArray::from(strings);
        assert_eq!(array.value_as_f64(0).unwrap(), Some(1.5));
        assert_eq!(array.value_as_f64(1).unwrap(), None);
        assert!(array.value_as_f64(2).is_err());
    }

    #[test]
    fn new_instance_keeps_layout() {
        let array = AbstractArray::from(
            TypedArray::<u16>::from_values(vec![1, 2, 3, 4], 2)
                .unwrap()
                .with_name("ids"),
        );
        let empty = array.new_instance();
        assert_eq!(empty.data_type(), DataType::UInt16);
        assert_eq!(empty.number_of_components(), 2);
        assert_eq!(empty.number_of_tuples(), 0);
        assert_eq!(empty.name(), Some("ids"));
    }
}
