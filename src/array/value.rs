use super::{AbstractArray, TypedArray};

/// Element type tag of an array, named the way vtk files name them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
}

impl DataType {
    /// the `type` attribute of a `<DataArray>` element
    pub fn vtk_name(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::String => "String",
        }
    }

    /// size of a single value in bytes, `None` for variable length strings
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::String => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.vtk_name())
    }
}

/// A type that can be stored in a [`TypedArray`]
///
/// This is the only place where element types diverge: moving between the generic
/// [`TypedArray`] and the type-erased [`AbstractArray`], and reading a value as a float.
pub trait ArrayValue: Clone + Default + PartialEq + std::fmt::Debug + 'static {
    const DATA_TYPE: DataType;

    fn into_abstract(array: TypedArray<Self>) -> AbstractArray;

    fn downcast(array: &AbstractArray) -> Option<&TypedArray<Self>>;

    fn downcast_mut(array: &mut AbstractArray) -> Option<&mut TypedArray<Self>>;

    /// numeric interpretation of the value, if there is one
    fn to_f64(&self) -> Option<f64>;

    /// append the raw little endian bytes of the value, as stored in a binary vtk file
    fn extend_le_bytes(&self, bytes: &mut Vec<u8>);

    /// append the ascii representation of the value, as stored in an ascii vtk file
    fn push_ascii(&self, out: &mut String);
}

/// Fixed size numeric values
pub trait Numeric: ArrayValue + Copy + PartialOrd + num_traits::NumCast + num_traits::Zero {
    const SIZE: usize;
}

macro_rules! array_value {
    ($ty:ty, $variant:ident, $ascii:expr) => {
        impl ArrayValue for $ty {
            const DATA_TYPE: DataType = DataType::$variant;

            fn into_abstract(array: TypedArray<Self>) -> AbstractArray {
                AbstractArray::$variant(array)
            }

            fn downcast(array: &AbstractArray) -> Option<&TypedArray<Self>> {
                match array {
                    AbstractArray::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn downcast_mut(array: &mut AbstractArray) -> Option<&mut TypedArray<Self>> {
                match array {
                    AbstractArray::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn to_f64(&self) -> Option<f64> {
                num_traits::ToPrimitive::to_f64(self)
            }

            fn extend_le_bytes(&self, bytes: &mut Vec<u8>) {
                bytes.extend_from_slice(&self.to_le_bytes());
            }

            fn push_ascii(&self, out: &mut String) {
                let push = $ascii;
                push(self, out)
            }
        }

        impl Numeric for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
        }
    };
}

macro_rules! integer {
    ($ty:ty, $variant:ident) => {
        array_value!($ty, $variant, |value: &$ty, out: &mut String| {
            out.push_str(&value.to_string())
        });
    };
}

macro_rules! float {
    ($ty:ty, $variant:ident) => {
        // shortest representation that round trips
        array_value!($ty, $variant, |value: &$ty, out: &mut String| {
            let mut buffer = ryu::Buffer::new();
            out.push_str(buffer.format(*value))
        });
    };
}

integer!(i8, Int8);
integer!(u8, UInt8);
integer!(i16, Int16);
integer!(u16, UInt16);
integer!(i32, Int32);
integer!(u32, UInt32);
integer!(i64, Int64);
integer!(u64, UInt64);
float!(f32, Float32);
float!(f64, Float64);

impl ArrayValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn into_abstract(array: TypedArray<Self>) -> AbstractArray {
        AbstractArray::String(array)
    }

    fn downcast(array: &AbstractArray) -> Option<&TypedArray<Self>> {
        match array {
            AbstractArray::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn downcast_mut(array: &mut AbstractArray) -> Option<&mut TypedArray<Self>> {
        match array {
            AbstractArray::String(inner) => Some(inner),
            _ => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        self.trim().parse().ok()
    }

    /// the utf8 bytes followed by a null terminator
    fn extend_le_bytes(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(self.as_bytes());
        bytes.push(0);
    }

    /// every byte as an integer, followed by a terminating `0`
    fn push_ascii(&self, out: &mut String) {
        for byte in self.as_bytes() {
            out.push_str(&byte.to_string());
            out.push(' ');
        }
        out.push('0');
    }
}
