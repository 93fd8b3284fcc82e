//! leaf error types
//!
//! Each failure carries the values that caused it. They are collected into the top level
//! [`Error`](crate::Error) enumeration so that callers can use `?` everywhere.

use crate::structured::Extent;
use derive_more::{Constructor, Display};

#[derive(Display, Debug, Clone, PartialEq)]
pub enum InvalidExtent {
    #[display(fmt = "extent {_0} has a minimum larger than its maximum on axis {_1}")]
    Inverted(Extent, usize),
    #[display(fmt = "extent {inner} is not contained in the governing extent {whole}")]
    NotContained { inner: Extent, whole: Extent },
    #[display(
        fmt = "extent {_0} is too large: every axis must hold at most i32::MAX points and the whole extent at most i64::MAX"
    )]
    TooLarge(Extent),
    #[display(
        fmt = "structured dimensions {_0:?} must be positive on every axis and hold at most i64::MAX points"
    )]
    Dimensions([i32; 3]),
}

#[derive(Display, Debug, Clone, PartialEq, Constructor)]
#[display(fmt = "{what} {index} is out of range (valid range is {lower}..={upper})")]
pub struct IndexOutOfRange {
    pub what: &'static str,
    pub index: i64,
    pub lower: i64,
    pub upper: i64,
}

impl IndexOutOfRange {
    /// out of range for a zero based container of `len` items
    pub(crate) fn below(what: &'static str, index: usize, len: usize) -> Self {
        Self::new(what, index as i64, 0, len as i64 - 1)
    }
}

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Configuration {
    #[display(fmt = "number of components must be at least 1")]
    ZeroComponents,
    #[display(
        fmt = "cannot change the number of components from {current} to {requested} while the array holds {tuples} tuples"
    )]
    ComponentsLocked {
        current: usize,
        requested: usize,
        tuples: usize,
    },
    #[display(fmt = "expected {expected} components, got {actual}")]
    ComponentMismatch { expected: usize, actual: usize },
    #[display(fmt = "expected an array of type {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[display(fmt = "array `{name}` has {actual} tuples but the extent requires {expected}")]
    TupleCount {
        name: String,
        expected: i64,
        actual: usize,
    },
    #[display(fmt = "a buffer of {len} values does not divide into tuples of {components}")]
    PartialTuple { len: usize, components: usize },
    #[display(fmt = "tuple range {start}..={end} is inverted")]
    InvertedRange { start: usize, end: usize },
    #[display(fmt = "no array named `{name}`")]
    UnknownArray { name: String },
    #[display(fmt = "the value at index {index} is not representable as {data_type}")]
    Unrepresentable {
        index: usize,
        data_type: &'static str,
    },
}

#[derive(Display, Debug, Clone, PartialEq, Constructor)]
#[display(fmt = "failed to allocate storage for {requested} values")]
pub struct OutOfMemory {
    pub requested: usize,
}

#[derive(Display, Debug, Clone, PartialEq, Constructor)]
#[display(fmt = "could not parse `{input}` as six whitespace separated integers")]
pub struct ParseExtent {
    pub input: String,
}

impl std::error::Error for InvalidExtent {}
impl std::error::Error for IndexOutOfRange {}
impl std::error::Error for Configuration {}
impl std::error::Error for OutOfMemory {}
impl std::error::Error for ParseExtent {}
