//! row by row iteration over the part of a point array that lies in a sub-extent
//!
//! A point array on a structured extent stores its values x fastest, so the values of one
//! `(j, k)` row of a window are contiguous. [`ImageSpans`] and [`ImageSpansMut`] yield those
//! rows as slices, `j` varying fastest and then `k`, using the strides of the whole extent.

use super::{ArrayValue, TypedArray};
use crate::error::Configuration;
use crate::structured::{self, Extent};
use crate::Error;

/// position of every row of a window inside the buffer of the whole extent
#[derive(Debug, Clone, Copy)]
struct SpanLayout {
    first: usize,
    span_len: usize,
    row_stride: usize,
    slice_stride: usize,
    rows_per_slice: usize,
    rows: usize,
}

impl SpanLayout {
    fn new<T: ArrayValue>(
        array: &TypedArray<T>,
        whole: &Extent,
        sub: &Extent,
    ) -> Result<Self, Error> {
        whole.ensure_contains(sub)?;

        let expected = structured::number_of_points(whole);
        if array.number_of_tuples() as i64 != expected {
            return Err(Configuration::TupleCount {
                name: array.name().unwrap_or_default().to_string(),
                expected,
                actual: array.number_of_tuples(),
            }
            .into());
        }

        // both are bounded by the number of tuples, which fits in memory
        let [nx, ny, _] = structured::dimensions_from_extent(whole).map(|d| d as usize);
        let [sx, sy, sz] = structured::dimensions_from_extent(sub).map(|d| d as usize);
        let offset = structured::local_structured_coords(sub.origin(), whole)?.map(|c| c as usize);
        let components = array.number_of_components();

        Ok(Self {
            first: (offset[0] + offset[1] * nx + offset[2] * nx * ny) * components,
            span_len: sx * components,
            row_stride: nx * components,
            slice_stride: nx * ny * components,
            rows_per_slice: sy,
            rows: sy * sz,
        })
    }

    #[inline]
    fn row_start(&self, row: usize) -> usize {
        self.first
            + (row / self.rows_per_slice) * self.slice_stride
            + (row % self.rows_per_slice) * self.row_stride
    }
}

/// Read only rows of a window, see the [module docs](self)
///
/// ```
/// use vtk_core::{Extent, TypedArray};
///
/// let whole = Extent::new(0, 3, 0, 2, 0, 0).unwrap();
/// let sub = Extent::new(1, 2, 1, 2, 0, 0).unwrap();
/// let array = TypedArray::<i32>::from_values((0..12).collect(), 1).unwrap();
///
/// let rows: Vec<&[i32]> = array.spans(&whole, &sub).unwrap().collect();
/// assert_eq!(rows, vec![&[5, 6][..], &[9, 10][..]]);
/// ```
#[derive(Debug, Clone)]
pub struct ImageSpans<'a, T> {
    values: &'a [T],
    layout: SpanLayout,
    row: usize,
}

impl<'a, T> ImageSpans<'a, T> {
    /// number of values in every span: points along x times components
    pub fn span_len(&self) -> usize {
        self.layout.span_len
    }
}

impl<'a, T> Iterator for ImageSpans<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.layout.rows {
            return None;
        }
        let start = self.layout.row_start(self.row);
        self.row += 1;
        Some(&self.values[start..start + self.layout.span_len])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.rows - self.row;
        (left, Some(left))
    }
}

impl<'a, T> ExactSizeIterator for ImageSpans<'a, T> {}

/// Mutable rows of a window, see the [module docs](self)
#[derive(Debug)]
pub struct ImageSpansMut<'a, T> {
    // the part of the buffer after the last span handed out
    rest: &'a mut [T],
    consumed: usize,
    layout: SpanLayout,
    row: usize,
}

impl<'a, T> ImageSpansMut<'a, T> {
    pub fn span_len(&self) -> usize {
        self.layout.span_len
    }
}

impl<'a, T> Iterator for ImageSpansMut<'a, T> {
    type Item = &'a mut [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.layout.rows {
            return None;
        }
        let start = self.layout.row_start(self.row);
        self.row += 1;

        let rest = std::mem::take(&mut self.rest);
        let (_, rest) = rest.split_at_mut(start - self.consumed);
        let (span, rest) = rest.split_at_mut(self.layout.span_len);
        self.rest = rest;
        self.consumed = start + self.layout.span_len;

        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.layout.rows - self.row;
        (left, Some(left))
    }
}

impl<'a, T> ExactSizeIterator for ImageSpansMut<'a, T> {}

impl<T: ArrayValue> TypedArray<T> {
    /// Rows of the window `sub` of a point array defined on `whole`
    ///
    /// `sub` must lie inside `whole` and the array must hold one tuple per point of `whole`.
    pub fn spans(&self, whole: &Extent, sub: &Extent) -> Result<ImageSpans<'_, T>, Error> {
        let layout = SpanLayout::new(self, whole, sub)?;
        Ok(ImageSpans {
            values: self.values(),
            layout,
            row: 0,
        })
    }

    /// mutable version of [`spans`](Self::spans)
    pub fn spans_mut(
        &mut self,
        whole: &Extent,
        sub: &Extent,
    ) -> Result<ImageSpansMut<'_, T>, Error> {
        let layout = SpanLayout::new(self, whole, sub)?;
        Ok(ImageSpansMut {
            rest: self.values_mut(),
            consumed: 0,
            layout,
            row: 0,
        })
    }
}
