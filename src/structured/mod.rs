//! # Structured index arithmetic
//!
//! Conversions between linear point / cell ids, `(i, j, k)` structured coordinates, and
//! extents of a structured grid. Points are numbered with `i` varying fastest, then `j`, then
//! `k`, the same order the data arrays of a vtk file are written in.
//!
//! Every function here is pure. Coordinates and ids outside of the governing extent are
//! rejected with an [`IndexOutOfRange`](crate::error::IndexOutOfRange) error; nothing is
//! clamped or wrapped.
//!
//! ## Degenerate axes and cells
//!
//! An axis with `start == end` contributes one point, and also exactly one slab of cells.
//! A `{0 4 0 4 0 0}` plane therefore has `4 * 4 * 1` cells rather than zero.
//!
//! ## Overflow
//!
//! Every product of two or more axis lengths is computed in `i64` so that grids with more
//! than `i32::MAX` points (a `2048^3` volume, for instance) are numbered correctly.

mod description;
mod extent;

pub use description::DataDescription;
pub use extent::Extent;

use crate::error::IndexOutOfRange;
use crate::{Error, IdType};

/// number of points along each axis: `end - start + 1`
pub fn dimensions_from_extent(extent: &Extent) -> [i32; 3] {
    // `Extent` guarantees every axis holds at most i32::MAX points
    [0, 1, 2].map(|axis| (extent.span(axis) + 1) as i32)
}

/// number of cells along each axis
///
/// A non-degenerate axis has `end - start` cells, a degenerate axis has one.
pub fn cell_dimensions_from_extent(extent: &Extent) -> [i32; 3] {
    [0, 1, 2].map(|axis| extent.span(axis).max(1) as i32)
}

/// cell counts for a grid of point dimensions `dims`
fn cell_dimensions_from_point_dimensions(dims: [i32; 3]) -> [i32; 3] {
    dims.map(|d| (d - 1).max(1))
}

pub fn data_description(extent: &Extent) -> DataDescription {
    DataDescription::from_extent(extent)
}

/// total number of points in the extent
pub fn number_of_points(extent: &Extent) -> IdType {
    product(dimensions_from_extent(extent))
}

/// total number of cells in the extent
pub fn number_of_cells(extent: &Extent) -> IdType {
    product(cell_dimensions_from_extent(extent))
}

#[inline]
fn product(dims: [i32; 3]) -> IdType {
    dims[0] as IdType * dims[1] as IdType * dims[2] as IdType
}

#[inline]
fn linear_id(ijk: [i32; 3], dims: [i32; 3]) -> IdType {
    let nx = dims[0] as IdType;
    let nxy = nx * dims[1] as IdType;
    ijk[0] as IdType + ijk[1] as IdType * nx + ijk[2] as IdType * nxy
}

#[inline]
fn structured_coords(id: IdType, dims: [i32; 3]) -> [i32; 3] {
    let nx = dims[0] as IdType;
    let nxy = nx * dims[1] as IdType;

    let k = id / nxy;
    let rest = id % nxy;
    let j = rest / nx;
    let i = rest % nx;

    [i as i32, j as i32, k as i32]
}

/// dimensions must be positive and their product must fit an `IdType`
fn check_dimensions(dims: [i32; 3]) -> Result<(), Error> {
    let total = IdType::from(dims[0])
        .checked_mul(IdType::from(dims[1]))
        .and_then(|p| p.checked_mul(IdType::from(dims[2])));

    if dims.iter().any(|d| *d < 1) || total.is_none() {
        return Err(crate::error::InvalidExtent::Dimensions(dims).into());
    }
    Ok(())
}

/// `a - b` per axis, widened so that it cannot overflow
#[inline]
fn difference(a: [i32; 3], b: [i32; 3]) -> [i64; 3] {
    [0, 1, 2].map(|axis| i64::from(a[axis]) - i64::from(b[axis]))
}

/// every component of `ijk` must lie in `[0, upper)`, returns `ijk` narrowed back to `i32`
fn check_local_coords(
    what: &'static str,
    ijk: [i64; 3],
    upper: [i32; 3],
) -> Result<[i32; 3], Error> {
    for axis in 0..3 {
        if ijk[axis] < 0 || ijk[axis] >= i64::from(upper[axis]) {
            return Err(
                IndexOutOfRange::new(what, ijk[axis], 0, i64::from(upper[axis]) - 1).into(),
            );
        }
    }
    Ok(ijk.map(|c| c as i32))
}

fn check_id(what: &'static str, id: IdType, count: IdType) -> Result<(), Error> {
    if id < 0 || id >= count {
        return Err(IndexOutOfRange::new(what, id, 0, count - 1).into());
    }
    Ok(())
}

/// Point id of `ijk` in a grid of `dims` points per axis, with the first point at `(0, 0, 0)`
pub fn compute_point_id(dims: [i32; 3], ijk: [i32; 3]) -> Result<IdType, Error> {
    check_dimensions(dims)?;
    check_local_coords("point coordinate", ijk.map(i64::from), dims)?;
    Ok(linear_id(ijk, dims))
}

/// inverse of [`compute_point_id`]
pub fn compute_point_structured_coords(id: IdType, dims: [i32; 3]) -> Result<[i32; 3], Error> {
    check_dimensions(dims)?;
    check_id("point id", id, product(dims))?;
    Ok(structured_coords(id, dims))
}

/// Cell id of the cell `ijk` in a grid of `dims` **points** per axis
///
/// The cell counts are derived from the point counts, with degenerate axes holding a single
/// cell.
pub fn compute_cell_id(dims: [i32; 3], ijk: [i32; 3]) -> Result<IdType, Error> {
    check_dimensions(dims)?;
    let cell_dims = cell_dimensions_from_point_dimensions(dims);
    check_local_coords("cell coordinate", ijk.map(i64::from), cell_dims)?;
    Ok(linear_id(ijk, cell_dims))
}

/// inverse of [`compute_cell_id`]
pub fn compute_cell_structured_coords(id: IdType, dims: [i32; 3]) -> Result<[i32; 3], Error> {
    check_dimensions(dims)?;
    let cell_dims = cell_dimensions_from_point_dimensions(dims);
    check_id("cell id", id, product(cell_dims))?;
    Ok(structured_coords(id, cell_dims))
}

/// convert a global `(i, j, k)` into one relative to the extent origin
///
/// Fails if the point does not lie inside the extent.
pub fn local_structured_coords(global: [i32; 3], extent: &Extent) -> Result<[i32; 3], Error> {
    let local = difference(global, extent.origin());
    check_local_coords("point coordinate", local, dimensions_from_extent(extent))
}

/// convert an `(i, j, k)` relative to the extent origin into a global one
pub fn global_structured_coords(local: [i32; 3], extent: &Extent) -> Result<[i32; 3], Error> {
    check_local_coords("point coordinate", local.map(i64::from), dimensions_from_extent(extent))?;
    let origin = extent.origin();
    Ok([0, 1, 2].map(|axis| local[axis] + origin[axis]))
}

/// point id of the global coordinate `ijk` inside `extent`
pub fn compute_point_id_for_extent(extent: &Extent, ijk: [i32; 3]) -> Result<IdType, Error> {
    let local = local_structured_coords(ijk, extent)?;
    Ok(linear_id(local, dimensions_from_extent(extent)))
}

/// global coordinate of the point `id` inside `extent`
pub fn compute_point_structured_coords_for_extent(
    id: IdType,
    extent: &Extent,
) -> Result<[i32; 3], Error> {
    let local = compute_point_structured_coords(id, dimensions_from_extent(extent))?;
    let origin = extent.origin();
    Ok([0, 1, 2].map(|axis| local[axis] + origin[axis]))
}

/// cell id of the global cell coordinate `ijk` inside `extent`
pub fn compute_cell_id_for_extent(extent: &Extent, ijk: [i32; 3]) -> Result<IdType, Error> {
    let cell_dims = cell_dimensions_from_extent(extent);
    let local = check_local_coords("cell coordinate", difference(ijk, extent.origin()), cell_dims)?;
    Ok(linear_id(local, cell_dims))
}

/// global cell coordinate of the cell `id` inside `extent`
pub fn compute_cell_structured_coords_for_extent(
    id: IdType,
    extent: &Extent,
) -> Result<[i32; 3], Error> {
    let cell_dims = cell_dimensions_from_extent(extent);
    check_id("cell id", id, product(cell_dims))?;
    let local = structured_coords(id, cell_dims);
    let origin = extent.origin();
    Ok([0, 1, 2].map(|axis| local[axis] + origin[axis]))
}

/// Point id, in the numbering of `whole`, of the point `local` of a window `sub`
///
/// `local` is relative to the origin of `sub`, which must be contained in `whole`. This is
/// how a streamed piece addresses arrays that cover the entire grid.
pub fn compute_point_id_for_sub_extent(
    sub: &Extent,
    whole: &Extent,
    local: [i32; 3],
) -> Result<IdType, Error> {
    whole.ensure_contains(sub)?;
    let global = global_structured_coords(local, sub)?;
    compute_point_id_for_extent(whole, global)
}

/// inverse of [`compute_point_id_for_sub_extent`]
///
/// Fails if the point `id` of `whole` lies outside the window `sub`.
pub fn compute_point_structured_coords_for_sub_extent(
    id: IdType,
    sub: &Extent,
    whole: &Extent,
) -> Result<[i32; 3], Error> {
    whole.ensure_contains(sub)?;
    let global = compute_point_structured_coords_for_extent(id, whole)?;
    local_structured_coords(global, sub)
}

/// Cell id, in the numbering of `whole`, of the cell `local` of a window `sub`
///
/// A window that is degenerate on an axis where `whole` is not has a single cell slab whose
/// index is the window's start on that axis. When the window sits on the upper face of
/// `whole` (`z = [9, 9]` inside `z = [0, 9]`) there is no such cell in `whole`, and the
/// conversion fails with [`IndexOutOfRange`](crate::error::IndexOutOfRange).
pub fn compute_cell_id_for_sub_extent(
    sub: &Extent,
    whole: &Extent,
    local: [i32; 3],
) -> Result<IdType, Error> {
    whole.ensure_contains(sub)?;
    check_local_coords("cell coordinate", local.map(i64::from), cell_dimensions_from_extent(sub))?;
    let origin = sub.origin();
    let global = [0, 1, 2].map(|axis| local[axis] + origin[axis]);
    compute_cell_id_for_extent(whole, global)
}

/// inverse of [`compute_cell_id_for_sub_extent`]
pub fn compute_cell_structured_coords_for_sub_extent(
    id: IdType,
    sub: &Extent,
    whole: &Extent,
) -> Result<[i32; 3], Error> {
    whole.ensure_contains(sub)?;
    let global = compute_cell_structured_coords_for_extent(id, whole)?;
    let local = difference(global, sub.origin());
    check_local_coords("cell coordinate", local, cell_dimensions_from_extent(sub))
}

/// Point ids (relative to `extent`) of the corners of cell `cell_id`
///
/// Points are listed with `i` varying fastest, then `j`, then `k`: one id for a vertex, two
/// for a line, four for a pixel and eight for a voxel.
pub fn get_cell_points(cell_id: IdType, extent: &Extent) -> Result<Vec<IdType>, Error> {
    let cell_dims = cell_dimensions_from_extent(extent);
    check_id("cell id", cell_id, product(cell_dims))?;

    let cell = structured_coords(cell_id, cell_dims);
    let dims = dimensions_from_extent(extent);
    let description = data_description(extent);

    // a degenerate axis spans a single point, every other axis spans two
    let span = [0, 1, 2].map(|axis| if extent.is_degenerate(axis) { 0 } else { 1 });

    let mut points = Vec::with_capacity(description.points_per_cell());
    for dk in 0..=span[2] {
        for dj in 0..=span[1] {
            for di in 0..=span[0] {
                let ijk = [cell[0] + di, cell[1] + dj, cell[2] + dk];
                points.push(linear_id(ijk, dims));
            }
        }
    }

    Ok(points)
}

/// Cell ids (relative to `extent`) of every cell that uses point `point_id`, ascending
pub fn get_point_cells(point_id: IdType, extent: &Extent) -> Result<Vec<IdType>, Error> {
    let dims = dimensions_from_extent(extent);
    check_id("point id", point_id, product(dims))?;

    let point = structured_coords(point_id, dims);
    let cell_dims = cell_dimensions_from_extent(extent);

    // candidate cell coordinates along one axis
    let candidates = |axis: usize| -> Vec<i32> {
        if extent.is_degenerate(axis) {
            return vec![0];
        }
        [point[axis] - 1, point[axis]]
            .into_iter()
            .filter(|c| *c >= 0 && *c < cell_dims[axis])
            .collect()
    };

    let (ci, cj, ck) = (candidates(0), candidates(1), candidates(2));

    let mut cells = Vec::with_capacity(ci.len() * cj.len() * ck.len());
    for k in &ck {
        for j in &cj {
            for i in &ci {
                cells.push(linear_id([*i, *j, *k], cell_dims));
            }
        }
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(e: [i32; 6]) -> Extent {
        Extent::from_array(e).unwrap()
    }

    #[test]
    fn point_ids_known_values() {
        let dims = [3, 4, 5];
        assert_eq!(compute_point_id(dims, [0, 0, 0]).unwrap(), 0);
        assert_eq!(compute_point_id(dims, [1, 0, 0]).unwrap(), 1);
        assert_eq!(compute_point_id(dims, [0, 1, 0]).unwrap(), 3);
        assert_eq!(compute_point_id(dims, [0, 0, 1]).unwrap(), 12);
        assert_eq!(compute_point_id(dims, [2, 3, 4]).unwrap(), 59);
    }

    #[test]
    fn cell_ids_known_values() {
        // 2 x 3 x 4 cells
        let dims = [3, 4, 5];
        assert_eq!(compute_cell_id(dims, [1, 0, 0]).unwrap(), 1);
        assert_eq!(compute_cell_id(dims, [0, 1, 0]).unwrap(), 2);
        assert_eq!(compute_cell_id(dims, [0, 0, 1]).unwrap(), 6);
        assert_eq!(compute_cell_id(dims, [1, 2, 3]).unwrap(), 23);
        assert!(compute_cell_id(dims, [2, 0, 0]).is_err());
    }

    #[test]
    fn degenerate_axis_has_one_cell() {
        let plane = ext([0, 4, 0, 4, 0, 0]);
        assert_eq!(cell_dimensions_from_extent(&plane), [4, 4, 1]);
        assert_eq!(number_of_cells(&plane), 16);
        assert_eq!(number_of_points(&plane), 25);

        let point = ext([2, 2, 2, 2, 2, 2]);
        assert_eq!(number_of_cells(&point), 1);
        assert_eq!(number_of_points(&point), 1);
    }

    #[test]
    fn out_of_range_rejected() {
        let e = ext([1, 3, 1, 3, 1, 3]);
        assert!(compute_point_id_for_extent(&e, [0, 1, 1]).is_err());
        assert!(compute_point_id_for_extent(&e, [4, 1, 1]).is_err());
        assert!(compute_point_structured_coords_for_extent(27, &e).is_err());
        assert!(compute_point_structured_coords_for_extent(-1, &e).is_err());
        assert!(compute_cell_structured_coords_for_extent(8, &e).is_err());
    }

    #[test]
    fn extent_origin_offsets() {
        let e = ext([10, 12, -1, 1, 5, 5]);
        assert_eq!(compute_point_id_for_extent(&e, [10, -1, 5]).unwrap(), 0);
        assert_eq!(compute_point_id_for_extent(&e, [11, 0, 5]).unwrap(), 4);
        assert_eq!(
            compute_point_structured_coords_for_extent(4, &e).unwrap(),
            [11, 0, 5]
        );
        assert_eq!(compute_cell_id_for_extent(&e, [11, 0, 5]).unwrap(), 3);
    }

    #[test]
    fn sub_extent_uses_whole_strides() {
        let whole = ext([0, 9, 0, 9, 0, 9]);
        let sub = ext([2, 4, 3, 5, 6, 6]);

        // local (1, 1, 0) in sub is global (3, 4, 6)
        let id = compute_point_id_for_sub_extent(&sub, &whole, [1, 1, 0]).unwrap();
        assert_eq!(id, 3 + 4 * 10 + 6 * 100);
        assert_eq!(
            compute_point_structured_coords_for_sub_extent(id, &sub, &whole).unwrap(),
            [1, 1, 0]
        );

        let cell = compute_cell_id_for_sub_extent(&sub, &whole, [1, 1, 0]).unwrap();
        assert_eq!(cell, 3 + 4 * 9 + 6 * 81);
        assert_eq!(
            compute_cell_structured_coords_for_sub_extent(cell, &sub, &whole).unwrap(),
            [1, 1, 0]
        );
    }

    #[test]
    fn degenerate_window_on_upper_face_has_no_cell() {
        let whole = ext([0, 9, 0, 9, 0, 9]);
        let top = ext([0, 9, 0, 9, 9, 9]);
        let bottom = ext([0, 9, 0, 9, 0, 0]);

        let err = compute_cell_id_for_sub_extent(&top, &whole, [0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange(_)));
        assert_eq!(compute_cell_id_for_sub_extent(&bottom, &whole, [2, 1, 0]).unwrap(), 11);
    }

    #[test]
    fn coordinates_far_outside_do_not_overflow() {
        let e = ext([100, 200, 0, 0, 0, 0]);
        assert!(matches!(
            compute_point_id_for_extent(&e, [i32::MIN, 0, 0]),
            Err(Error::IndexOutOfRange(_))
        ));
        assert!(matches!(
            compute_cell_id_for_extent(&e, [i32::MIN, 0, 0]),
            Err(Error::IndexOutOfRange(_))
        ));
        assert!(local_structured_coords([i32::MIN, 0, 0], &e).is_err());

        let low = ext([i32::MIN, i32::MIN + 10, 0, 0, 0, 0]);
        assert!(compute_point_id_for_extent(&low, [i32::MAX, 0, 0]).is_err());

        let whole = ext([i32::MIN, -2, 0, 0, 0, 0]);
        let sub = ext([-12, -2, 0, 0, 0, 0]);
        let far = compute_cell_id_for_extent(&whole, [i32::MIN, 0, 0]).unwrap();
        assert!(compute_cell_structured_coords_for_sub_extent(far, &sub, &whole).is_err());
    }

    #[test]
    fn widest_axis_counts() {
        let e = ext([i32::MIN, -2, 0, 0, 0, 0]);
        assert_eq!(dimensions_from_extent(&e), [i32::MAX, 1, 1]);
        assert_eq!(cell_dimensions_from_extent(&e), [i32::MAX - 1, 1, 1]);
        assert_eq!(number_of_points(&e), i32::MAX as i64);
        assert_eq!(
            compute_point_id_for_extent(&e, [-2, 0, 0]).unwrap(),
            i32::MAX as i64 - 1
        );
    }

    #[test]
    fn oversized_dimensions_rejected() {
        assert!(matches!(
            compute_point_id([i32::MAX; 3], [0, 0, 0]),
            Err(Error::InvalidExtent(_))
        ));
        assert!(compute_cell_structured_coords(0, [i32::MAX; 3]).is_err());
    }

    #[test]
    fn sub_extent_must_be_contained() {
        let whole = ext([0, 9, 0, 9, 0, 9]);
        let sub = ext([5, 12, 0, 0, 0, 0]);
        let err = compute_point_id_for_sub_extent(&sub, &whole, [0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidExtent(crate::error::InvalidExtent::NotContained { .. })
        ));
    }

    #[test]
    fn voxel_points() {
        let e = ext([0, 2, 0, 2, 0, 2]);
        let points = get_cell_points(0, &e).unwrap();
        assert_eq!(points, vec![0, 1, 3, 4, 9, 10, 12, 13]);
    }

    #[test]
    fn pixel_points_on_xz_plane() {
        let e = ext([0, 2, 0, 0, 0, 2]);
        // cell (1, 0, 1) of a 2 x 1 x 2 cell grid
        let cell = compute_cell_id_for_extent(&e, [1, 0, 1]).unwrap();
        let points = get_cell_points(cell, &e).unwrap();
        assert_eq!(points, vec![4, 5, 7, 8]);
    }

    #[test]
    fn line_and_vertex_points() {
        let line = ext([0, 0, 0, 4, 0, 0]);
        assert_eq!(get_cell_points(2, &line).unwrap(), vec![2, 3]);

        let vertex = ext([1, 1, 1, 1, 1, 1]);
        assert_eq!(get_cell_points(0, &vertex).unwrap(), vec![0]);
    }

    #[test]
    fn point_cells() {
        let e = ext([0, 2, 0, 2, 0, 0]);
        // center point of a 3 x 3 plane touches all four pixels
        assert_eq!(get_point_cells(4, &e).unwrap(), vec![0, 1, 2, 3]);
        // corner point touches a single pixel
        assert_eq!(get_point_cells(8, &e).unwrap(), vec![3]);
        // edge point touches two
        assert_eq!(get_point_cells(1, &e).unwrap(), vec![0, 1]);
    }

    #[test]
    fn cell_points_and_point_cells_agree() {
        let e = ext([0, 3, 0, 2, 0, 4]);
        for cell in 0..number_of_cells(&e) {
            for point in get_cell_points(cell, &e).unwrap() {
                assert!(get_point_cells(point, &e).unwrap().contains(&cell));
            }
        }
    }
}
