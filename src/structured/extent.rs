use crate::error::{InvalidExtent, ParseExtent};
use crate::Error;

/// Inclusive index range of a structured grid on every axis
///
/// The layout follows the `Extent` / `WholeExtent` attributes of a vtk file:
/// `x_start x_end y_start y_end z_start z_end`. An axis where `start == end` is degenerate
/// and collapses the grid to a plane, a line, or a single point.
///
/// `Extent::new` rejects inverted axes, so every `Extent` value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    x_start: i32,
    x_end: i32,
    y_start: i32,
    y_end: i32,
    z_start: i32,
    z_end: i32,
}

impl Extent {
    /// Construct an extent, failing if any axis has `start > end`
    pub fn new(
        x_start: i32,
        x_end: i32,
        y_start: i32,
        y_end: i32,
        z_start: i32,
        z_end: i32,
    ) -> Result<Self, InvalidExtent> {
        Self::from_array([x_start, x_end, y_start, y_end, z_start, z_end])
    }

    /// Construct an extent from the flat `[iMin, iMax, jMin, jMax, kMin, kMax]` layout
    pub fn from_array(ext: [i32; 6]) -> Result<Self, InvalidExtent> {
        let extent = Self {
            x_start: ext[0],
            x_end: ext[1],
            y_start: ext[2],
            y_end: ext[3],
            z_start: ext[4],
            z_end: ext[5],
        };

        for axis in 0..3 {
            if extent.start(axis) > extent.end(axis) {
                return Err(InvalidExtent::Inverted(extent, axis));
            }
        }

        // point counts must fit an i32 per axis and an i64 in total
        let points = [0, 1, 2].map(|axis| extent.span(axis) + 1);
        let total = points[0]
            .checked_mul(points[1])
            .and_then(|p| p.checked_mul(points[2]));
        if points.iter().any(|p| *p > i64::from(i32::MAX)) || total.is_none() {
            return Err(InvalidExtent::TooLarge(extent));
        }

        Ok(extent)
    }

    /// Extent of a grid with `nx * ny * nz` points, starting at the origin
    pub fn from_dimensions(dims: [i32; 3]) -> Result<Self, InvalidExtent> {
        if dims.iter().any(|d| *d < 1) {
            return Err(InvalidExtent::Dimensions(dims));
        }

        Self::from_array([0, dims[0] - 1, 0, dims[1] - 1, 0, dims[2] - 1])
            .map_err(|_| InvalidExtent::Dimensions(dims))
    }

    /// simple constructor used to generate an `Extent` from a string
    /// you would find in a vtk file. The expected input is in the form
    /// `"x_start x_end y_start y_end z_start z_end"`
    ///
    /// # Example
    /// ```
    /// let extent = vtk_core::Extent::from_span_string("0 10 0 20 0 0").unwrap();
    /// assert_eq!(extent.to_array(), [0, 10, 0, 20, 0, 0]);
    /// ```
    pub fn from_span_string(span_string: &str) -> Result<Self, Error> {
        let parse_failure = || ParseExtent::new(span_string.to_string());

        let values = span_string
            .split_ascii_whitespace()
            .map(|x| x.parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| parse_failure())?;

        let ext: [i32; 6] = values.try_into().map_err(|_| parse_failure())?;

        Ok(Self::from_array(ext)?)
    }

    /// Format the extent into a string that would be written to a vtk file
    pub fn span_string(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.x_start, self.x_end, self.y_start, self.y_end, self.z_start, self.z_end
        )
    }

    pub fn to_array(&self) -> [i32; 6] {
        [
            self.x_start,
            self.x_end,
            self.y_start,
            self.y_end,
            self.z_start,
            self.z_end,
        ]
    }

    /// lower bound on `axis` (0 = x, 1 = y, 2 = z)
    pub(crate) fn start(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x_start,
            1 => self.y_start,
            2 => self.z_start,
            _ => unreachable!("extent axis {axis} out of range"),
        }
    }

    /// upper bound (inclusive) on `axis` (0 = x, 1 = y, 2 = z)
    pub(crate) fn end(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x_end,
            1 => self.y_end,
            2 => self.z_end,
            _ => unreachable!("extent axis {axis} out of range"),
        }
    }

    /// the `(i, j, k)` of the first point of the extent
    pub fn origin(&self) -> [i32; 3] {
        [self.x_start, self.y_start, self.z_start]
    }

    /// the `(x, y, z)` upper bounds of the extent
    pub fn end_point(&self) -> [i32; 3] {
        [self.x_end, self.y_end, self.z_end]
    }

    /// `end - start` on `axis`, widened so that it cannot overflow
    pub(crate) fn span(&self, axis: usize) -> i64 {
        i64::from(self.end(axis)) - i64::from(self.start(axis))
    }

    pub(crate) fn is_degenerate(&self, axis: usize) -> bool {
        self.start(axis) == self.end(axis)
    }

    /// true when every axis of `other` lies inside the matching axis of `self`
    pub fn contains(&self, other: &Extent) -> bool {
        (0..3).all(|axis| {
            self.start(axis) <= other.start(axis) && other.end(axis) <= self.end(axis)
        })
    }

    /// fail with [`InvalidExtent::NotContained`] unless `inner` lies inside `self`
    pub(crate) fn ensure_contains(&self, inner: &Extent) -> Result<(), InvalidExtent> {
        if self.contains(inner) {
            Ok(())
        } else {
            Err(InvalidExtent::NotContained {
                inner: *inner,
                whole: *self,
            })
        }
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.span_string())
    }
}

impl std::str::FromStr for Extent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_span_string(s)
    }
}

impl TryFrom<[i32; 6]> for Extent {
    type Error = InvalidExtent;

    fn try_from(ext: [i32; 6]) -> Result<Self, Self::Error> {
        Self::from_array(ext)
    }
}

impl From<Extent> for [i32; 6] {
    fn from(extent: Extent) -> Self {
        extent.to_array()
    }
}
