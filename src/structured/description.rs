use super::Extent;

/// Topological classification of a structured extent
///
/// The classification only depends on which axes of the extent are degenerate
/// (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataDescription {
    SinglePoint,
    XLine,
    YLine,
    ZLine,
    XYPlane,
    YZPlane,
    XZPlane,
    XYZGrid,
}

impl DataDescription {
    /// classify an extent by its degenerate axes
    pub fn from_extent(extent: &Extent) -> Self {
        let flat = [
            extent.is_degenerate(0),
            extent.is_degenerate(1),
            extent.is_degenerate(2),
        ];

        match flat {
            [true, true, true] => Self::SinglePoint,
            [false, true, true] => Self::XLine,
            [true, false, true] => Self::YLine,
            [true, true, false] => Self::ZLine,
            [false, false, true] => Self::XYPlane,
            [true, false, false] => Self::YZPlane,
            [false, true, false] => Self::XZPlane,
            [false, false, false] => Self::XYZGrid,
        }
    }

    /// number of non-degenerate axes
    pub fn dimension(&self) -> usize {
        match self {
            Self::SinglePoint => 0,
            Self::XLine | Self::YLine | Self::ZLine => 1,
            Self::XYPlane | Self::YZPlane | Self::XZPlane => 2,
            Self::XYZGrid => 3,
        }
    }

    /// number of points in a single cell of this topology (vertex, line, pixel, voxel)
    pub fn points_per_cell(&self) -> usize {
        1 << self.dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(ext: [i32; 6]) -> DataDescription {
        DataDescription::from_extent(&Extent::from_array(ext).unwrap())
    }

    #[test]
    fn lines() {
        assert_eq!(describe([0, 4, 0, 0, 0, 0]), DataDescription::XLine);
        assert_eq!(describe([0, 0, 0, 4, 0, 0]), DataDescription::YLine);
        assert_eq!(describe([0, 0, 0, 0, 0, 4]), DataDescription::ZLine);
    }

    #[test]
    fn planes() {
        assert_eq!(describe([0, 4, 0, 4, 0, 0]), DataDescription::XYPlane);
        assert_eq!(describe([0, 0, 0, 4, 0, 4]), DataDescription::YZPlane);
        assert_eq!(describe([0, 4, 0, 0, 0, 4]), DataDescription::XZPlane);
    }

    #[test]
    fn point_and_volume() {
        assert_eq!(describe([3, 3, 3, 3, 3, 3]), DataDescription::SinglePoint);
        assert_eq!(describe([0, 1, 0, 1, 0, 1]), DataDescription::XYZGrid);
        assert_eq!(describe([0, 1, 0, 1, 0, 1]).dimension(), 3);
        assert_eq!(describe([0, 1, 0, 1, 0, 0]).points_per_cell(), 4);
    }
}
