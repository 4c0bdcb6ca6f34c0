/// The three orthogonal anatomical planes.
///
/// Volume data is stored as (depth, height, width) = (axial, coronal,
/// sagittal index), matching the slice order of the source scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Axial,
    Coronal,
    Sagittal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Axial,
        Orientation::Coronal,
        Orientation::Sagittal,
    ];

    /// Index of this plane in per-plane state arrays.
    #[inline]
    pub fn plane_index(self) -> usize {
        match self {
            Orientation::Axial => 0,
            Orientation::Coronal => 1,
            Orientation::Sagittal => 2,
        }
    }

    /// Length of the axis this plane slices through.
    #[inline]
    pub fn depth_len(self, dim: (usize, usize, usize)) -> usize {
        match self {
            Orientation::Axial => dim.0,
            Orientation::Coronal => dim.1,
            Orientation::Sagittal => dim.2,
        }
    }

    /// Whether the display slice is flipped top-to-bottom so the superior
    /// end of the scan renders at the top. Axial slices are viewed head-on
    /// and keep their stored row order.
    #[inline]
    pub fn flips_rows(self) -> bool {
        !matches!(self, Orientation::Axial)
    }
}

/// Sort key for assembling a DICOM series into a volume.
#[derive(Default)]
pub enum SortBy {
    #[default]
    ImagePositionPatient,
    TablePosition,
    InstanceNumber,
    None,
}
