use crate::enums::Orientation;

use ndarray::Array3;
use ndarray::ArrayView2;
use ndarray::s;

/// A loaded scan: scalar samples in (axial, coronal, sagittal) index order
/// plus the voxel spacing (x, y, z) in millimeters.
///
/// A volume is immutable once loaded and replaced wholesale by the next
/// load.
#[derive(Default)]
pub struct Volume {
    data: Array3<f32>,
    spacing: (f32, f32, f32),
}

impl Volume {
    pub fn new(data: Array3<f32>, spacing: (f32, f32, f32)) -> Self {
        Self { data, spacing }
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn spacing(&self) -> (f32, f32, f32) {
        self.spacing
    }

    /// Raw slice through the volume at `index` along the plane's depth axis.
    /// Returns `None` when the index is out of range.
    pub fn slice_from_axis(
        &self,
        index: usize,
        orientation: Orientation,
    ) -> Option<ArrayView2<'_, f32>> {
        if !self.is_valid_index(index, orientation) {
            return None;
        }
        let slice = match orientation {
            Orientation::Axial => self.data.slice(s![index, .., ..]),
            Orientation::Coronal => self.data.slice(s![.., index, ..]),
            Orientation::Sagittal => self.data.slice(s![.., .., index]),
        };
        Some(slice)
    }

    /// Slice in display row order: coronal and sagittal planes are flipped
    /// top-to-bottom so the superior end of the scan is at row 0.
    pub fn display_slice(
        &self,
        index: usize,
        orientation: Orientation,
    ) -> Option<ArrayView2<'_, f32>> {
        let slice = self.slice_from_axis(index, orientation)?;
        if orientation.flips_rows() {
            Some(slice.slice_move(s![..;-1, ..]))
        } else {
            Some(slice)
        }
    }

    /// Global (min, max) over all samples, for the volume render transfer
    /// function. `None` for an empty volume.
    pub fn scalar_range(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }

    fn is_valid_index(&self, index: usize, orientation: Orientation) -> bool {
        index < orientation.depth_len(self.dim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn test_volume() -> Volume {
        // 2x3x4, value encodes the index: z*100 + y*10 + x
        let data = Array3::from_shape_fn((2, 3, 4), |(z, y, x)| {
            (z * 100 + y * 10 + x) as f32
        });
        Volume::new(data, (1.0, 1.0, 1.0))
    }

    #[test]
    fn slice_planes_select_expected_axes() {
        let volume = test_volume();

        let axial = volume.slice_from_axis(1, Orientation::Axial).unwrap();
        assert_eq!(axial.dim(), (3, 4));
        assert_eq!(axial[[2, 3]], 123.0);

        let coronal = volume.slice_from_axis(1, Orientation::Coronal).unwrap();
        assert_eq!(coronal.dim(), (2, 4));
        assert_eq!(coronal[[1, 3]], 113.0);

        let sagittal = volume.slice_from_axis(2, Orientation::Sagittal).unwrap();
        assert_eq!(sagittal.dim(), (2, 3));
        assert_eq!(sagittal[[1, 2]], 122.0);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let volume = test_volume();
        assert!(volume.slice_from_axis(2, Orientation::Axial).is_none());
        assert!(volume.slice_from_axis(3, Orientation::Coronal).is_none());
        assert!(volume.slice_from_axis(4, Orientation::Sagittal).is_none());
    }

    #[test]
    fn display_slice_flips_coronal_and_sagittal_rows() {
        let volume = test_volume();

        let coronal = volume.display_slice(0, Orientation::Coronal).unwrap();
        // Row 0 of the display is the last axial index.
        assert_eq!(coronal[[0, 0]], 100.0);
        assert_eq!(coronal[[1, 0]], 0.0);

        let axial = volume.display_slice(0, Orientation::Axial).unwrap();
        assert_eq!(axial[[0, 0]], 0.0);
    }

    #[test]
    fn scalar_range_spans_all_samples() {
        let volume = test_volume();
        assert_eq!(volume.scalar_range(), Some((0.0, 123.0)));
        assert_eq!(Volume::default().scalar_range(), None);
    }
}
