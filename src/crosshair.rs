use crate::enums::Orientation;

/// The shared 3D crosshair over a loaded volume.
///
/// `z` indexes the axial axis (D0), `y` the coronal axis (D1) and `x` the
/// sagittal axis (D2). All three stay within the dimensions passed to the
/// mutating methods; out-of-range inputs are clamped, never rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Crosshair {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

#[inline]
fn clamp_index(value: usize, len: usize) -> usize {
    value.min(len.saturating_sub(1))
}

#[inline]
fn round_index(value: f64, len: usize) -> usize {
    if value <= 0.0 {
        0
    } else {
        clamp_index(value.round() as usize, len)
    }
}

impl Crosshair {
    /// Crosshair at the volume center (integer division per axis).
    pub fn centered(dim: (usize, usize, usize)) -> Self {
        Self {
            x: dim.2 / 2,
            y: dim.1 / 2,
            z: dim.0 / 2,
        }
    }

    /// Depth index of the given plane.
    pub fn index(&self, orientation: Orientation) -> usize {
        match orientation {
            Orientation::Axial => self.z,
            Orientation::Coronal => self.y,
            Orientation::Sagittal => self.x,
        }
    }

    /// Set the depth index of the given plane, clamped to the axis bounds.
    pub fn set_index(&mut self, orientation: Orientation, value: usize, dim: (usize, usize, usize)) {
        let clamped = clamp_index(value, orientation.depth_len(dim));
        match orientation {
            Orientation::Axial => self.z = clamped,
            Orientation::Coronal => self.y = clamped,
            Orientation::Sagittal => self.x = clamped,
        }
    }

    /// Apply a click at `(data_x, data_y)` in one plane's data coordinates.
    ///
    /// The clicked plane keeps its own depth index; the in-plane coordinates
    /// set the other two. Coronal and sagittal rows are displayed flipped,
    /// so their vertical coordinate maps to `D0 - 1 - row`.
    pub fn point_clicked(
        &mut self,
        orientation: Orientation,
        data_x: f64,
        data_y: f64,
        dim: (usize, usize, usize),
    ) {
        match orientation {
            Orientation::Axial => {
                self.x = round_index(data_x, dim.2);
                self.y = round_index(data_y, dim.1);
            }
            Orientation::Coronal => {
                self.x = round_index(data_x, dim.2);
                self.z = dim.0.saturating_sub(1) - round_index(data_y, dim.0);
            }
            Orientation::Sagittal => {
                self.y = round_index(data_x, dim.1);
                self.z = dim.0.saturating_sub(1) - round_index(data_y, dim.0);
            }
        }
    }

    /// Crosshair marker position in one plane's display coordinates, as
    /// (vertical-line x, horizontal-line y).
    pub fn overlay(&self, orientation: Orientation, dim: (usize, usize, usize)) -> (f64, f64) {
        let flipped_z = (dim.0.saturating_sub(1).saturating_sub(self.z)) as f64;
        match orientation {
            Orientation::Axial => (self.x as f64, self.y as f64),
            Orientation::Coronal => (self.x as f64, flipped_z),
            Orientation::Sagittal => (self.y as f64, flipped_z),
        }
    }

    /// One cine playback step: all three indices advance together, the
    /// coronal and sagittal indices saturating at their own maxima. When the
    /// axial index is already at its maximum the step returns all three to 0.
    pub fn advance_cine(&mut self, dim: (usize, usize, usize)) {
        if self.z + 1 < dim.0 {
            self.z += 1;
            self.y = clamp_index(self.y + 1, dim.1);
            self.x = clamp_index(self.x + 1, dim.2);
        } else {
            *self = Self::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIM: (usize, usize, usize) = (10, 20, 30);

    #[test]
    fn centered_uses_integer_division() {
        let crosshair = Crosshair::centered((5, 7, 9));
        assert_eq!(crosshair, Crosshair { x: 4, y: 3, z: 2 });
    }

    #[test]
    fn set_index_clamps_to_axis_bounds() {
        let mut crosshair = Crosshair::default();
        crosshair.set_index(Orientation::Axial, 99, DIM);
        crosshair.set_index(Orientation::Coronal, 99, DIM);
        crosshair.set_index(Orientation::Sagittal, 99, DIM);
        assert_eq!(crosshair, Crosshair { x: 29, y: 19, z: 9 });

        crosshair.set_index(Orientation::Axial, 4, DIM);
        assert_eq!(crosshair.z, 4);
        assert_eq!(crosshair.index(Orientation::Axial), 4);
    }

    #[test]
    fn axial_click_sets_sagittal_and_coronal_only() {
        let mut crosshair = Crosshair { x: 0, y: 0, z: 5 };
        crosshair.point_clicked(Orientation::Axial, 12.3, 7.6, DIM);
        assert_eq!(crosshair.x, 12);
        assert_eq!(crosshair.y, 8);
        assert_eq!(crosshair.z, 5);
    }

    #[test]
    fn coronal_click_unflips_the_axial_index() {
        let mut crosshair = Crosshair { x: 0, y: 3, z: 0 };
        crosshair.point_clicked(Orientation::Coronal, 4.0, 2.0, DIM);
        assert_eq!(crosshair.x, 4);
        assert_eq!(crosshair.z, DIM.0 - 1 - 2);
        assert_eq!(crosshair.y, 3);
    }

    #[test]
    fn sagittal_click_sets_coronal_and_axial() {
        let mut crosshair = Crosshair { x: 7, y: 0, z: 0 };
        crosshair.point_clicked(Orientation::Sagittal, 11.0, 0.0, DIM);
        assert_eq!(crosshair.y, 11);
        assert_eq!(crosshair.z, DIM.0 - 1);
        assert_eq!(crosshair.x, 7);
    }

    #[test]
    fn clicks_outside_the_plane_clamp_silently() {
        let mut crosshair = Crosshair::default();
        crosshair.point_clicked(Orientation::Axial, -3.0, 1e6, DIM);
        assert_eq!(crosshair.x, 0);
        assert_eq!(crosshair.y, DIM.1 - 1);
    }

    #[test]
    fn overlay_flips_rows_for_coronal_and_sagittal() {
        let crosshair = Crosshair { x: 3, y: 4, z: 2 };
        assert_eq!(crosshair.overlay(Orientation::Axial, DIM), (3.0, 4.0));
        assert_eq!(crosshair.overlay(Orientation::Coronal, DIM), (3.0, 7.0));
        assert_eq!(crosshair.overlay(Orientation::Sagittal, DIM), (4.0, 7.0));
    }

    #[test]
    fn cine_reaches_the_last_slice_then_wraps() {
        let mut crosshair = Crosshair::default();
        for _ in 0..DIM.0 - 1 {
            crosshair.advance_cine(DIM);
        }
        assert_eq!(crosshair.z, DIM.0 - 1);

        crosshair.advance_cine(DIM);
        assert_eq!(crosshair, Crosshair::default());
    }

    #[test]
    fn cine_saturates_the_shorter_axes() {
        // Coronal axis shorter than axial: y must stop at its own maximum.
        let dim = (6, 3, 3);
        let mut crosshair = Crosshair::default();
        for _ in 0..5 {
            crosshair.advance_cine(dim);
        }
        assert_eq!(crosshair.z, 5);
        assert_eq!(crosshair.y, 2);
        assert_eq!(crosshair.x, 2);
    }
}
