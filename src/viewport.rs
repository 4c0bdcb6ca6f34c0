/// One plane's display extent in data coordinates.
///
/// Zoom and pan only move this rectangle; they never touch the crosshair or
/// the slice indices, and panning is deliberately unclamped so a view can be
/// pushed past the volume bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
    }
}

impl Viewport {
    /// Viewport covering a full slice of `width` x `height` samples.
    pub fn fit(width: usize, height: usize) -> Self {
        Self {
            x_range: (0.0, width as f64),
            y_range: (0.0, height as f64),
        }
    }

    /// Zoom about an anchor point in data coordinates.
    ///
    /// The visible range shrinks by `factor` (grows for factors below 1)
    /// while the anchor keeps its proportional position inside the view, so
    /// the point under the cursor stays put.
    pub fn zoom_at(&mut self, anchor: (f64, f64), factor: f64) {
        if factor <= 0.0 {
            return;
        }
        self.x_range = zoom_axis(self.x_range, anchor.0, factor);
        self.y_range = zoom_axis(self.y_range, anchor.1, factor);
    }

    /// Shift the view by the same delta on both bounds.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x_range = (self.x_range.0 + dx, self.x_range.1 + dx);
        self.y_range = (self.y_range.0 + dy, self.y_range.1 + dy);
    }

    pub fn width(&self) -> f64 {
        self.x_range.1 - self.x_range.0
    }

    pub fn height(&self) -> f64 {
        self.y_range.1 - self.y_range.0
    }
}

fn zoom_axis(range: (f64, f64), anchor: f64, factor: f64) -> (f64, f64) {
    let extent = range.1 - range.0;
    if extent == 0.0 {
        return range;
    }
    let relative = (anchor - range.0) / extent;
    let new_extent = extent / factor;
    let new_min = anchor - relative * new_extent;
    (new_min, new_min + new_extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zoom_then_inverse_zoom_restores_the_view() {
        let mut viewport = Viewport::fit(256, 128);
        let original = viewport;
        let anchor = (100.0, 40.0);

        viewport.zoom_at(anchor, 1.1);
        viewport.zoom_at(anchor, 1.0 / 1.1);

        assert_relative_eq!(viewport.x_range.0, original.x_range.0, epsilon = 1e-9);
        assert_relative_eq!(viewport.x_range.1, original.x_range.1, epsilon = 1e-9);
        assert_relative_eq!(viewport.y_range.0, original.y_range.0, epsilon = 1e-9);
        assert_relative_eq!(viewport.y_range.1, original.y_range.1, epsilon = 1e-9);
    }

    #[test]
    fn zoom_preserves_the_anchor_proportion() {
        let mut viewport = Viewport::fit(200, 200);
        let anchor = (50.0, 150.0);
        let before = (anchor.0 - viewport.x_range.0) / viewport.width();

        viewport.zoom_at(anchor, 2.0);

        let after = (anchor.0 - viewport.x_range.0) / viewport.width();
        assert_relative_eq!(before, after, epsilon = 1e-9);
        assert_relative_eq!(viewport.width(), 100.0);
    }

    #[test]
    fn pan_shifts_both_bounds_without_clamping() {
        let mut viewport = Viewport::fit(10, 10);
        viewport.pan(-25.0, 5.0);
        assert_relative_eq!(viewport.x_range.0, -25.0);
        assert_relative_eq!(viewport.x_range.1, -15.0);
        assert_relative_eq!(viewport.y_range.0, 5.0);
        assert_relative_eq!(viewport.y_range.1, 15.0);
    }

    #[test]
    fn non_positive_zoom_factor_is_ignored() {
        let mut viewport = Viewport::fit(10, 10);
        let original = viewport;
        viewport.zoom_at((5.0, 5.0), 0.0);
        assert_eq!(viewport, original);
    }
}
