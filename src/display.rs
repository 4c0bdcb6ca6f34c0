//! Slice presentation: per-slice normalization, brightness/contrast and
//! colormap mapping into displayable RGB images.

use image::{ImageBuffer, RgbImage};
use ndarray::ArrayView2;
use rayon::prelude::*;

/// UI slider bounds for brightness (maps to [-1, 1]).
pub const BRIGHTNESS_SLIDER_MAX: i32 = 150;
/// UI slider bounds for contrast in percent (maps to (0, 2]).
pub const CONTRAST_SLIDER_MIN: i32 = 1;
pub const CONTRAST_SLIDER_MAX: i32 = 200;

/// The active colormap, shared across all three planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Colormap {
    #[default]
    Gray,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Jet,
}

/// Evenly spaced RGB anchors, linearly interpolated at sample time.
type Anchors = &'static [[f32; 3]];

const VIRIDIS: Anchors = &[
    [0.267, 0.005, 0.329],
    [0.229, 0.322, 0.546],
    [0.128, 0.567, 0.551],
    [0.369, 0.789, 0.383],
    [0.993, 0.906, 0.144],
];

const PLASMA: Anchors = &[
    [0.050, 0.030, 0.528],
    [0.494, 0.012, 0.658],
    [0.798, 0.280, 0.470],
    [0.973, 0.585, 0.252],
    [0.940, 0.975, 0.131],
];

const INFERNO: Anchors = &[
    [0.001, 0.000, 0.014],
    [0.342, 0.062, 0.429],
    [0.729, 0.212, 0.333],
    [0.976, 0.556, 0.056],
    [0.988, 0.998, 0.645],
];

const MAGMA: Anchors = &[
    [0.001, 0.000, 0.016],
    [0.316, 0.072, 0.485],
    [0.716, 0.215, 0.475],
    [0.987, 0.536, 0.382],
    [0.987, 0.991, 0.750],
];

const CIVIDIS: Anchors = &[
    [0.000, 0.135, 0.304],
    [0.257, 0.312, 0.424],
    [0.503, 0.505, 0.435],
    [0.766, 0.712, 0.324],
    [0.995, 0.909, 0.218],
];

impl Colormap {
    pub const ALL: [Colormap; 7] = [
        Colormap::Gray,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Cividis,
        Colormap::Jet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Gray => "gray",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Cividis => "cividis",
            Colormap::Jet => "jet",
        }
    }

    /// Map an adjusted intensity in [0, 1] to an RGB triple.
    pub fn sample(self, t: f32) -> [u8; 3] {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Gray => {
                let v = (t * 255.0) as u8;
                [v, v, v]
            }
            Colormap::Viridis => interpolate(VIRIDIS, t),
            Colormap::Plasma => interpolate(PLASMA, t),
            Colormap::Inferno => interpolate(INFERNO, t),
            Colormap::Magma => interpolate(MAGMA, t),
            Colormap::Cividis => interpolate(CIVIDIS, t),
            Colormap::Jet => jet(t),
        }
    }
}

fn interpolate(anchors: Anchors, t: f32) -> [u8; 3] {
    let position = t * (anchors.len() - 1) as f32;
    let low = position.floor() as usize;
    let high = (low + 1).min(anchors.len() - 1);
    let frac = position - low as f32;

    let mut rgb = [0u8; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        let mixed = anchors[low][channel] * (1.0 - frac) + anchors[high][channel] * frac;
        *value = (mixed * 255.0) as u8;
    }
    rgb
}

fn jet(t: f32) -> [u8; 3] {
    let channel = |center: f32| ((1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    [channel(3.0), channel(2.0), channel(1.0)]
}

/// Per-plane brightness/contrast adjustment.
///
/// `brightness` lives in [-1, 1] and `contrast` in (0, 2]; the slider
/// conversions mirror the UI's integer ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
        }
    }
}

impl ViewState {
    /// Brightness from a UI slider value in [-150, 150].
    pub fn set_brightness_slider(&mut self, value: i32) {
        let value = value.clamp(-BRIGHTNESS_SLIDER_MAX, BRIGHTNESS_SLIDER_MAX);
        self.brightness = value as f32 / BRIGHTNESS_SLIDER_MAX as f32;
    }

    /// Contrast from a UI slider value in percent, [1, 200].
    pub fn set_contrast_slider(&mut self, value: i32) {
        let value = value.clamp(CONTRAST_SLIDER_MIN, CONTRAST_SLIDER_MAX);
        self.contrast = value as f32 / 100.0;
    }

    /// Contrast about the midpoint first, then the brightness offset, each
    /// clamped back into [0, 1].
    #[inline]
    pub fn apply(self, normalized: f32) -> f32 {
        let contrasted = ((normalized - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0);
        (contrasted + self.brightness).clamp(0.0, 1.0)
    }
}

/// Render one display slice to an RGB image.
///
/// Intensities are normalized to the slice's own min/max on every call; a
/// constant-valued slice maps to uniform mid-gray instead of dividing by
/// zero.
pub fn render_slice(
    slice: &ArrayView2<'_, f32>,
    state: ViewState,
    colormap: Colormap,
) -> Option<RgbImage> {
    let (height, width) = slice.dim();
    let (min, max) = slice.iter().fold((f32::MAX, f32::MIN), |(min, max), &v| {
        (min.min(v), max.max(v))
    });
    let range = max - min;

    let pixel_data: Vec<u8> = slice
        .into_par_iter()
        .flat_map_iter(|&value| {
            let normalized = if range > 0.0 { (value - min) / range } else { 0.5 };
            colormap.sample(state.apply(normalized))
        })
        .collect();

    ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
}
