//! Toolkit-agnostic viewer state: one session owns the loaded volume, the
//! shared crosshair, per-plane display adjustments and viewports, and maps
//! UI interactions onto them.

use crate::crosshair::Crosshair;
use crate::display::{self, Colormap, ViewState};
use crate::enums::Orientation;
use crate::viewport::Viewport;
use crate::volume::Volume;
use crate::volume_loader::{VolumeLoader, VolumeLoaderError};

use image::RgbImage;
use log::{info, warn};
use ndarray::Array3;
use std::path::Path;
use thiserror::Error;

/// Cine playback period the UI timer should fire with.
pub const CINE_INTERVAL_MS: u64 = 30;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No volume loaded")]
    NoVolume,

    #[error(transparent)]
    Load(#[from] VolumeLoaderError),
}

/// One UI event, decoupled from any toolkit's event object shape.
///
/// Each variant corresponds 1:1 to a control of the viewer: the three slice
/// sliders, clicks and wheel/key gestures on a canvas, the adjustment
/// sliders, the colormap dropdown, the play/pause button, the playback
/// timer, and the reset button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    SetAxialIndex(usize),
    SetCoronalIndex(usize),
    SetSagittalIndex(usize),
    Click {
        plane: Orientation,
        data_x: f64,
        data_y: f64,
    },
    Zoom {
        plane: Orientation,
        anchor: (f64, f64),
        factor: f64,
    },
    Pan {
        plane: Orientation,
        dx: f64,
        dy: f64,
    },
    SetBrightness {
        plane: Orientation,
        slider: i32,
    },
    SetContrast {
        plane: Orientation,
        slider: i32,
    },
    SetColormap(Colormap),
    ToggleCine,
    CineTick,
    Reset,
}

/// Everything the external 3D renderer needs for one launch.
pub struct RenderRequest<'a> {
    pub data: &'a Array3<f32>,
    pub scalar_range: (f32, f32),
    pub spacing: (f32, f32, f32),
}

#[derive(Default)]
pub struct ViewerSession {
    volume: Option<Volume>,
    crosshair: Crosshair,
    view_states: [ViewState; 3],
    viewports: [Viewport; 3],
    colormap: Colormap,
    cine_running: bool,
    status: String,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scan, replacing any current volume.
    ///
    /// On success the crosshair recenters and the viewports refit;
    /// brightness, contrast and colormap persist across loads. On failure
    /// the previous volume and all state are retained.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        match VolumeLoader::load(path) {
            Ok(volume) => {
                self.set_volume(volume);
                self.status = format!("Loaded {}", path.display());
                Ok(())
            }
            Err(error) => {
                warn!("load of {} failed: {error}", path.display());
                self.status = format!("Failed to load {}: {error}", path.display());
                Err(error.into())
            }
        }
    }

    /// Install an already-loaded volume, e.g. one assembled from in-memory
    /// DICOM objects.
    pub fn set_volume(&mut self, volume: Volume) {
        self.crosshair = Crosshair::centered(volume.dim());
        self.volume = Some(volume);
        self.fit_viewports();
        info!("volume installed, crosshair at {:?}", self.crosshair);
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    pub fn crosshair(&self) -> Crosshair {
        self.crosshair
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_cine_running(&self) -> bool {
        self.cine_running
    }

    pub fn view_state(&self, plane: Orientation) -> ViewState {
        self.view_states[plane.plane_index()]
    }

    pub fn viewport(&self, plane: Orientation) -> Viewport {
        self.viewports[plane.plane_index()]
    }

    /// Dispatch one UI interaction.
    pub fn handle(&mut self, interaction: Interaction) {
        match interaction {
            Interaction::SetAxialIndex(z) => self.set_index(Orientation::Axial, z),
            Interaction::SetCoronalIndex(y) => self.set_index(Orientation::Coronal, y),
            Interaction::SetSagittalIndex(x) => self.set_index(Orientation::Sagittal, x),
            Interaction::Click {
                plane,
                data_x,
                data_y,
            } => self.point_clicked(plane, data_x, data_y),
            Interaction::Zoom {
                plane,
                anchor,
                factor,
            } => self.viewports[plane.plane_index()].zoom_at(anchor, factor),
            Interaction::Pan { plane, dx, dy } => {
                self.viewports[plane.plane_index()].pan(dx, dy)
            }
            Interaction::SetBrightness { plane, slider } => {
                self.view_states[plane.plane_index()].set_brightness_slider(slider)
            }
            Interaction::SetContrast { plane, slider } => {
                self.view_states[plane.plane_index()].set_contrast_slider(slider)
            }
            Interaction::SetColormap(colormap) => self.colormap = colormap,
            Interaction::ToggleCine => self.cine_running = !self.cine_running,
            Interaction::CineTick => self.cine_tick(),
            Interaction::Reset => self.reset(),
        }
    }

    /// Set one plane's depth index, clamped to the volume bounds.
    pub fn set_index(&mut self, plane: Orientation, value: usize) {
        if let Some(volume) = &self.volume {
            self.crosshair.set_index(plane, value, volume.dim());
        }
    }

    /// Apply a click in one plane's data coordinates to the crosshair.
    pub fn point_clicked(&mut self, plane: Orientation, data_x: f64, data_y: f64) {
        if let Some(volume) = &self.volume {
            self.crosshair.point_clicked(plane, data_x, data_y, volume.dim());
        }
    }

    /// Reset crosshair, adjustments, colormap and viewports to defaults.
    pub fn reset(&mut self) {
        if let Some(volume) = &self.volume {
            self.crosshair = Crosshair::centered(volume.dim());
        }
        self.view_states = [ViewState::default(); 3];
        self.colormap = Colormap::default();
        self.fit_viewports();
        self.status = "View reset to default".to_owned();
    }

    pub fn set_cine(&mut self, running: bool) {
        self.cine_running = running;
    }

    /// Timer callback for cine playback; a no-op while playback is stopped
    /// or no volume is loaded.
    pub fn cine_tick(&mut self) {
        if !self.cine_running {
            return;
        }
        if let Some(volume) = &self.volume {
            self.crosshair.advance_cine(volume.dim());
        }
    }

    /// Render the current slice of one plane through its adjustments and
    /// the active colormap. `None` when no volume is loaded.
    pub fn slice_image(&self, plane: Orientation) -> Option<RgbImage> {
        let volume = self.volume.as_ref()?;
        let slice = volume.display_slice(self.crosshair.index(plane), plane)?;
        display::render_slice(&slice, self.view_state(plane), self.colormap)
    }

    /// Crosshair marker coordinates for one plane's canvas.
    pub fn crosshair_overlay(&self, plane: Orientation) -> Option<(f64, f64)> {
        let volume = self.volume.as_ref()?;
        Some(self.crosshair.overlay(plane, volume.dim()))
    }

    /// Data for a volume-rendering launch.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoVolume`] when nothing is loaded; the caller reports
    /// and skips the launch.
    pub fn render_request(&self) -> Result<RenderRequest<'_>, SessionError> {
        let volume = self.volume.as_ref().ok_or(SessionError::NoVolume)?;
        let scalar_range = volume.scalar_range().ok_or(SessionError::NoVolume)?;
        Ok(RenderRequest {
            data: volume.data(),
            scalar_range,
            spacing: volume.spacing(),
        })
    }

    fn fit_viewports(&mut self) {
        let Some(volume) = &self.volume else {
            self.viewports = [Viewport::default(); 3];
            return;
        };
        let (d0, d1, d2) = volume.dim();
        // Display extents per plane: (columns, rows).
        self.viewports[Orientation::Axial.plane_index()] = Viewport::fit(d2, d1);
        self.viewports[Orientation::Coronal.plane_index()] = Viewport::fit(d2, d0);
        self.viewports[Orientation::Sagittal.plane_index()] = Viewport::fit(d1, d0);
    }
}
