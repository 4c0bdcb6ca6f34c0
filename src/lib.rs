//! # MPR viewer core
//!
//! This crate holds the toolkit-agnostic core of an interactive multiplanar
//! (MPR) viewer for volumetric medical scans.

//!
//! A [`session::ViewerSession`] owns one loaded volume and keeps the three
//! orthogonal planes consistent: a shared 3D crosshair, per-plane
//! brightness/contrast, zoomable viewports and a single active colormap.
//! Volumes are loaded from NIfTI files or DICOM series (via the dicom-rs
//! ecosystem); any UI binding drives the session through the
//! [`session::Interaction`] dispatch enum and draws the images it returns:
//!  - Axial
//!  - Coronal
//!  - Sagittal
//!
//! Clicking in any plane, moving any slice slider, or a cine playback tick
//! updates the crosshair once; the other planes and their overlay markers
//! follow from it. A [`renderer::VolumeRenderer`] additionally projects the
//! whole volume to a maximum-intensity image on the GPU, fire-and-forget
//! from the session's perspective.
//!
//! # Examples
//!
//! ## Loading a scan and reading back synchronized slices
//!
//! Load a NIfTI scan, click in the axial plane, and render the coronal
//! slice the crosshair now points at.
//!
//! ```no_run
//! # use mpr_viewer::enums::Orientation;
//! # use mpr_viewer::session::{Interaction, ViewerSession};
//! let mut session = ViewerSession::new();
//! session
//!     .load("scan.nii.gz")
//!     .expect("should have loaded the scan");
//! session.handle(Interaction::Click {
//!     plane: Orientation::Axial,
//!     data_x: 120.0,
//!     data_y: 96.0,
//! });
//! let image = session
//!     .slice_image(Orientation::Coronal)
//!     .expect("should have rendered the coronal slice");
//! image.save("coronal.png");
//! ```

pub mod crosshair;
pub mod display;
pub mod enums;
pub mod renderer;
pub mod session;
pub mod viewport;
pub mod volume;
pub mod volume_loader;
