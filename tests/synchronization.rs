//! End-to-end checks that interactions in one plane keep the other two
//! planes and their crosshair markers consistent.

use mpr_viewer::enums::Orientation;
use mpr_viewer::session::{Interaction, ViewerSession};
use mpr_viewer::volume::Volume;

use ndarray::Array3;

fn session() -> ViewerSession {
    let data = Array3::from_shape_fn((12, 10, 8), |(z, y, x)| (z * 80 + y * 8 + x) as f32);
    let mut session = ViewerSession::new();
    session.set_volume(Volume::new(data, (1.0, 1.0, 1.0)));
    session
}

#[test]
fn coronal_click_moves_the_axial_and_sagittal_markers() {
    let mut session = session();

    // Clicking row 2 of the flipped coronal display selects axial slice 9.
    session.handle(Interaction::Click {
        plane: Orientation::Coronal,
        data_x: 5.0,
        data_y: 2.0,
    });

    let crosshair = session.crosshair();
    assert_eq!(crosshair.x, 5);
    assert_eq!(crosshair.z, 9);

    // The axial marker sits at the clicked column, the sagittal marker's
    // horizontal line at the flipped axial row.
    assert_eq!(
        session.crosshair_overlay(Orientation::Axial).unwrap(),
        (5.0, crosshair.y as f64)
    );
    assert_eq!(
        session.crosshair_overlay(Orientation::Sagittal).unwrap(),
        (crosshair.y as f64, 2.0)
    );
}

#[test]
fn slider_and_click_paths_agree() {
    let mut through_sliders = session();
    through_sliders.handle(Interaction::SetSagittalIndex(3));
    through_sliders.handle(Interaction::SetCoronalIndex(7));

    let mut through_click = session();
    through_click.handle(Interaction::Click {
        plane: Orientation::Axial,
        data_x: 3.0,
        data_y: 7.0,
    });

    assert_eq!(through_sliders.crosshair(), through_click.crosshair());
}

#[test]
fn cine_playback_wraps_over_the_axial_axis() {
    let mut session = session();
    session.handle(Interaction::SetAxialIndex(0));
    session.handle(Interaction::SetCoronalIndex(0));
    session.handle(Interaction::SetSagittalIndex(0));
    session.set_cine(true);

    for _ in 0..11 {
        session.handle(Interaction::CineTick);
    }
    assert_eq!(session.crosshair().z, 11);
    // The shorter axes saturated at their own maxima.
    assert_eq!(session.crosshair().y, 9);
    assert_eq!(session.crosshair().x, 7);

    session.handle(Interaction::CineTick);
    assert_eq!(session.crosshair().z, 0);
    assert_eq!(session.crosshair().y, 0);
    assert_eq!(session.crosshair().x, 0);
}

#[test]
fn every_plane_renders_at_its_display_extent() {
    let session = session();
    let axial = session.slice_image(Orientation::Axial).unwrap();
    let coronal = session.slice_image(Orientation::Coronal).unwrap();
    let sagittal = session.slice_image(Orientation::Sagittal).unwrap();

    assert_eq!((axial.width(), axial.height()), (8, 10));
    assert_eq!((coronal.width(), coronal.height()), (8, 12));
    assert_eq!((sagittal.width(), sagittal.height()), (10, 12));
}
