use mpr_viewer::enums::Orientation;
use mpr_viewer::renderer::{VolumeRenderer, WGPU};
use mpr_viewer::session::ViewerSession;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .expect("usage: mpr-viewer <scan.nii | dicom-dir>");

    let mut session = ViewerSession::new();
    session.load(&path).expect("should have loaded the scan");

    for orientation in Orientation::ALL {
        let image = session
            .slice_image(orientation)
            .expect("should have rendered the center slice");
        let name = format!("{orientation:?}").to_lowercase();
        image
            .save(format!("{name}.png"))
            .expect("should have saved the slice image");
    }

    let request = session.render_request().expect("volume is loaded");
    let instance = wgpu::Instance::default();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions::default())
        .await
        .expect("should have found a GPU adapter");
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default())
        .await
        .expect("should have created a device");

    let renderer = VolumeRenderer::new(&request, WGPU { device, queue });
    let projection = renderer
        .render(512, 512, 0.6, 0.3)
        .await
        .expect("should have rendered the projection");
    projection
        .save("projection.png")
        .expect("should have saved projection.png");
}
