//! Fire-and-forget 3D preview: a wgpu compute pass projecting the whole
//! volume to a maximum-intensity image. The session only supplies a
//! [`RenderRequest`]; presentation of the result is the caller's concern.

use crate::session::RenderRequest;

use image::{ImageBuffer, Luma};
use log::debug;
use std::borrow::Cow;
use wgpu::{Device, PollType, Queue, util::DeviceExt};

pub struct WGPU {
    pub device: Device,
    pub queue: Queue,
}

pub struct VolumeRenderer {
    device: Device,
    queue: Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    volume_view: wgpu::TextureView,
    dimensions: (u32, u32, u32), // (depth, height, width)
    scalar_range: (f32, f32),
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    output_width: u32,
    output_height: u32,
    volume_width: u32,
    volume_height: u32,
    volume_depth: u32,
    step_count: u32,
    min_value: f32,
    max_value: f32,
    yaw: f32,
    pitch: f32,
    _pad0: f32,
    _pad1: f32,
}

impl VolumeRenderer {
    /// Upload the volume as a 3D texture and build the projection pipeline.
    pub fn new(request: &RenderRequest<'_>, wgpu: WGPU) -> Self {
        let (depth, height, width) = request.data.dim();
        let (depth, height, width) = (depth as u32, height as u32, width as u32);
        let WGPU { device, queue } = wgpu;

        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: depth,
        };

        let volume_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Volume 3D Texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::R32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Upload; the slice path covers the standard-layout arrays the
        // loader produces.
        let samples: Cow<'_, [f32]> = match request.data.as_slice() {
            Some(samples) => Cow::Borrowed(samples),
            None => Cow::Owned(request.data.iter().copied().collect()),
        };
        queue.write_texture(
            wgpu::TexelCopyTextureInfoBase {
                texture: &volume_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(samples.as_ref()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * std::mem::size_of::<f32>() as u32),
                rows_per_image: Some(height),
            },
            texture_size,
        );

        let volume_view = volume_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Volume MIP Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!(
                "shaders/volume_mip.wgsl"
            ))),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Volume MIP Bind Group Layout"),
            entries: &[
                // 3D texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D3,
                        multisampled: false,
                    },
                    count: None,
                },
                // Output buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Volume MIP Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Volume MIP Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            volume_view,
            dimensions: (depth, height, width),
            scalar_range: request.scalar_range,
        }
    }

    /// Project the volume from the given view angles (radians) into a
    /// grayscale image of the requested size.
    pub async fn render(
        &self,
        target_width: u32,
        target_height: u32,
        yaw: f32,
        pitch: f32,
    ) -> Option<ImageBuffer<Luma<u8>, Vec<u8>>> {
        let (depth, height, width) = self.dimensions;
        let uniforms = Uniforms {
            output_width: target_width,
            output_height: target_height,
            volume_width: width,
            volume_height: height,
            volume_depth: depth,
            step_count: 2 * depth.max(height).max(width),
            min_value: self.scalar_range.0,
            max_value: self.scalar_range.1,
            yaw,
            pitch,
            _pad0: 0.0,
            _pad1: 0.0,
        };
        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let output_size = (target_width * target_height) as usize;
        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: (output_size * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: (output_size * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Volume MIP Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.volume_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Volume MIP Encoder"),
            });
        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Volume MIP Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            let workgroup_size = 8;
            let dispatch_x = target_width.div_ceil(workgroup_size);
            let dispatch_y = target_height.div_ceil(workgroup_size);
            compute_pass.dispatch_workgroups(dispatch_x, dispatch_y, 1);
        }
        encoder.copy_buffer_to_buffer(
            &output_buffer,
            0,
            &staging_buffer,
            0,
            (output_size * std::mem::size_of::<u32>()) as u64,
        );
        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = futures::channel::oneshot::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = self.device.poll(PollType::Wait {
            submission_index: None,
            timeout: None,
        });
        receiver.await.ok()?.ok()?;

        let data = buffer_slice.get_mapped_range();
        let u32_data: &[u32] = bytemuck::cast_slice(&data);
        let pixels: Vec<u8> = u32_data.iter().map(|&v| v as u8).collect();
        drop(data);
        staging_buffer.unmap();

        debug!("rendered {target_width}x{target_height} projection");
        ImageBuffer::from_raw(target_width, target_height, pixels)
    }
}
