//! Picking pass: who is under the cursor?
//!
//! The scene is redrawn into an offscreen target with each bacterium in an
//! index-derived flat color and everything else in opaque black, then the
//! single texel under the cursor is copied out and mapped. Keeping this
//! separate from the display pass means the displayed colors can be
//! anything without breaking hit detection.

use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::geometry::Mesh;
use crate::rendering::sphere::{
    build_flat_pipeline, create_depth_texture, draw_meshes, CameraUniform,
};

const PICK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub struct PickingPass {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    target: wgpu::Texture,
    target_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    readback: wgpu::Buffer,
    width: u32,
    height: u32,
}

impl PickingPass {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (pipeline, camera_bind_group_layout) =
            build_flat_pipeline(device, PICK_FORMAT, "Picking Pipeline");

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Picking Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Picking Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Picking Readback Buffer"),
            size: 16,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let (target, target_view, depth_view) = Self::create_targets(device, width, height);

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            target,
            target_view,
            depth_view,
            readback,
            width,
            height,
        }
    }

    fn create_targets(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView, wgpu::TextureView) {
        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Picking Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: PICK_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let (_, depth_view) = create_depth_texture(device, width, height);
        (target, target_view, depth_view)
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (target, target_view, depth_view) = Self::create_targets(device, width, height);
        self.target = target;
        self.target_view = target_view;
        self.depth_view = depth_view;
        self.width = width;
        self.height = height;
    }

    /// Render the pick meshes and return the RGBA8 under `(x, y)` in
    /// physical pixels. Out-of-bounds coordinates and failed readbacks
    /// report as background (no match).
    pub fn read_pixel(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        x: u32,
        y: u32,
        view_proj: Mat4,
        meshes: &[Mesh],
    ) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(view_proj)]),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Picking Encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Picking Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            draw_meshes(device, &mut pass, meshes);
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: None,
                    rows_per_image: None,
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        // Blocking readback: clicks are rare and the copy is one texel.
        let slice = self.readback.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });
        let _ = device.poll(wgpu::PollType::Wait);

        match receiver.recv() {
            Ok(Ok(())) => {
                let pixel = {
                    let data = slice.get_mapped_range();
                    [data[0], data[1], data[2], data[3]]
                };
                self.readback.unmap();
                pixel
            }
            _ => {
                log::warn!("Picking readback failed; treating click as a miss");
                [0, 0, 0, 0]
            }
        }
    }
}
