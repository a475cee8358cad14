// Rendering system using wgpu
//
// Everything is drawn as screen-space lines: the engine fills a `DrawList`
// each frame and the `Renderer` uploads and draws it. Scene lines are
// clipped to the scissor rectangle, overlay lines cover the whole window.

mod camera;
mod lines;
mod mesh;
mod sprite;
mod vertex;

pub use camera::{ScreenRect, ViewMapping, Viewport};
pub use mesh::{
    builtin_wireframe, placeholder_wireframe, MeshHandle, MeshInstance, SceneCamera,
};
pub use sprite::Sprite;
pub use vertex::{push_polygon, Line};

use anyhow::Result;
use log::info;
use std::sync::Arc;
use winit::window::Window;

use crate::engine::context::DrawList;
use lines::{scissor_pixels, LinePipeline};

/// Main renderer responsible for initializing wgpu and drawing frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    lines: LinePipeline,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let lines = LinePipeline::new(&device, surface_format, config.width, config.height);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            lines,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.lines
                .resize(&self.queue, new_size.width, new_size.height);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Render a frame
    pub fn render(&mut self, draw_list: &DrawList) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Surface went stale (e.g. mid-resize); skip this frame
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (scene_count, overlay_count) = self.lines.prepare(
            &self.device,
            &self.queue,
            &draw_list.scene_lines,
            &draw_list.overlay_lines,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let clear = draw_list.clear_color.as_dvec4();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x,
                            g: clear.y,
                            b: clear.z,
                            a: clear.w,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Scene, clipped to the scissor rectangle
            if let Some((x, y, width, height)) =
                scissor_pixels(draw_list.scissor, self.config.width, self.config.height)
            {
                render_pass.set_scissor_rect(x, y, width, height);
                self.lines.draw(&mut render_pass, 0..scene_count);
            }

            // Overlay, full window
            render_pass.set_scissor_rect(0, 0, self.config.width, self.config.height);
            self.lines
                .draw(&mut render_pass, scene_count..scene_count + overlay_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
