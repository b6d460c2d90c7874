// ABOUTME: Main GPU renderer using wgpu.
// ABOUTME: Draws the laid-out partition panels into the window surface.

use std::sync::Arc;
use winit::window::Window;

use bsp_core::Palette;
use bsp_layout::{Layout, NodePath};

use crate::gpu::GpuState;
use crate::quad_pipeline::{srgb_to_linear, QuadPipeline};
use crate::scene::build_scene;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible GPU adapter found")]
    NoAdapter,

    #[error("Failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub struct Renderer {
    gpu: GpuState,
    quad_pipeline: QuadPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let gpu = GpuState::new(window).await?;
        let quad_pipeline = QuadPipeline::new(&gpu.device, gpu.config.format);
        let (width, height) = gpu.size;
        quad_pipeline.update_screen_size(&gpu.queue, width as f32, height as f32);

        Ok(Self { gpu, quad_pipeline })
    }

    /// A minimized window reports 0x0; the surface and uniforms keep the last real size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.quad_pipeline
            .update_screen_size(&self.gpu.queue, width as f32, height as f32);
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.gpu.size
    }

    /// Draw one frame. A lost or outdated surface is reconfigured and the
    /// frame skipped; the caller's next redraw will paint it.
    pub fn render(
        &mut self,
        layout: &Layout,
        palette: &Palette,
        active_divider: Option<&NodePath>,
    ) -> Result<(), RenderError> {
        let quads = build_scene(layout, palette, active_divider);
        self.quad_pipeline.prepare(&self.gpu.queue, &quads);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = palette.background;
        let channel = |c: f32| {
            if self.gpu.config.format.is_srgb() {
                srgb_to_linear(c) as f64
            } else {
                c as f64
            }
        };
        let clear_color = wgpu::Color {
            r: channel(bg.r),
            g: channel(bg.g),
            b: channel(bg.b),
            a: bg.a as f64,
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.quad_pipeline.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
