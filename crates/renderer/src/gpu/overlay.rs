use winit::event::WindowEvent;
use winit::window::Window;

use super::context::GpuContext;
use super::texture::GpuDisplayDevice;

/// Outcome of presenting one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameStatus {
    Presented,
    /// The swapchain was stale or timed out; the next redraw retries.
    Skipped,
}

/// egui context, winit input bridge and wgpu painter for the preview window.
pub(crate) struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub(crate) fn new(gpu: &GpuContext, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_format,
            egui_wgpu::RendererOptions::default(),
        );
        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui. Returns true when egui wants a repaint.
    pub(crate) fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).repaint
    }

    /// Texture allocator bound to this painter, so registered ids stay valid.
    pub(crate) fn display_device<'a>(&'a mut self, gpu: &'a GpuContext) -> GpuDisplayDevice<'a> {
        GpuDisplayDevice {
            device: &gpu.device,
            queue: &gpu.queue,
            egui: &mut self.renderer,
        }
    }

    /// Runs one egui pass and applies its platform output (cursor, clipboard).
    pub(crate) fn run(
        &mut self,
        window: &Window,
        build_ui: impl FnMut(&egui::Context),
    ) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        let mut output = self.ctx.run(raw_input, build_ui);
        let platform_output = std::mem::take(&mut output.platform_output);
        self.state.handle_platform_output(window, platform_output);
        output
    }

    /// Clears the swapchain image to `clear` and paints the egui output on top.
    pub(crate) fn paint(
        &mut self,
        gpu: &GpuContext,
        output: egui::FullOutput,
        clear: wgpu::Color,
    ) -> Result<FrameStatus, wgpu::SurfaceError> {
        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface outdated; reconfiguring");
                gpu.reconfigure();
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::debug!("surface timeout; retrying next frame");
                return Ok(FrameStatus::Skipped);
            }
            Err(err) => return Err(err),
        };

        let egui::FullOutput {
            textures_delta,
            shapes,
            pixels_per_point,
            ..
        } = output;

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("circlepad frame encoder"),
            });

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point,
        };
        let primitives = self.ctx.tessellate(shapes, pixels_per_point);

        for (id, delta) in &textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }
        let staging = self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &primitives,
            &screen,
        );

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("circlepad frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut pass = pass.forget_lifetime();
            self.renderer.render(&mut pass, &primitives, &screen);
        }

        for id in &textures_delta.free {
            self.renderer.free_texture(id);
        }

        gpu.queue
            .submit(staging.into_iter().chain(std::iter::once(encoder.finish())));
        frame.present();
        Ok(FrameStatus::Presented)
    }
}
