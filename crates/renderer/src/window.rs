use std::sync::Arc;

use raster::{RasterError, RasterImage};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::display::{DisplayDevice, DisplayError};
use crate::gpu::{FrameStatus, GpuContext, GpuTexture, Overlay};
use crate::sync::{init_display, render_scene, FrameSync, SyncOutcome};
use crate::types::RendererConfig;
use crate::ui::{self, UiState};

/// Colour behind the panels.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.45,
    g: 0.55,
    b: 0.60,
    a: 1.0,
};

/// Reasons the preview window could not be brought up.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to initialise the windowing subsystem: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create the preview window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to initialise the GPU: {0:#}")]
    Gpu(anyhow::Error),
    #[error("failed to allocate the raster: {0}")]
    Raster(#[from] RasterError),
    #[error("failed to create the display texture: {0}")]
    Display(#[from] DisplayError),
}

impl LaunchError {
    /// True for the two failures that happen before any surface exists.
    pub fn is_windowing_failure(&self) -> bool {
        matches!(self, Self::EventLoop(_) | Self::Window(_))
    }
}

/// Everything that only exists while the window is open.
///
/// Field order is drop order: the texture must go before the painter and the
/// device, so `PreviewApp::shutdown` releases it explicitly first.
struct Session {
    display: Option<GpuTexture>,
    raster: RasterImage,
    overlay: Overlay,
    gpu: GpuContext,
    window: Arc<Window>,
}

pub(crate) struct PreviewApp {
    config: RendererConfig,
    sync: FrameSync,
    ui: UiState,
    session: Option<Session>,
    failure: Option<LaunchError>,
}

impl PreviewApp {
    pub(crate) fn new(config: RendererConfig) -> Self {
        let sync = FrameSync::new(config.scene, config.initial_radius);
        let ui = UiState::with_radius(config.initial_radius);
        Self {
            config,
            sync,
            ui,
            session: None,
            failure: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<Session, LaunchError> {
        let (width, height) = self.config.surface_size;
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let gpu = GpuContext::new(window.clone(), self.config.vsync).map_err(LaunchError::Gpu)?;
        let mut overlay = Overlay::new(&gpu, &window);

        let scene = *self.sync.scene();
        let mut raster = RasterImage::new(scene.width, scene.height, scene.background)?;
        render_scene(&mut raster, &scene, self.sync.rendered());
        let display = init_display(&raster, &mut overlay.display_device(&gpu))?;

        info!(
            width,
            height,
            radius = self.sync.rendered().get(),
            "preview window ready"
        );
        window.request_redraw();

        Ok(Session {
            display: Some(display),
            raster,
            overlay,
            gpu,
            window,
        })
    }

    fn render_frame(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(display) = session.display.as_mut() else {
            return;
        };

        let scene = self.sync.scene();
        let image = egui::load::SizedTexture::new(
            display.id(),
            egui::vec2(scene.width as f32, scene.height as f32),
        );
        let current = self.ui;
        let mut next = current;
        let output = session.overlay.run(&session.window, |ctx| {
            next = ui::draw_panels(ctx, current, Some(image));
        });
        self.ui = next;

        match self.sync.sync(self.ui.radius, &mut session.raster, display) {
            Ok(SyncOutcome::Regenerated) => {
                debug!(radius = self.ui.radius.get(), "circle redrawn");
            }
            Ok(SyncOutcome::Unchanged) => {}
            Err(err) => warn!("failed to refresh display texture: {err}"),
        }

        match session.overlay.paint(&session.gpu, output, CLEAR_COLOR) {
            Ok(FrameStatus::Presented | FrameStatus::Skipped) => {}
            Err(err) => warn!("surface error: {err:?}; retrying next frame"),
        }
    }

    /// Releases the texture, then drops the painter, device and window.
    /// Safe to call more than once.
    pub(crate) fn shutdown(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(display) = session.display.take() {
            session
                .overlay
                .display_device(&session.gpu)
                .release(display);
        }
        info!(
            regenerations = self.sync.regenerations(),
            "preview window closed"
        );
    }

    pub(crate) fn take_failure(&mut self) -> Option<LaunchError> {
        self.failure.take()
    }
}

impl ApplicationHandler for PreviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                error!("{err}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.overlay.on_window_event(&session.window, &event) {
            session.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                session.gpu.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                if let Some(session) = self.session.as_ref() {
                    session.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Opens the preview window and blocks until it is closed.
pub(crate) fn run_window(config: RendererConfig) -> Result<(), LaunchError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PreviewApp::new(config);
    let run_result = event_loop.run_app(&mut app);
    app.shutdown();

    if let Some(err) = app.take_failure() {
        return Err(err);
    }
    run_result.map_err(LaunchError::from)
}
