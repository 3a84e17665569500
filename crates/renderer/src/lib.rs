//! Renderer crate for circlepad.
//!
//! Takes a CPU raster with one circle on it and shows it as a texture inside
//! an egui panel. A slider drives the radius. The overall flow is:
//!
//! ```text
//!   CLI / circlepad
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ PreviewApp ──▶ winit event loop ──▶ render_frame()
//!                                                          │
//!            ui::draw_panels ◀── egui ◀────────────────────┤
//!                   │ radius                               │
//!                   ▼                                      ▼
//!            FrameSync::sync ──▶ raster ──▶ GpuTexture ──▶ swapchain
//! ```
//!
//! `FrameSync` only touches the raster and the texture when the radius moved,
//! so idle frames cost one egui pass and one present. `Renderer::export_still`
//! runs the same drawing code without a window and writes a PNG instead.

mod display;
mod export;
mod gpu;
mod sync;
mod types;
mod ui;
mod window;

use std::path::{Path, PathBuf};

pub use display::{DisplayDevice, DisplayError, DisplaySurface, Extent, SamplingFilter};
pub use export::{check_export_path, export_still, render_still, ExportError};
pub use sync::{init_display, render_scene, sync_frame, FrameSync, SyncOutcome};
pub use types::{CircleParameter, RendererConfig, Scene, VsyncMode, RASTER_SIZE};
pub use ui::{draw_panels, SettingsState, UiState};
pub use window::LaunchError;

/// High-level entry point that owns the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Opens the preview window and blocks until the user closes it.
    ///
    /// Fails with `LaunchError::EventLoop` or `LaunchError::Window` before any
    /// raster or texture is allocated.
    pub fn run(&mut self) -> Result<(), LaunchError> {
        window::run_window(self.config.clone())
    }

    /// Writes the configured scene at the initial radius to `path` as PNG.
    pub fn export_still(&self, path: &Path) -> Result<PathBuf, ExportError> {
        export::export_still(path, &self.config.scene, self.config.initial_radius)
    }
}
