//! wgpu side of the preview window.
//!
//! - `context` owns the instance, device and swapchain and rebuilds the
//!   swapchain when the window resizes.
//! - `texture` implements the display seams on top of a sampled texture that
//!   egui can draw.
//! - `overlay` runs egui each frame and paints it over the clear colour.

mod context;
mod overlay;
mod texture;

pub(crate) use context::GpuContext;
pub(crate) use overlay::{FrameStatus, Overlay};
pub use texture::GpuTexture;
