//! Seams between the frame loop and whatever holds the uploaded pixels.
//!
//! `DisplayDevice` allocates textures and `DisplaySurface` overwrites their
//! contents. The wgpu implementation lives in `gpu::texture`; tests provide
//! in-memory versions that count writes.

use thiserror::Error;

/// Texture dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Byte length of an RGBA8 payload covering the whole extent.
    pub fn rgba_len(self) -> usize {
        self.width as usize * self.height as usize * raster::DISPLAY_CHANNELS
    }
}

/// Sampling applied when the texture is drawn at a different size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingFilter {
    Nearest,
    Linear,
}

impl From<SamplingFilter> for wgpu::FilterMode {
    fn from(value: SamplingFilter) -> Self {
        match value {
            SamplingFilter::Nearest => wgpu::FilterMode::Nearest,
            SamplingFilter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("texture payload is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl DisplayError {
    /// Validates that `payload` covers `extent` exactly.
    pub fn check(extent: Extent, payload: &[u8]) -> Result<(), Self> {
        let expected = extent.rgba_len();
        if payload.len() == expected {
            Ok(())
        } else {
            Err(Self::SizeMismatch {
                width: extent.width,
                height: extent.height,
                expected,
                actual: payload.len(),
            })
        }
    }
}

/// An allocated texture whose contents can be replaced in place.
pub trait DisplaySurface {
    fn extent(&self) -> Extent;

    /// Overwrites the existing allocation with `rgba`. Never resizes.
    fn upload(&mut self, rgba: &[u8]) -> Result<(), DisplayError>;
}

/// Allocates and releases display surfaces.
pub trait DisplayDevice {
    type Surface: DisplaySurface;

    /// Creates one texture of `extent` with `rgba` as its initial contents.
    fn allocate(
        &mut self,
        extent: Extent,
        rgba: &[u8],
        filter: SamplingFilter,
    ) -> Result<Self::Surface, DisplayError>;

    /// Frees a texture created by `allocate`.
    fn release(&mut self, surface: Self::Surface);
}
