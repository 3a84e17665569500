use crate::surface::{RasterSurface, RASTER_CHANNELS};

/// Bytes per pixel in display order (red, green, blue, alpha).
pub const DISPLAY_CHANNELS: usize = 4;

/// Reorders BGR storage into the RGBA8 layout GPU textures consume.
///
/// Alpha is always opaque; the output has `width * height * 4` bytes.
pub fn to_display_order<S: RasterSurface + ?Sized>(image: &S) -> Vec<u8> {
    let bgr = image.as_bgr();
    let mut rgba = Vec::with_capacity(bgr.len() / RASTER_CHANNELS * DISPLAY_CHANNELS);
    for px in bgr.chunks_exact(RASTER_CHANNELS) {
        rgba.extend_from_slice(&[px[2], px[1], px[0], u8::MAX]);
    }
    rgba
}
