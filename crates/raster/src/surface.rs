use thiserror::Error;

use crate::circle::Circle;

/// Bytes per pixel in raster storage (blue, green, red).
pub const RASTER_CHANNELS: usize = 3;

/// A single pixel in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(0, 0, 255);

    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    fn to_bytes(self) -> [u8; RASTER_CHANNELS] {
        [self.b, self.g, self.r]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("raster buffer holds {actual} bytes, expected {expected} for {width}x{height} BGR8")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Drawing operations the frame loop needs from a bitmap.
///
/// `RasterImage` is the real implementation; tests wrap it to count writes.
pub trait RasterSurface {
    /// Width and height in pixels. Fixed for the lifetime of the surface.
    fn dimensions(&self) -> (u32, u32);

    /// Overwrites every pixel with `color`.
    fn fill(&mut self, color: Bgr);

    /// Stamps the outline of `circle`, clipping anything outside the surface.
    fn stroke_circle(&mut self, circle: &Circle);

    /// Row-major BGR bytes, `width * height * 3` long.
    fn as_bgr(&self) -> &[u8];
}

/// Fixed-size BGR8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Allocates a `width` x `height` image filled with `background`.
    pub fn new(width: u32, height: u32, background: Bgr) -> Result<Self, RasterError> {
        let len = expected_len(width, height)?;
        let data = background
            .to_bytes()
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wraps an existing BGR buffer after validating its length.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(RasterError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgr> {
        let offset = self.offset(x, y)?;
        let px = &self.data[offset..offset + RASTER_CHANNELS];
        Some(Bgr::new(px[0], px[1], px[2]))
    }

    /// Writes one pixel; returns `false` when `(x, y)` lies outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Bgr) -> bool {
        match self.offset(x, y) {
            Some(offset) => {
                self.data[offset..offset + RASTER_CHANNELS].copy_from_slice(&color.to_bytes());
                true
            }
            None => false,
        }
    }

    pub fn into_bgr(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * RASTER_CHANNELS)
    }
}

impl RasterSurface for RasterImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Bgr) {
        let bytes = color.to_bytes();
        for px in self.data.chunks_exact_mut(RASTER_CHANNELS) {
            px.copy_from_slice(&bytes);
        }
    }

    fn stroke_circle(&mut self, circle: &Circle) {
        circle.stamp(self);
    }

    fn as_bgr(&self) -> &[u8] {
        &self.data
    }
}

fn expected_len(width: u32, height: u32) -> Result<usize, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyDimensions { width, height });
    }
    Ok(width as usize * height as usize * RASTER_CHANNELS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_has_expected_layout() {
        let image = RasterImage::new(4, 3, Bgr::new(1, 2, 3)).unwrap();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.as_bgr().len(), 4 * 3 * RASTER_CHANNELS);
        assert_eq!(&image.as_bgr()[..6], &[1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            RasterImage::new(0, 10, Bgr::WHITE).unwrap_err(),
            RasterError::EmptyDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn from_bgr_validates_length() {
        let err = RasterImage::from_bgr(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            RasterError::BufferSize {
                expected: 12,
                actual: 11,
                ..
            }
        ));
        assert!(RasterImage::from_bgr(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn pixels_are_row_major() {
        let mut image = RasterImage::new(3, 2, Bgr::BLACK).unwrap();
        assert!(image.set_pixel(2, 1, Bgr::RED));
        assert!(!image.set_pixel(3, 0, Bgr::RED));
        let bytes = image.as_bgr();
        let offset = (image.width() as usize + 2) * RASTER_CHANNELS;
        assert_eq!(&bytes[offset..offset + 3], &[0, 0, 255]);
        assert_eq!(image.pixel(2, 1), Some(Bgr::RED));
        assert_eq!(image.pixel(0, 2), None);
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut image = RasterImage::new(5, 5, Bgr::RED).unwrap();
        image.fill(Bgr::WHITE);
        assert!(image.as_bgr().iter().all(|&byte| byte == 255));
    }
}
