use crate::surface::{Bgr, RasterImage};

/// Stroked circle outline in pixel coordinates.
///
/// A pixel belongs to the stroke when the distance from its integer
/// coordinates to the center lies within `radius ± thickness / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: u32,
    pub thickness: u32,
    pub color: Bgr,
}

impl Circle {
    pub fn covers(&self, x: i64, y: i64) -> bool {
        let half = f64::from(self.thickness.max(1)) / 2.0;
        let radius = f64::from(self.radius);
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        let dx = (x - i64::from(self.center_x)) as f64;
        let dy = (y - i64::from(self.center_y)) as f64;
        let dist_sq = dx * dx + dy * dy;
        dist_sq >= inner * inner && dist_sq <= outer * outer
    }

    /// Distance from the center past which no pixel is ever covered.
    fn reach(&self) -> i64 {
        (f64::from(self.radius) + f64::from(self.thickness.max(1)) / 2.0).ceil() as i64
    }

    /// Writes the outline into `image` and returns the number of pixels touched.
    pub(crate) fn stamp(&self, image: &mut RasterImage) -> usize {
        let reach = self.reach();
        let cx = i64::from(self.center_x);
        let cy = i64::from(self.center_y);
        let x0 = (cx - reach).max(0);
        let y0 = (cy - reach).max(0);
        let x1 = (cx + reach).min(i64::from(image.width()) - 1);
        let y1 = (cy + reach).min(i64::from(image.height()) - 1);
        if x0 > x1 || y0 > y1 {
            return 0;
        }

        let mut written = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.covers(x, y) && image.set_pixel(x as u32, y as u32, self.color) {
                    written += 1;
                }
            }
        }
        tracing::trace!(radius = self.radius, written, "stamped circle outline");
        written
    }
}
