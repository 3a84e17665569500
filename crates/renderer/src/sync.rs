//! Keeps the CPU raster and the GPU texture in step with the radius slider.
//!
//! Functions:
//!
//! - `render_scene` clears the raster and stamps the circle for a radius.
//! - `init_display` converts a populated raster and allocates its texture.
//! - `sync_frame` redraws and re-uploads only when the radius changed.
//!
//! Types:
//!
//! - `FrameSync` remembers the radius last rendered so the per-frame call site
//!   only supplies the current slider value.

use raster::{to_display_order, RasterSurface};

use crate::display::{DisplayDevice, DisplayError, DisplaySurface, Extent, SamplingFilter};
use crate::types::{CircleParameter, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Radius matched the last render; neither surface was touched.
    Unchanged,
    /// Raster was redrawn and the texture overwritten.
    Regenerated,
}

pub fn render_scene<R>(raster: &mut R, scene: &Scene, radius: CircleParameter)
where
    R: RasterSurface + ?Sized,
{
    raster.fill(scene.background);
    raster.stroke_circle(&scene.circle(radius));
}

/// Produces the first texture from an already drawn raster.
pub fn init_display<R, D>(raster: &R, device: &mut D) -> Result<D::Surface, DisplayError>
where
    R: RasterSurface + ?Sized,
    D: DisplayDevice + ?Sized,
{
    let (width, height) = raster.dimensions();
    let extent = Extent::new(width, height);
    let rgba = to_display_order(raster);
    DisplayError::check(extent, &rgba)?;
    let surface = device.allocate(extent, &rgba, SamplingFilter::Linear)?;
    tracing::debug!(width, height, "allocated display texture");
    Ok(surface)
}

/// Brings `display` up to date with `current` when it differs from `previous`.
///
/// On `Regenerated` the display holds a fresh conversion of `raster`. The
/// texture allocation is reused as-is.
pub fn sync_frame<R, D>(
    current: CircleParameter,
    previous: CircleParameter,
    scene: &Scene,
    raster: &mut R,
    display: &mut D,
) -> Result<SyncOutcome, DisplayError>
where
    R: RasterSurface + ?Sized,
    D: DisplaySurface + ?Sized,
{
    if !current.differs_from(previous) {
        return Ok(SyncOutcome::Unchanged);
    }

    render_scene(raster, scene, current);
    let rgba = to_display_order(raster);
    display.upload(&rgba)?;
    tracing::debug!(
        radius = current.get(),
        previous = previous.get(),
        "re-synchronised display texture"
    );
    Ok(SyncOutcome::Regenerated)
}

#[derive(Debug, Clone)]
pub struct FrameSync {
    scene: Scene,
    rendered: CircleParameter,
    regenerations: u64,
}

impl FrameSync {
    /// `rendered` is the radius the raster currently shows.
    pub fn new(scene: Scene, rendered: CircleParameter) -> Self {
        Self {
            scene,
            rendered,
            regenerations: 0,
        }
    }

    pub fn sync<R, D>(
        &mut self,
        current: CircleParameter,
        raster: &mut R,
        display: &mut D,
    ) -> Result<SyncOutcome, DisplayError>
    where
        R: RasterSurface + ?Sized,
        D: DisplaySurface + ?Sized,
    {
        let outcome = sync_frame(current, self.rendered, &self.scene, raster, display)?;
        if outcome == SyncOutcome::Regenerated {
            self.rendered = current;
            self.regenerations += 1;
        }
        Ok(outcome)
    }

    pub fn rendered(&self) -> CircleParameter {
        self.rendered
    }

    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster::{Bgr, Circle, RasterImage};

    struct CountingRaster {
        inner: RasterImage,
        fills: usize,
        strokes: usize,
    }

    impl CountingRaster {
        fn new(scene: &Scene) -> Self {
            Self {
                inner: RasterImage::new(scene.width, scene.height, scene.background).unwrap(),
                fills: 0,
                strokes: 0,
            }
        }

        fn writes(&self) -> usize {
            self.fills + self.strokes
        }
    }

    impl RasterSurface for CountingRaster {
        fn dimensions(&self) -> (u32, u32) {
            self.inner.dimensions()
        }

        fn fill(&mut self, color: Bgr) {
            self.fills += 1;
            self.inner.fill(color);
        }

        fn stroke_circle(&mut self, circle: &Circle) {
            self.strokes += 1;
            self.inner.stroke_circle(circle);
        }

        fn as_bgr(&self) -> &[u8] {
            self.inner.as_bgr()
        }
    }

    struct MockTexture {
        extent: Extent,
        pixels: Vec<u8>,
        uploads: usize,
    }

    impl DisplaySurface for MockTexture {
        fn extent(&self) -> Extent {
            self.extent
        }

        fn upload(&mut self, rgba: &[u8]) -> Result<(), DisplayError> {
            DisplayError::check(self.extent, rgba)?;
            self.pixels.copy_from_slice(rgba);
            self.uploads += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDevice {
        allocations: usize,
        releases: usize,
        filter: Option<SamplingFilter>,
    }

    impl DisplayDevice for MockDevice {
        type Surface = MockTexture;

        fn allocate(
            &mut self,
            extent: Extent,
            rgba: &[u8],
            filter: SamplingFilter,
        ) -> Result<MockTexture, DisplayError> {
            self.allocations += 1;
            self.filter = Some(filter);
            Ok(MockTexture {
                extent,
                pixels: rgba.to_vec(),
                uploads: 0,
            })
        }

        fn release(&mut self, _surface: MockTexture) {
            self.releases += 1;
        }
    }

    /// Independent rendition of a white 300x300 canvas with a 3px red ring.
    fn reference_rgba(radius: u32) -> Vec<u8> {
        let inner = (radius as f64 - 1.5).max(0.0);
        let outer = radius as f64 + 1.5;
        let mut out = Vec::with_capacity(300 * 300 * 4);
        for y in 0..300i64 {
            for x in 0..300i64 {
                let dx = (x - 150) as f64;
                let dy = (y - 150) as f64;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= inner && dist <= outer {
                    out.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    out.extend_from_slice(&[255, 255, 255, 255]);
                }
            }
        }
        out
    }

    fn start(radius: f32) -> (Scene, CountingRaster, MockDevice, MockTexture, FrameSync) {
        let scene = Scene::default();
        let initial = CircleParameter::new(radius);
        let mut raster = CountingRaster::new(&scene);
        render_scene(&mut raster, &scene, initial);
        let mut device = MockDevice::default();
        let texture = init_display(&raster, &mut device).unwrap();
        let sync = FrameSync::new(scene, initial);
        (scene, raster, device, texture, sync)
    }

    #[test]
    fn init_uploads_the_default_circle() {
        let (_, _, device, texture, _) = start(100.0);
        assert_eq!(device.allocations, 1);
        assert_eq!(device.filter, Some(SamplingFilter::Linear));
        assert_eq!(texture.extent(), Extent::new(300, 300));
        assert_eq!(texture.pixels, reference_rgba(100));
    }

    #[test]
    fn changed_radius_regenerates_once() {
        let (_, mut raster, device, mut texture, mut sync) = start(100.0);
        let before = raster.writes();

        let outcome = sync
            .sync(CircleParameter::new(50.0), &mut raster, &mut texture)
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Regenerated);
        assert_eq!(texture.uploads, 1);
        assert_eq!(raster.writes(), before + 2);
        assert_eq!(device.allocations, 1);
        assert_eq!(texture.pixels, reference_rgba(50));
        assert_eq!(sync.rendered(), CircleParameter::new(50.0));
        assert_eq!(sync.regenerations(), 1);
    }

    #[test]
    fn untouched_slider_never_writes() {
        let (_, mut raster, _, mut texture, mut sync) = start(100.0);
        let before = raster.writes();

        for _ in 0..100 {
            let outcome = sync
                .sync(CircleParameter::new(100.0), &mut raster, &mut texture)
                .unwrap();
            assert_eq!(outcome, SyncOutcome::Unchanged);
        }

        assert_eq!(raster.writes(), before);
        assert_eq!(texture.uploads, 0);
        assert_eq!(sync.regenerations(), 0);
    }

    #[test]
    fn repeated_value_is_idempotent() {
        let (_, mut raster, _, mut texture, mut sync) = start(100.0);
        let radius = CircleParameter::new(75.0);

        sync.sync(radius, &mut raster, &mut texture).unwrap();
        let writes = raster.writes();
        let snapshot = texture.pixels.clone();
        let second = sync.sync(radius, &mut raster, &mut texture).unwrap();

        assert_eq!(second, SyncOutcome::Unchanged);
        assert_eq!(raster.writes(), writes);
        assert_eq!(texture.uploads, 1);
        assert_eq!(texture.pixels, snapshot);
    }

    #[test]
    fn uploads_match_reference_across_the_range() {
        let (_, mut raster, _, mut texture, mut sync) = start(100.0);
        for radius in [10.0, 10.7, 33.0, 99.5, 128.0, 150.0] {
            let radius = CircleParameter::new(radius);
            sync.sync(radius, &mut raster, &mut texture).unwrap();
            assert_eq!(
                texture.pixels,
                reference_rgba(radius.pixels()),
                "radius {}",
                radius.get()
            );
            assert_eq!(texture.pixels, to_display_order(&raster));
        }
    }

    #[test]
    fn boundary_radii_are_visible() {
        for radius in [CircleParameter::MIN, CircleParameter::MAX] {
            let (_, _, _, texture, _) = start(radius);
            let red = texture
                .pixels
                .chunks_exact(4)
                .filter(|px| *px == [255, 0, 0, 255])
                .count();
            let white = texture
                .pixels
                .chunks_exact(4)
                .filter(|px| *px == [255, 255, 255, 255])
                .count();
            assert!(red > 0, "radius {radius} drew nothing");
            assert!(white > 0, "radius {radius} covered the canvas");
            assert_eq!(red + white, 300 * 300);
        }
    }

    #[test]
    fn out_of_range_requests_are_clamped_before_sync() {
        let (_, mut raster, _, mut texture, mut sync) = start(100.0);
        sync.sync(CircleParameter::new(900.0), &mut raster, &mut texture)
            .unwrap();
        assert_eq!(sync.rendered().get(), CircleParameter::MAX);
        assert_eq!(texture.pixels, reference_rgba(150));
    }

    #[test]
    fn failed_upload_keeps_previous_radius() {
        let (_, mut raster, _, _, mut sync) = start(100.0);
        let mut wrong = MockTexture {
            extent: Extent::new(10, 10),
            pixels: vec![0; 400],
            uploads: 0,
        };

        let err = sync
            .sync(CircleParameter::new(40.0), &mut raster, &mut wrong)
            .unwrap_err();

        assert!(matches!(err, DisplayError::SizeMismatch { .. }));
        assert_eq!(sync.rendered(), CircleParameter::new(100.0));
        assert_eq!(sync.regenerations(), 0);
    }

    #[test]
    fn release_hands_texture_back_to_device() {
        let (_, _, mut device, texture, _) = start(100.0);
        device.release(texture);
        assert_eq!(device.releases, 1);
    }
}
