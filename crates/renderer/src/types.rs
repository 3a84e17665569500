use raster::{Bgr, Circle};

/// Edge length of the square raster shown in the image panel.
pub const RASTER_SIZE: u32 = 300;

/// Radius of the previewed circle, as edited through the slider.
///
/// Values are clamped into `[MIN, MAX]` on construction so anything that
/// reaches the frame loop is already in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParameter(f32);

impl CircleParameter {
    pub const MIN: f32 = 10.0;
    pub const MAX: f32 = 150.0;
    pub const DEFAULT: f32 = 100.0;

    pub fn new(radius: f32) -> Self {
        if radius.is_nan() {
            return Self::default();
        }
        Self(radius.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Radius in whole pixels; fractional slider values truncate toward zero.
    pub fn pixels(self) -> u32 {
        self.0 as u32
    }

    /// Exact comparison against the value last used to render.
    pub fn differs_from(self, previous: Self) -> bool {
        self.0.to_bits() != previous.0.to_bits()
    }
}

impl Default for CircleParameter {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Fixed drawing parameters shared by the preview window and still export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Bgr,
    pub center: (i32, i32),
    pub stroke_width: u32,
    pub stroke_color: Bgr,
}

impl Scene {
    pub fn circle(&self, radius: CircleParameter) -> Circle {
        Circle {
            center_x: self.center.0,
            center_y: self.center.1,
            radius: radius.pixels(),
            thickness: self.stroke_width,
            color: self.stroke_color,
        }
    }
}

impl Default for Scene {
    /// 300x300 white canvas with a 3px red outline centered at (150, 150).
    fn default() -> Self {
        Self {
            width: RASTER_SIZE,
            height: RASTER_SIZE,
            background: Bgr::WHITE,
            center: ((RASTER_SIZE / 2) as i32, (RASTER_SIZE / 2) as i32),
            stroke_width: 3,
            stroke_color: Bgr::RED,
        }
    }
}

/// Swapchain pacing requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VsyncMode {
    /// Block on vertical blank between frames (FIFO).
    #[default]
    Enabled,
    /// Prefer immediate or mailbox presentation when the surface offers it.
    Disabled,
}

/// Immutable configuration passed to the renderer at start-up.
///
/// `RendererConfig` mirrors CLI flags: how large the preview window is, what
/// radius the slider starts at and how frames are paced.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title shown by the window manager.
    pub title: String,
    /// Radius the slider starts at.
    pub initial_radius: CircleParameter,
    /// Present mode preference.
    pub vsync: VsyncMode,
    /// Canvas and stroke parameters.
    pub scene: Scene,
}

impl Default for RendererConfig {
    /// Provides a 1280x720 window with the default scene and vsync on.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            title: "circlepad".to_string(),
            initial_radius: CircleParameter::default(),
            vsync: VsyncMode::default(),
            scene: Scene::default(),
        }
    }
}
