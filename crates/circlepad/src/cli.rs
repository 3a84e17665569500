use std::path::PathBuf;

use clap::Parser;
use renderer::{CircleParameter, RendererConfig, VsyncMode};

#[derive(Parser, Debug)]
#[command(
    name = "circlepad",
    author,
    version,
    about = "Draws a circle on a CPU raster and previews it with a live radius slider"
)]
pub struct Cli {
    /// Initial circle radius in pixels (10-150).
    #[arg(
        long,
        value_name = "PX",
        env = "CIRCLEPAD_RADIUS",
        value_parser = parse_radius,
        default_value = "100"
    )]
    pub radius: CircleParameter,

    /// Preview window size (e.g. `1280x720`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        env = "CIRCLEPAD_SIZE",
        value_parser = parse_size,
        default_value = "1280x720"
    )]
    pub size: (u32, u32),

    /// Present frames as soon as they are ready instead of waiting for vblank.
    #[arg(long)]
    pub no_vsync: bool,

    /// Write the raster for `--radius` to a PNG file and exit without a window.
    #[arg(long, value_name = "PATH", value_parser = parse_export_path)]
    pub export: Option<PathBuf>,
}

impl Cli {
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            surface_size: self.size,
            initial_radius: self.radius,
            vsync: if self.no_vsync {
                VsyncMode::Disabled
            } else {
                VsyncMode::Enabled
            },
            ..RendererConfig::default()
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_radius(value: &str) -> Result<CircleParameter, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("radius must not be empty".to_string());
    }

    let radius: f32 = trimmed
        .parse()
        .map_err(|_| format!("invalid radius '{trimmed}'; expected a number of pixels"))?;
    if !radius.is_finite() || !(CircleParameter::MIN..=CircleParameter::MAX).contains(&radius) {
        return Err(format!(
            "radius {trimmed} is out of range; expected {} to {}",
            CircleParameter::MIN,
            CircleParameter::MAX
        ));
    }
    Ok(CircleParameter::new(radius))
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| "expected WxH format, e.g. 1280x720".to_string())?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| "invalid width in size specification".to_string())?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| "invalid height in size specification".to_string())?;

    if width == 0 || height == 0 {
        return Err("window dimensions must be greater than zero".to_string());
    }

    Ok((width, height))
}

pub fn parse_export_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    renderer::check_export_path(&path).map_err(|err| err.to_string())?;
    Ok(path)
}
