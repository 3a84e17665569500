use anyhow::{Context, Result};
use renderer::{LaunchError, Renderer};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::diagnostics;

const DEFAULT_FILTER: &str = "warn,circlepad=info,renderer=info,raster=info,wgpu=error,wgpu_core=error,wgpu_hal=error,naga=error,winit=error";

/// Process status for windowing failures; the 8-bit form of -1.
pub const WINDOWING_FAILURE_STATUS: u8 = 255;

pub fn run(args: Cli) -> Result<()> {
    initialise_tracing();

    let config = args.renderer_config();
    diagnostics::log_startup(&config, args.export.as_deref());
    let mut renderer = Renderer::new(config);

    if let Some(path) = args.export.as_deref() {
        renderer
            .export_still(path)
            .with_context(|| format!("failed to export still frame to {}", path.display()))?;
        return Ok(());
    }

    renderer.run().context("preview window failed")?;
    tracing::info!("clean shutdown");
    Ok(())
}

/// Maps a failed run onto the process exit status.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<LaunchError>() {
        Some(launch) if launch.is_windowing_failure() => WINDOWING_FAILURE_STATUS,
        _ => 1,
    }
}

fn initialise_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windowing_failures_exit_with_minus_one() {
        let err = anyhow::Error::new(LaunchError::EventLoop(
            winit::error::EventLoopError::RecreationAttempt,
        ))
        .context("preview window failed");
        assert_eq!(exit_status(&err), WINDOWING_FAILURE_STATUS);
    }

    #[test]
    fn other_failures_exit_with_one() {
        let gpu = anyhow::Error::new(LaunchError::Gpu(anyhow::anyhow!("no adapter")))
            .context("preview window failed");
        assert_eq!(exit_status(&gpu), 1);
        assert_eq!(exit_status(&anyhow::anyhow!("disk full")), 1);
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
