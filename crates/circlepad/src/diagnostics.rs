//! Start-up log lines describing the process and its environment.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use renderer::RendererConfig;

pub fn log_startup(config: &RendererConfig, export: Option<&Path>) {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z"),
        "starting circlepad"
    );
    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        radius = config.initial_radius.get(),
        vsync = ?config.vsync,
        export = ?export,
        "resolved configuration"
    );

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            tracing::warn!("failed to resolve working directory: {err}");
            return;
        }
    };
    match count_entries(&cwd) {
        Ok(entries) => tracing::info!(cwd = %cwd.display(), entries, "working directory"),
        Err(err) => tracing::warn!(cwd = %cwd.display(), "failed to list working directory: {err}"),
    }
}

pub fn count_entries(dir: &Path) -> io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        entry?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn counts_files_and_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        assert_eq!(count_entries(dir.path()).unwrap(), 3);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(count_entries(&dir.path().join("gone")).is_err());
    }

    #[test]
    fn log_startup_survives_without_subscriber() {
        log_startup(&RendererConfig::default(), None);
    }
}
