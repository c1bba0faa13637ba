use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to `config_path`, or to the default
/// location when none is given.
pub fn setup(config_path: Option<&str>) -> Result<()> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    let written = setup_at_path(&path)?;
    println!("Created default configuration at {}", written.display());
    Ok(())
}

/// Writes the example configuration to `path`, creating parent directories.
/// Refuses to overwrite an existing file.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Could not write config file {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote example configuration");
    Ok(path.to_path_buf())
}
