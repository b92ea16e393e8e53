//! Where the config file lives, and writing the first-run template.

use std::io::Write;
use std::path::{Path, PathBuf};

use argus_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "argus";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/argus/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| config_path_in(&dir))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

pub(crate) fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(CONFIG_FILE)
}

/// Write the commented template to `path`, creating parent directories.
///
/// An existing file is left as it is.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |what: &str, target: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", target.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| io_error("cannot create config directory", parent, e))?;
    }

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(io_error("cannot create config file", path, e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error("cannot write config template to", path, e))?;

    info!("wrote config template to {}", path.display());
    Ok(())
}
