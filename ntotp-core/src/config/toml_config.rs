//! TOML configuration file loading
//!
//! Reads ntotp configuration from a TOML file in the user's configuration
//! directory. Every setting has a default, so the file is optional.

use crate::config::Config;
use crate::error::{ConfigError, NtotpError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the default configuration directory
///
/// Returns NTOTP_CONFIG_DIR if set, else ~/.config/ntotp. `None` when
/// neither variable is available (containers, bare systemd units).
pub fn get_config_dir() -> Option<PathBuf> {
    resolve_config_dir(
        std::env::var_os("NTOTP_CONFIG_DIR"),
        std::env::var_os("HOME"),
    )
}

fn resolve_config_dir(override_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    match (override_dir, home) {
        (Some(dir), _) if !dir.is_empty() => Some(PathBuf::from(dir)),
        (_, Some(home)) if !home.is_empty() => {
            Some(PathBuf::from(home).join(".config").join("ntotp"))
        }
        _ => None,
    }
}

/// Get the default configuration file path
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the default location
///
/// A missing file, or no configuration directory at all, is not an error;
/// defaults are used instead.
pub fn load_config() -> Result<Config, NtotpError> {
    load_config_at(get_config_path())
}

fn load_config_at(path: Option<PathBuf>) -> Result<Config, NtotpError> {
    match path {
        Some(path) => load_config_or_default(path),
        None => {
            debug!("No configuration directory (HOME unset), using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from `path`, or defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, NtotpError> {
    if !path.as_ref().exists() {
        debug!(path = ?path.as_ref(), "No config file, using defaults");
        return Ok(Config::default());
    }
    load_config_from_path(path)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<Config, NtotpError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => NtotpError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => NtotpError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let config: Config = toml::from_str(&contents)?;

    config
        .validate()
        .map_err(|e| NtotpError::Config(ConfigError::ValidationError { message: e }))?;

    info!(
        "Loaded configuration: {} NTP servers, timeout={}s, skew_steps={}",
        config.ntp.servers.len(),
        config.ntp.timeout_secs,
        config.totp.skew_steps
    );

    Ok(config)
}
