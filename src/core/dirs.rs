use crate::core::error::QuickOpenError;
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf, QuickOpenError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|base| base.join("fzf-quick-open"))
        .ok_or(QuickOpenError::ConfigDirectoryNotFound)
}

/// Location of the settings file used when no `--config` path is given.
pub fn get_settings_file() -> Result<PathBuf, QuickOpenError> {
    Ok(get_config_directory()?.join("config.json"))
}

/// Directory that holds the selection fifo on POSIX systems.
pub fn get_channel_directory() -> PathBuf {
    std::env::temp_dir()
}
