use std::{env, path::PathBuf};

use super::schema::{Settings, is_plain_file_name};

/// Configuration loading helpers.
///
/// `Settings::load` layers an optional config file under environment
/// variables (prefix `MP3SPLIT__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MP3SPLIT")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !self.split.default_tracks_in_range() {
            return Err(format!(
                "split.default_tracks must be between 1 and 50, got {}",
                self.split.default_tracks
            ));
        }
        if self.split.max_files == Some(0) {
            return Err("split.max_files must be >= 1 when set".to_string());
        }
        if self.tools.ffprobe.trim().is_empty() || self.tools.ffmpeg.trim().is_empty() {
            return Err("tools.ffprobe and tools.ffmpeg must not be empty".to_string());
        }
        if !is_plain_file_name(&self.output.archive_name) {
            return Err(format!(
                "output.archive_name must be a plain file name, got {:?}",
                self.output.archive_name
            ));
        }
        if self.library.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.extensions must list at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MP3SPLIT_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MP3SPLIT_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/mp3split/config.toml`
/// or `~/.config/mp3split/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("mp3split").join("config.toml"))
}
