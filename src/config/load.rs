use std::{env, path::PathBuf};

use crate::error::{Error, Result};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads environment variables (prefix `SONGCARD__`) on top
/// of an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SONGCARD")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if self.ui.placeholder.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "ui.placeholder must not be empty".to_string(),
            ));
        }
        if self.audio.tick_ms == 0 {
            return Err(Error::InvalidConfig("audio.tick_ms must be >= 1".to_string()));
        }
        if let Some(song) = self.songs.iter().find(|s| s.source.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "song {:?} has an empty source",
                song.title
            )));
        }
        Ok(())
    }
}

/// Resolve the config path from `SONGCARD_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SONGCARD_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/songcard/config.toml`
/// or `~/.config/songcard/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("songcard").join("config.toml"))
}
