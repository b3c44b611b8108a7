//! Logging setup. The terminal belongs to the UI, so log lines go to a file.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Resolve the log file from `SONGCARD_LOG_FILE` or the XDG state directory.
pub fn log_file_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SONGCARD_LOG_FILE") {
        return Some(PathBuf::from(p));
    }

    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("songcard").join("songcard.log"))
}

/// Install the global subscriber. Returns the log path, or `None` when logging is off.
pub fn init() -> Option<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_env("SONGCARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("songcard=info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::{EnvGuard, env_lock};

    #[test]
    fn log_file_path_prefers_explicit_override() {
        let _lock = env_lock();
        let _g = EnvGuard::set("SONGCARD_LOG_FILE", "/tmp/songcard-test.log");
        assert_eq!(
            log_file_path().unwrap(),
            PathBuf::from("/tmp/songcard-test.log")
        );
    }

    #[test]
    fn log_file_path_uses_xdg_state_home() {
        let _lock = env_lock();
        let _g1 = EnvGuard::remove("SONGCARD_LOG_FILE");
        let _g2 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
        assert_eq!(
            log_file_path().unwrap(),
            PathBuf::from("/tmp/xdg-state")
                .join("songcard")
                .join("songcard.log")
        );
    }

    #[test]
    fn log_file_path_falls_back_to_home_local_state() {
        let _lock = env_lock();
        let _g1 = EnvGuard::remove("SONGCARD_LOG_FILE");
        let _g2 = EnvGuard::remove("XDG_STATE_HOME");
        let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");
        assert_eq!(
            log_file_path().unwrap(),
            PathBuf::from("/tmp/home-dir/.local/state/songcard/songcard.log")
        );
    }
}
