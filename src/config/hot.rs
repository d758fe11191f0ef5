//! Engine config with hot-reload from a TOML file.
//!
//! On each `current()` call we check the file's modified time and reload if it
//! changed. A file that fails to parse leaves the last good config in place.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
    time::SystemTime,
};
use tracing::{info, warn};

use super::{EngineConfig, DEFAULT_CONFIG_PATH};

/// Hot-reload wrapper: reloads when the config file mtime changes.
#[derive(Debug)]
pub struct HotReloadConfig {
    path: PathBuf,
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    config: EngineConfig,
    last_modified: Option<SystemTime>,
}

impl HotReloadConfig {
    /// Create with a path (defaults to "config/feedback.toml" if `None`).
    /// Starts from defaults until the first successful load.
    pub fn new(path: Option<&Path>) -> Self {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self {
            path,
            inner: RwLock::new(State {
                config: EngineConfig::default(),
                last_modified: None,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest config, reloading first if the file changed.
    pub fn current(&self) -> EngineConfig {
        let mtime = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            // No file: keep whatever we have.
            Err(_) => return self.read().config,
        };

        {
            let guard = self.read();
            if guard.last_modified == Some(mtime) {
                return guard.config;
            }
        }

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Double-check in case another caller reloaded meanwhile.
        if guard.last_modified != Some(mtime) {
            match EngineConfig::load_from_file(&self.path) {
                Ok(cfg) => {
                    info!(path = %self.path.display(), "engine config reloaded");
                    guard.config = cfg;
                }
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "engine config reload failed, keeping previous");
                }
            }
            // Remember the mtime either way so a broken file is not re-parsed on every call.
            guard.last_modified = Some(mtime);
        }
        guard.config
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
