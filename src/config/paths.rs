use crate::config::ConfigError;
use std::path::{Path, PathBuf};

pub const STATE_ROOT_ENV_VAR: &str = "STACKCTL_DATA_HOME";
pub const DEFAULT_STATE_DIR: &str = ".stackctl";
pub const PROFILES_DIR: &str = "profiles";
pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const LOG_FILE_REL_PATH: &str = "logs/stackctl.log";

/// Resolves every on-disk location from a single state root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationManager {
    root: PathBuf,
}

impl LocationManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$STACKCTL_DATA_HOME` when set, else `$HOME/.stackctl`, made absolute.
    pub fn from_env() -> Result<Self, ConfigError> {
        let root = match std::env::var_os(STATE_ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => {
                let home = std::env::var_os("HOME")
                    .filter(|v| !v.is_empty())
                    .ok_or(ConfigError::HomeDirectoryUnavailable)?;
                PathBuf::from(home).join(DEFAULT_STATE_DIR)
            }
        };
        let root = std::path::absolute(&root).map_err(|source| ConfigError::ResolveRoot {
            path: root.display().to_string(),
            source,
        })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.root.join(PROFILES_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE_REL_PATH)
    }
}
