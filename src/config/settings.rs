use crate::config::ConfigError;
use crate::profile::DEFAULT_PROFILE;
use crate::shared::ids::ProfileName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Global application config. Keys this crate does not know about are kept
/// so other components can share the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_profile: Option<ProfileName>,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_yaml::Value>,
}

impl ApplicationConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The active profile, `default` when none was ever selected.
    pub fn current_profile(&self) -> &str {
        self.current_profile
            .as_ref()
            .map(ProfileName::as_str)
            .unwrap_or(DEFAULT_PROFILE)
    }

    pub fn set_current_profile(&mut self, name: ProfileName) {
        self.current_profile = Some(name);
    }
}
