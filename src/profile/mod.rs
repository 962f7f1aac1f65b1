//! Profile lifecycle: directory-backed environments under the profiles root.

pub mod config;
mod copy;
pub mod environment;
pub mod error;
pub mod manager;
pub mod metadata;
pub mod select;
pub mod template;

pub use config::{ProfileConfig, PROFILE_CONFIG_FILE_NAME};
pub use environment::{build_version, ProfileEnvironment, SystemEnvironment, UserResolutionError};
pub use error::ProfileError;
pub use manager::{fetch_all_profiles, ProfileListing, ProfileManager, SkippedProfile};
pub use metadata::{
    encode_metadata, load_metadata, metadata_from_facts, metadata_resource, write_metadata,
    Metadata, MetadataError, METADATA_FILE_NAME,
};
pub use select::{active_profile_name, select_profile_name, use_profile, PROFILE_ENV_VAR};
pub use template::base_profile_resources;

use crate::shared::ids::ProfileName;
use std::path::PathBuf;

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: String,
    /// Existing profile to clone. `None` or empty creates from the base template.
    pub from_profile: Option<String>,
}

impl CreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from_profile: None,
        }
    }

    pub fn from_profile(mut self, source: impl Into<String>) -> Self {
        self.from_profile = Some(source.into());
        self
    }
}

/// A loaded profile. `path` is always `<profiles root>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: ProfileName,
    pub path: PathBuf,
    pub metadata: Metadata,
}

impl Profile {
    pub fn config(&self) -> Result<ProfileConfig, ProfileError> {
        ProfileConfig::load(&self.path)
    }
}
