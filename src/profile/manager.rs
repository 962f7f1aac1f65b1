use super::copy::copy_tree;
use super::environment::{ProfileEnvironment, SystemEnvironment};
use super::metadata::{load_metadata, metadata_resource, Metadata, METADATA_FILE_NAME};
use super::template::base_profile_resources;
use super::{CreateOptions, Profile, ProfileError, DEFAULT_PROFILE};
use crate::config::LocationManager;
use crate::provision::{self, Facts, ProvisionError, FACT_PROFILE_NAME, FACT_PROFILE_PATH};
use crate::shared::ids::ProfileName;
use crate::shared::logging::append_event_log;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A profile directory that could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProfile {
    pub name: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileListing {
    /// Loadable profiles, in directory enumeration order.
    pub profiles: Vec<Metadata>,
    pub skipped: Vec<SkippedProfile>,
}

/// Lists every profile directory directly under `root`.
///
/// A directory whose metadata cannot be loaded is reported in
/// [`ProfileListing::skipped`] instead of failing the listing. A missing root
/// lists as empty.
pub fn fetch_all_profiles(root: &Path) -> Result<ProfileListing, ProfileError> {
    let read_root_err = |source| ProfileError::ReadRoot {
        path: root.display().to_string(),
        source,
    };
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ProfileListing::default())
        }
        Err(err) => return Err(read_root_err(err)),
    };

    let mut listing = ProfileListing::default();
    for entry in entries {
        let entry = entry.map_err(read_root_err)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match load_metadata(&path.join(METADATA_FILE_NAME)) {
            Ok(metadata) => listing.profiles.push(metadata),
            Err(err) => listing.skipped.push(SkippedProfile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                reason: err.to_string(),
            }),
        }
    }
    Ok(listing)
}

pub(crate) fn parse_profile_name(raw: &str) -> Result<ProfileName, ProfileError> {
    ProfileName::parse(raw).map_err(|reason| ProfileError::InvalidName {
        name: raw.to_string(),
        reason,
    })
}

/// Creates, deletes, lists and loads the profiles under one state root.
#[derive(Debug, Clone)]
pub struct ProfileManager<E = SystemEnvironment> {
    locations: LocationManager,
    env: E,
}

impl ProfileManager<SystemEnvironment> {
    pub fn new(locations: LocationManager) -> Self {
        Self::with_environment(locations, SystemEnvironment)
    }
}

impl<E: ProfileEnvironment> ProfileManager<E> {
    pub fn with_environment(locations: LocationManager, env: E) -> Self {
        Self { locations, env }
    }

    pub fn locations(&self) -> &LocationManager {
        &self.locations
    }

    pub fn profiles_root(&self) -> PathBuf {
        self.locations.profile_dir()
    }

    pub fn profile_path(&self, name: &ProfileName) -> PathBuf {
        self.profiles_root().join(name.as_str())
    }

    pub fn create_profile(&self, options: &CreateOptions) -> Result<Profile, ProfileError> {
        let name = parse_profile_name(&options.name)?;
        let path = self.profile_path(&name);
        if fs::symlink_metadata(&path).is_ok() {
            return Err(already_exists(&name, &path));
        }
        let source = match options.from_profile.as_deref().filter(|v| !v.is_empty()) {
            Some(from) => Some(self.load_profile(from).map_err(|err| match err {
                ProfileError::InvalidName { .. } | ProfileError::Config(_) => err,
                other => ProfileError::SourceNotFound {
                    name: from.to_string(),
                    reason: other.to_string(),
                },
            })?),
            None => None,
        };

        let root = self.profiles_root();
        fs::create_dir_all(&root).map_err(|source| ProfileError::CreateDir {
            path: root.display().to_string(),
            source,
        })?;
        fs::create_dir(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::AlreadyExists {
                already_exists(&name, &path)
            } else {
                ProfileError::CreateDir {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        if let Err(err) = self.populate(&name, &path, source.as_ref()) {
            self.discard_partial_profile(&name, &path);
            return Err(err);
        }

        let profile = self.load_profile(name.as_str())?;
        match &source {
            Some(from) => self.log(
                "info",
                "profile.cloned",
                "cloned profile",
                serde_json::json!({
                    "profile": name.as_str(),
                    "from": from.name.as_str(),
                    "path": path.display().to_string(),
                }),
            ),
            None => self.log(
                "info",
                "profile.created",
                "created profile",
                serde_json::json!({
                    "profile": name.as_str(),
                    "path": path.display().to_string(),
                }),
            ),
        }
        Ok(profile)
    }

    fn populate(
        &self,
        name: &ProfileName,
        path: &Path,
        source: Option<&Profile>,
    ) -> Result<(), ProfileError> {
        let provision_err = |source: ProvisionError| ProfileError::Provision {
            name: name.to_string(),
            source,
        };
        let facts = Facts::try_from_pairs([
            (FACT_PROFILE_NAME, name.to_string()),
            (FACT_PROFILE_PATH, path.display().to_string()),
        ])
        .map_err(provision_err)?;

        match source {
            None => {
                provision::apply(path, &base_profile_resources(&self.env), &facts)
                    .map_err(provision_err)?;
            }
            Some(from) => {
                copy_tree(&from.path, path)?;
                provision::apply(path, &[metadata_resource(&self.env)], &facts)
                    .map_err(provision_err)?;
            }
        }
        Ok(())
    }

    fn discard_partial_profile(&self, name: &ProfileName, path: &Path) {
        if let Err(err) = fs::remove_dir_all(path) {
            self.log(
                "error",
                "profile.cleanup_failed",
                "failed to remove partially created profile",
                serde_json::json!({
                    "profile": name.as_str(),
                    "path": path.display().to_string(),
                    "error": err.to_string(),
                }),
            );
        }
    }

    /// Removes the profile directory and everything below it.
    pub fn delete_profile(&self, name: &str) -> Result<(), ProfileError> {
        let name = parse_profile_name(name)?;
        let path = self.profile_path(&name);
        if !path.is_dir() {
            return Err(ProfileError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }
        fs::remove_dir_all(&path).map_err(|source| ProfileError::Remove {
            path: path.display().to_string(),
            source,
        })?;
        self.log(
            "info",
            "profile.deleted",
            "deleted profile",
            serde_json::json!({
                "profile": name.as_str(),
                "path": path.display().to_string(),
            }),
        );
        Ok(())
    }

    pub fn fetch_all_profiles(&self) -> Result<ProfileListing, ProfileError> {
        let listing = fetch_all_profiles(&self.profiles_root())?;
        for skipped in &listing.skipped {
            self.log(
                "warn",
                "profile.skipped",
                "skipped unreadable profile directory",
                serde_json::json!({
                    "profile": skipped.name,
                    "path": skipped.path.display().to_string(),
                    "reason": skipped.reason,
                }),
            );
        }
        Ok(listing)
    }

    /// Loads a profile, requiring its directory and a metadata record that
    /// names it.
    pub fn load_profile(&self, name: &str) -> Result<Profile, ProfileError> {
        let name = parse_profile_name(name)?;
        let path = self.profile_path(&name);
        if !path.is_dir() {
            return Err(ProfileError::NotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }
        let metadata = load_metadata(&path.join(METADATA_FILE_NAME)).map_err(|source| {
            ProfileError::InvalidProfile {
                name: name.to_string(),
                path: path.display().to_string(),
                source,
            }
        })?;
        if metadata.name != name.as_str() {
            return Err(ProfileError::MetadataMismatch {
                name: name.to_string(),
                found: metadata.name,
            });
        }
        Ok(Profile {
            name,
            path,
            metadata,
        })
    }

    /// Creates the `default` profile unless a directory for it already exists.
    pub fn ensure_default_profile(&self) -> Result<Option<Profile>, ProfileError> {
        let name = parse_profile_name(DEFAULT_PROFILE)?;
        if fs::symlink_metadata(self.profile_path(&name)).is_ok() {
            return Ok(None);
        }
        self.create_profile(&CreateOptions::new(DEFAULT_PROFILE))
            .map(Some)
    }

    pub(crate) fn log(&self, level: &str, event: &str, message: &str, fields: Value) {
        append_event_log(&self.locations.log_path(), level, event, message, fields);
    }
}

fn already_exists(name: &ProfileName, path: &Path) -> ProfileError {
    ProfileError::AlreadyExists {
        name: name.to_string(),
        path: path.display().to_string(),
    }
}
