use stackctl::config::{ApplicationConfig, ConfigError, LocationManager};
use stackctl::profile::{CreateOptions, Metadata, MetadataError, Profile, ProfileError};
use stackctl::provision::{Facts, ProvisionError, Resource};
use std::path::Path;

#[test]
fn library_exposes_profile_lifecycle_entry_points() {
    let _create: fn(
        &stackctl::profile::ProfileManager,
        &CreateOptions,
    ) -> Result<Profile, ProfileError> = stackctl::profile::ProfileManager::create_profile;
    let _delete: fn(&stackctl::profile::ProfileManager, &str) -> Result<(), ProfileError> =
        stackctl::profile::ProfileManager::delete_profile;
    let _load: fn(&stackctl::profile::ProfileManager, &str) -> Result<Profile, ProfileError> =
        stackctl::profile::ProfileManager::load_profile;
    let _list: fn(&Path) -> Result<stackctl::profile::ProfileListing, ProfileError> =
        stackctl::profile::fetch_all_profiles;
    let _load_metadata: fn(&Path) -> Result<Metadata, MetadataError> =
        stackctl::profile::load_metadata;
    let _apply: fn(
        &Path,
        &[Resource<'_>],
        &Facts,
    ) -> Result<stackctl::provision::ApplyReport, ProvisionError> = stackctl::provision::apply;
    let _write_config: fn(
        &LocationManager,
        &ApplicationConfig,
    ) -> Result<std::path::PathBuf, ConfigError> = stackctl::config::write_config_file;
}

#[test]
fn locations_hang_off_one_state_root() {
    let locations = LocationManager::new("/var/lib/stackctl");
    assert_eq!(
        locations.profile_dir(),
        Path::new("/var/lib/stackctl/profiles")
    );
    assert_eq!(
        locations.config_file(),
        Path::new("/var/lib/stackctl/config.yml")
    );
    assert_eq!(
        locations.log_path(),
        Path::new("/var/lib/stackctl/logs/stackctl.log")
    );
}
