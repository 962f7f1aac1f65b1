use crate::config::{load_config, ApplicationConfig, ConfigError, LocationManager};
use crate::profile::{ProfileError, ProfileManager};

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn map_profile_err(err: ProfileError) -> String {
    err.to_string()
}

pub fn resolve_locations() -> Result<LocationManager, String> {
    LocationManager::from_env().map_err(map_config_err)
}

pub fn profile_manager() -> Result<ProfileManager, String> {
    Ok(ProfileManager::new(resolve_locations()?))
}

pub fn load_app_config(locations: &LocationManager) -> Result<ApplicationConfig, String> {
    load_config(locations).map_err(|err| format!("failed to load current configuration: {err}"))
}
