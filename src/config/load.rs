use super::{ApplicationConfig, ConfigError, LocationManager};

/// Loads the application config; a missing file yields the defaults.
pub fn load_config(locations: &LocationManager) -> Result<ApplicationConfig, ConfigError> {
    let path = locations.config_file();
    if !path.exists() {
        return Ok(ApplicationConfig::default());
    }
    ApplicationConfig::from_path(&path)
}
