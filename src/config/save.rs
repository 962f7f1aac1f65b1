use super::{ApplicationConfig, ConfigError, LocationManager};
use crate::shared::fs_atomic::atomic_write_file;
use std::fs;
use std::path::{Path, PathBuf};

fn create_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

pub fn write_config_file(
    locations: &LocationManager,
    config: &ApplicationConfig,
) -> Result<PathBuf, ConfigError> {
    let path = locations.config_file();
    create_parent_dir(&path)?;
    let body = serde_yaml::to_string(config).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    atomic_write_file(&path, body.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::shared::ids::ProfileName;
    use tempfile::tempdir;

    #[test]
    fn write_then_load_keeps_current_profile() {
        let temp = tempdir().expect("tempdir");
        let locations = LocationManager::new(temp.path().join("state"));
        assert_eq!(
            load_config(&locations).expect("defaults").current_profile(),
            "default"
        );

        let mut config = ApplicationConfig::default();
        config.set_current_profile(ProfileName::parse("staging").expect("name"));
        let path = write_config_file(&locations, &config).expect("write");

        assert_eq!(path, locations.config_file());
        assert_eq!(
            load_config(&locations).expect("load").current_profile(),
            "staging"
        );
    }
}
