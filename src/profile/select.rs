use super::environment::ProfileEnvironment;
use super::{Profile, ProfileError, ProfileManager};
use crate::config::{ApplicationConfig, ConfigError};

pub const PROFILE_ENV_VAR: &str = "STACKCTL_PROFILE";

/// Makes `name` the active profile.
///
/// The profile must load before `config` is touched; `persist` then stores
/// the updated config.
pub fn use_profile<E, F>(
    manager: &ProfileManager<E>,
    config: &mut ApplicationConfig,
    name: &str,
    persist: F,
) -> Result<Profile, ProfileError>
where
    E: ProfileEnvironment,
    F: FnOnce(&ApplicationConfig) -> Result<(), ConfigError>,
{
    let profile = manager.load_profile(name)?;
    config.set_current_profile(profile.name.clone());
    persist(config)?;
    manager.log(
        "info",
        "profile.selected",
        "selected active profile",
        serde_json::json!({ "profile": profile.name.as_str() }),
    );
    Ok(profile)
}

/// Picks the profile a command runs against: an explicit request, then the
/// environment override, then the configured current profile.
pub fn select_profile_name(
    explicit: Option<&str>,
    env_override: Option<&str>,
    config: &ApplicationConfig,
) -> String {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| env_override.filter(|v| !v.is_empty()))
        .unwrap_or_else(|| config.current_profile())
        .to_string()
}

pub fn active_profile_name(explicit: Option<&str>, config: &ApplicationConfig) -> String {
    let env_override = std::env::var(PROFILE_ENV_VAR).ok();
    select_profile_name(explicit, env_override.as_deref(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ids::ProfileName;

    #[test]
    fn explicit_beats_env_beats_config() {
        let mut config = ApplicationConfig::default();
        assert_eq!(select_profile_name(None, None, &config), "default");

        config.set_current_profile(ProfileName::parse("staging").expect("name"));
        assert_eq!(select_profile_name(None, None, &config), "staging");
        assert_eq!(select_profile_name(None, Some("ci"), &config), "ci");
        assert_eq!(select_profile_name(Some("dev"), Some("ci"), &config), "dev");
        assert_eq!(select_profile_name(Some(""), Some(""), &config), "staging");
    }
}
