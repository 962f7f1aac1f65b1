pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod settings;

pub use error::ConfigError;
pub use load::load_config;
pub use paths::{
    LocationManager, CONFIG_FILE_NAME, DEFAULT_STATE_DIR, LOG_FILE_REL_PATH, PROFILES_DIR,
    STATE_ROOT_ENV_VAR,
};
pub use save::write_config_file;
pub use settings::ApplicationConfig;
