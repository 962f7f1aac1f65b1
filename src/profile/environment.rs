use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to resolve current user: {0}")]
pub struct UserResolutionError(pub String);

/// Process-level facts stamped into new metadata records.
pub trait ProfileEnvironment {
    fn current_user(&self) -> Result<String, UserResolutionError>;
    fn tool_version(&self) -> String;
    fn now(&self) -> DateTime<Utc>;
}

const USER_ENV_VARS: [&str; 3] = ["USER", "USERNAME", "LOGNAME"];

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl ProfileEnvironment for SystemEnvironment {
    /// Looks the process uid up in the OS user database, then falls back to
    /// the login environment variables.
    fn current_user(&self) -> Result<String, UserResolutionError> {
        let lookup_err = match whoami::fallible::username() {
            Ok(name) if !name.trim().is_empty() => return Ok(name.trim().to_string()),
            Ok(_) => "empty user name".to_string(),
            Err(err) => err.to_string(),
        };
        user_from_env_vars().ok_or_else(|| {
            UserResolutionError(format!(
                "user lookup failed ({lookup_err}) and none of {} is set",
                USER_ENV_VARS.join(", ")
            ))
        })
    }

    fn tool_version(&self) -> String {
        build_version().to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

fn user_from_env_vars() -> Option<String> {
    USER_ENV_VARS
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Commit injected at build time, or the package version for local builds.
pub fn build_version() -> &'static str {
    option_env!("STACKCTL_BUILD_COMMIT").unwrap_or(env!("CARGO_PKG_VERSION"))
}
