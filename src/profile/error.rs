use super::metadata::MetadataError;
use crate::config::ConfigError;
use crate::provision::ProvisionError;
use crate::shared::errors::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid profile name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },
    #[error("profile `{name}` already exists at {path}")]
    AlreadyExists { name: String, path: String },
    #[error("profile `{name}` not found at {path}")]
    NotFound { name: String, path: String },
    #[error("source profile `{name}` cannot be cloned: {reason}")]
    SourceNotFound { name: String, reason: String },
    #[error("profile `{name}` at {path} is not a valid profile: {source}")]
    InvalidProfile {
        name: String,
        path: String,
        #[source]
        source: MetadataError,
    },
    #[error("profile directory `{name}` holds metadata for profile `{found}`")]
    MetadataMismatch { name: String, found: String },
    #[error("failed to provision profile `{name}`: {source}")]
    Provision {
        name: String,
        #[source]
        source: ProvisionError,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove profile directory {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read profiles directory {path}: {source}")]
    ReadRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read profile config {path}: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in profile config {path}: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ProfileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. } => ErrorKind::Validation,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. }
            | Self::SourceNotFound { .. }
            | Self::InvalidProfile { .. }
            | Self::MetadataMismatch { .. } => ErrorKind::NotFound,
            Self::Provision { source, .. } => source
                .generator_source::<MetadataError>()
                .map(MetadataError::kind)
                .unwrap_or_else(|| source.kind()),
            Self::Copy { .. }
            | Self::CreateDir { .. }
            | Self::Remove { .. }
            | Self::ReadRoot { .. }
            | Self::ReadConfig { .. } => ErrorKind::Io,
            Self::ParseConfig { .. } => ErrorKind::Parse,
            Self::Config(err) => err.kind(),
        }
    }
}
