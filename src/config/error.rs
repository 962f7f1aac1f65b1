use crate::shared::errors::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode yaml for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to resolve state root {path}: {source}")]
    ResolveRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to resolve home directory for the stackctl state root")]
    HomeDirectoryUnavailable,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { .. }
            | Self::CreateDir { .. }
            | Self::Write { .. }
            | Self::ResolveRoot { .. } => ErrorKind::Io,
            Self::Encode { .. } | Self::Parse { .. } => ErrorKind::Parse,
            Self::HomeDirectoryUnavailable => ErrorKind::NotFound,
        }
    }
}
