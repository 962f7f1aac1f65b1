use crate::shared::errors::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("missing fact `{key}`")]
    MissingFact { key: String },
    #[error("fact `{key}` is already set")]
    DuplicateFact { key: String },
    #[error("invalid resource path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("invalid template for {path}: {reason}")]
    Template { path: String, reason: String },
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
    #[error("failed to generate {path}: {source}")]
    Generate {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFact { .. } => ErrorKind::MissingFact,
            Self::DuplicateFact { .. } | Self::InvalidPath { .. } | Self::Template { .. } => {
                ErrorKind::Validation
            }
            Self::CreateDir { .. } | Self::Write { .. } | Self::Generate { .. } => ErrorKind::Io,
        }
    }

    /// Returns the generator's own error when it is of type `E`.
    pub fn generator_source<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Generate { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
