//! Rendering of profile listings.

use crate::profile::Metadata;
use crate::shared::errors::ErrorKind;
use chrono::SecondsFormat;
use tabled::{Table, Tabled};

pub const TABLE_FORMAT: &str = "table";
pub const JSON_FORMAT: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Result<Self, OutputError> {
        match raw {
            TABLE_FORMAT => Ok(Self::Table),
            JSON_FORMAT => Ok(Self::Json),
            other => Err(OutputError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("format {format} not supported")]
    UnsupportedFormat { format: String },
    #[error("failed to encode profile list as json: {0}")]
    Encode(#[from] serde_json::Error),
}

impl OutputError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Encode(_) => ErrorKind::Parse,
        }
    }
}

#[derive(Debug, Tabled)]
struct ProfileRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date Created")]
    date_created: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Path")]
    path: String,
}

impl From<&Metadata> for ProfileRow {
    fn from(metadata: &Metadata) -> Self {
        Self {
            name: metadata.name.clone(),
            date_created: metadata
                .date_created
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            user: metadata.user.clone(),
            version: metadata.version.clone(),
            path: metadata.path.clone(),
        }
    }
}

/// Renders the whole listing into a string so nothing is printed when
/// rendering fails.
pub fn render_profiles(profiles: &[Metadata], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<ProfileRow> = profiles.iter().map(ProfileRow::from).collect();
            Ok(Table::new(rows).to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string(profiles)?),
    }
}
