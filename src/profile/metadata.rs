use super::environment::{ProfileEnvironment, UserResolutionError};
use crate::provision::{Facts, ProvisionError, Resource, FACT_PROFILE_NAME, FACT_PROFILE_PATH};
use crate::shared::errors::ErrorKind;
use crate::shared::fs_atomic::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const METADATA_FILE_NAME: &str = "profile.json";

/// Descriptive record stored in every profile directory.
///
/// Field order here is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub user: String,
    pub version: String,
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("missing fact `{key}`")]
    MissingFact { key: String },
    #[error(transparent)]
    UserResolution(#[from] UserResolutionError),
    #[error("failed to encode profile metadata for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read profile metadata {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write profile metadata {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid profile metadata in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl MetadataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFact { .. } => ErrorKind::MissingFact,
            Self::UserResolution(_) => ErrorKind::UserResolution,
            Self::Read { .. } | Self::Write { .. } => ErrorKind::Io,
            Self::Encode { .. } | Self::Parse { .. } => ErrorKind::Parse,
        }
    }
}

fn require_fact<'a>(facts: &'a Facts, key: &str) -> Result<&'a str, MetadataError> {
    facts
        .require(key)
        .map_err(|_| MetadataError::MissingFact {
            key: key.to_string(),
        })
}

/// Builds a fresh record for the profile named by the facts, stamped with the
/// environment's user, version and clock.
pub fn metadata_from_facts(
    facts: &Facts,
    env: &dyn ProfileEnvironment,
) -> Result<Metadata, MetadataError> {
    let name = require_fact(facts, FACT_PROFILE_NAME)?;
    let path = require_fact(facts, FACT_PROFILE_PATH)?;
    let user = env.current_user()?;
    Ok(Metadata {
        name: name.to_string(),
        date_created: env.now(),
        user,
        version: env.tool_version(),
        path: path.to_string(),
    })
}

pub fn encode_metadata(metadata: &Metadata, path: &Path) -> Result<Vec<u8>, MetadataError> {
    let mut body =
        serde_json::to_vec_pretty(metadata).map_err(|source| MetadataError::Encode {
            path: path.display().to_string(),
            source,
        })?;
    body.push(b'\n');
    Ok(body)
}

/// Writes a new metadata record to the file at `path`.
pub fn write_metadata(
    path: &Path,
    facts: &Facts,
    env: &dyn ProfileEnvironment,
) -> Result<Metadata, MetadataError> {
    let metadata = metadata_from_facts(facts, env)?;
    let body = encode_metadata(&metadata, path)?;
    atomic_write_file(path, &body).map_err(|source| MetadataError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(metadata)
}

pub fn load_metadata(path: &Path) -> Result<Metadata, MetadataError> {
    let raw = fs::read(path).map_err(|source| MetadataError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| MetadataError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// The metadata file as a provisioning resource, so that fresh profiles and
/// clones get their record from the same apply step.
pub fn metadata_resource(env: &dyn ProfileEnvironment) -> Resource<'_> {
    Resource::generated(METADATA_FILE_NAME, move |facts| {
        let metadata = metadata_from_facts(facts, env).map_err(into_provision_error)?;
        encode_metadata(&metadata, Path::new(METADATA_FILE_NAME)).map_err(into_provision_error)
    })
}

fn into_provision_error(err: MetadataError) -> ProvisionError {
    match err {
        MetadataError::MissingFact { key } => ProvisionError::MissingFact { key },
        other => ProvisionError::Generate {
            path: METADATA_FILE_NAME.to_string(),
            source: Box::new(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedEnvironment {
        user: Option<&'static str>,
    }

    impl ProfileEnvironment for FixedEnvironment {
        fn current_user(&self) -> Result<String, UserResolutionError> {
            self.user
                .map(str::to_string)
                .ok_or_else(|| UserResolutionError("no user database".to_string()))
        }

        fn tool_version(&self) -> String {
            "abc1234".to_string()
        }

        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    fn facts(name: &str, path: &str) -> Facts {
        let mut facts = Facts::new();
        facts.insert(FACT_PROFILE_NAME, name).expect("name");
        facts.insert(FACT_PROFILE_PATH, path).expect("path");
        facts
    }

    #[test]
    fn encodes_fields_in_stable_order_with_indentation() {
        let env = FixedEnvironment { user: Some("jane") };
        let metadata = metadata_from_facts(&facts("default", "/p/default"), &env).expect("build");
        let body = encode_metadata(&metadata, Path::new("profile.json")).expect("encode");

        assert_eq!(
            String::from_utf8(body).expect("utf8"),
            "{\n  \"name\": \"default\",\n  \"date_created\": \"2024-03-01T12:30:00Z\",\n  \"user\": \"jane\",\n  \"version\": \"abc1234\",\n  \"path\": \"/p/default\"\n}\n"
        );
    }

    #[test]
    fn write_requires_profile_facts() {
        let temp = tempfile::tempdir().expect("tempdir");
        let env = FixedEnvironment { user: Some("jane") };
        let mut only_name = Facts::new();
        only_name.insert(FACT_PROFILE_NAME, "default").expect("name");

        let err = write_metadata(&temp.path().join(METADATA_FILE_NAME), &only_name, &env)
            .expect_err("missing path fact");
        assert_eq!(err.kind(), ErrorKind::MissingFact);
        assert!(err.to_string().contains(FACT_PROFILE_PATH));
        assert!(!temp.path().join(METADATA_FILE_NAME).exists());
    }

    #[test]
    fn write_reports_user_resolution_failures() {
        let temp = tempfile::tempdir().expect("tempdir");
        let env = FixedEnvironment { user: None };
        let err = write_metadata(
            &temp.path().join(METADATA_FILE_NAME),
            &facts("default", "/p/default"),
            &env,
        )
        .expect_err("no user");
        assert_eq!(err.kind(), ErrorKind::UserResolution);
    }

    #[test]
    fn load_distinguishes_io_and_parse_failures() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = load_metadata(&temp.path().join("absent.json")).expect_err("missing");
        assert_eq!(missing.kind(), ErrorKind::Io);

        let truncated = temp.path().join("truncated.json");
        fs::write(&truncated, "{\n  \"name\": \"default\",").expect("write");
        assert_eq!(
            load_metadata(&truncated).expect_err("truncated").kind(),
            ErrorKind::Parse
        );

        let wrong_shape = temp.path().join("wrong.json");
        fs::write(&wrong_shape, "{\"name\": \"default\", \"user\": 7}").expect("write");
        assert_eq!(
            load_metadata(&wrong_shape).expect_err("schema").kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn resource_maps_user_failures_to_generator_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let env = FixedEnvironment { user: None };
        let err = crate::provision::apply(
            temp.path(),
            &[metadata_resource(&env)],
            &facts("default", "/p/default"),
        )
        .expect_err("no user");
        let source = err
            .generator_source::<MetadataError>()
            .expect("metadata error source");
        assert_eq!(source.kind(), ErrorKind::UserResolution);
    }
}
