//! Declarative provisioning of directory trees.
//!
//! A provisioning run is an ordered list of [`Resource`] descriptors applied
//! against a target directory with a set of [`Facts`]. File contents come from
//! generators that see the facts read-only, so the same descriptor list can
//! populate any profile.

pub mod error;
pub mod facts;
pub mod render;

pub use error::ProvisionError;
pub use facts::{Facts, FACT_PROFILE_NAME, FACT_PROFILE_PATH};
pub use render::render_template;

use crate::shared::fs_atomic::atomic_write_file;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub type ContentGenerator<'a> = Box<dyn Fn(&Facts) -> Result<Vec<u8>, ProvisionError> + 'a>;

pub enum Resource<'a> {
    Directory {
        path: PathBuf,
    },
    File {
        path: PathBuf,
        generator: ContentGenerator<'a>,
    },
}

impl<'a> Resource<'a> {
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory { path: path.into() }
    }

    pub fn static_file(path: impl Into<PathBuf>, content: &'a [u8]) -> Self {
        Self::File {
            path: path.into(),
            generator: Box::new(move |_: &Facts| Ok(content.to_vec())),
        }
    }

    /// A file whose `{{ fact }}` placeholders are filled in at apply time.
    pub fn template(path: impl Into<PathBuf>, template: &'a str) -> Self {
        let path = path.into();
        let origin = path.display().to_string();
        Self::File {
            path,
            generator: Box::new(move |facts: &Facts| {
                render_template(template, facts, &origin).map(String::into_bytes)
            }),
        }
    }

    pub fn generated<F>(path: impl Into<PathBuf>, generator: F) -> Self
    where
        F: Fn(&Facts) -> Result<Vec<u8>, ProvisionError> + 'a,
    {
        Self::File {
            path: path.into(),
            generator: Box::new(generator),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory { path } | Self::File { path, .. } => path,
        }
    }
}

impl fmt::Debug for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory { path } => f.debug_struct("Directory").field("path", path).finish(),
            Self::File { path, .. } => f.debug_struct("File").field("path", path).finish(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Absolute paths touched, in application order.
    pub applied: Vec<PathBuf>,
}

/// Applies `resources` in declaration order under `target`.
///
/// Stops at the first failure. Whatever was written before the failure stays
/// on disk; the caller decides whether to discard the target.
pub fn apply(
    target: &Path,
    resources: &[Resource<'_>],
    facts: &Facts,
) -> Result<ApplyReport, ProvisionError> {
    let mut report = ApplyReport::default();
    for resource in resources {
        let relative = resource.path();
        validate_relative_path(relative)?;
        let destination = target.join(relative);
        match resource {
            Resource::Directory { .. } => {
                fs::create_dir_all(&destination).map_err(|source| ProvisionError::CreateDir {
                    path: destination.display().to_string(),
                    source,
                })?;
            }
            Resource::File { generator, .. } => {
                let content = generator(facts).map_err(|err| match err {
                    ProvisionError::Generate { source, .. } => ProvisionError::Generate {
                        path: destination.display().to_string(),
                        source,
                    },
                    other => other,
                })?;
                atomic_write_file(&destination, &content).map_err(|source| {
                    ProvisionError::Write {
                        path: destination.display().to_string(),
                        source,
                    }
                })?;
            }
        }
        report.applied.push(destination);
    }
    Ok(report)
}

fn validate_relative_path(path: &Path) -> Result<(), ProvisionError> {
    let invalid = |reason: &str| ProvisionError::InvalidPath {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };
    if path.as_os_str().is_empty() {
        return Err(invalid("path must be non-empty"));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn profile_facts(name: &str, path: &Path) -> Facts {
        let mut facts = Facts::new();
        facts.insert(FACT_PROFILE_NAME, name).expect("name");
        facts
            .insert(FACT_PROFILE_PATH, path.display().to_string())
            .expect("path");
        facts
    }

    #[test]
    fn applies_resources_in_declaration_order() {
        let temp = tempdir().expect("tempdir");
        let facts = profile_facts("dev", temp.path());
        let resources = [
            Resource::directory("stack"),
            Resource::template("stack/stack.env", "PROFILE={{ profile_name }}\n"),
            Resource::static_file("README", b"static"),
        ];

        let report = apply(temp.path(), &resources, &facts).expect("apply");

        assert_eq!(
            report.applied,
            vec![
                temp.path().join("stack"),
                temp.path().join("stack/stack.env"),
                temp.path().join("README"),
            ]
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("stack/stack.env")).expect("read"),
            "PROFILE=dev\n"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("README")).expect("read"),
            "static"
        );
    }

    #[test]
    fn file_before_its_directory_fails() {
        let temp = tempdir().expect("tempdir");
        let facts = profile_facts("dev", temp.path());
        let resources = [
            Resource::static_file("stack/stack.env", b"x"),
            Resource::directory("stack"),
        ];

        let err = apply(temp.path(), &resources, &facts).expect_err("missing parent");
        assert!(matches!(err, ProvisionError::Write { .. }));
        assert!(!temp.path().join("stack").exists());
    }

    #[test]
    fn missing_fact_stops_the_apply() {
        let temp = tempdir().expect("tempdir");
        let facts = profile_facts("dev", temp.path());
        let resources = [
            Resource::template("a.txt", "{{ profile_name }}"),
            Resource::template("b.txt", "{{ registry_url }}"),
            Resource::static_file("c.txt", b"never"),
        ];

        let err = apply(temp.path(), &resources, &facts).expect_err("missing fact");
        assert!(matches!(err, ProvisionError::MissingFact { ref key } if key == "registry_url"));
        assert_eq!(err.kind(), crate::shared::errors::ErrorKind::MissingFact);
        assert!(temp.path().join("a.txt").exists());
        assert!(!temp.path().join("b.txt").exists());
        assert!(!temp.path().join("c.txt").exists());
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let temp = tempdir().expect("tempdir");
        let facts = Facts::new();
        for path in ["../outside", "/etc/passwd", ""] {
            let err = apply(temp.path(), &[Resource::static_file(path, b"x")], &facts)
                .expect_err("invalid path");
            assert!(matches!(err, ProvisionError::InvalidPath { .. }), "{path}");
        }
    }

    #[test]
    fn generator_errors_carry_the_destination_path() {
        #[derive(Debug, thiserror::Error)]
        #[error("no user")]
        struct NoUser;

        let temp = tempdir().expect("tempdir");
        let resources = [Resource::generated("profile.json", |_| {
            Err(ProvisionError::Generate {
                path: String::new(),
                source: Box::new(NoUser),
            })
        })];

        let err = apply(temp.path(), &resources, &Facts::new()).expect_err("generator fails");
        assert!(err.generator_source::<NoUser>().is_some());
        assert!(err
            .to_string()
            .contains(&temp.path().join("profile.json").display().to_string()));
    }
}
