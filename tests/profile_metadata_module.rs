use chrono::{DateTime, Utc};
use stackctl::profile::{
    load_metadata, write_metadata, ProfileEnvironment, UserResolutionError, METADATA_FILE_NAME,
};
use stackctl::provision::{Facts, FACT_PROFILE_NAME, FACT_PROFILE_PATH};

struct ClockEnvironment;

impl ProfileEnvironment for ClockEnvironment {
    fn current_user(&self) -> Result<String, UserResolutionError> {
        Ok("builder".to_string())
    }

    fn tool_version(&self) -> String {
        "9f2c1de".to_string()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[test]
fn written_metadata_loads_back_unchanged() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join(METADATA_FILE_NAME);
    let mut facts = Facts::new();
    facts.insert(FACT_PROFILE_NAME, "default").expect("name");
    facts
        .insert(FACT_PROFILE_PATH, temp.path().display().to_string())
        .expect("path");

    let written = write_metadata(&path, &facts, &ClockEnvironment).expect("write");
    let loaded = load_metadata(&path).expect("load");

    assert_eq!(loaded, written);
    assert_eq!(loaded.user, "builder");
    assert_eq!(loaded.version, "9f2c1de");
    assert_eq!(loaded.path, temp.path().display().to_string());
}

#[test]
fn metadata_written_by_older_builds_still_loads() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join(METADATA_FILE_NAME);
    std::fs::write(
        &path,
        r#"{
  "name": "default",
  "date_created": "2021-06-01T10:20:30.123456+02:00",
  "user": "jane",
  "version": "undefined",
  "path": "/home/jane/.stackctl/profiles/default"
}
"#,
    )
    .expect("write");

    let metadata = load_metadata(&path).expect("load");
    assert_eq!(metadata.date_created.to_rfc3339(), "2021-06-01T08:20:30.123456+00:00");
}
