use super::ProfileError;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const PROFILE_CONFIG_FILE_NAME: &str = "config.yml";

/// User overrides read from a profile's `config.yml`, flattened to dotted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    values: BTreeMap<String, String>,
}

impl ProfileConfig {
    /// Reads `config.yml` from `profile_path`. A profile without one has an
    /// empty config.
    pub fn load(profile_path: &Path) -> Result<Self, ProfileError> {
        let path = profile_path.join(PROFILE_CONFIG_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ProfileError::ReadConfig {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        let document: Value =
            serde_yaml::from_str(&raw).map_err(|source| ProfileError::ParseConfig {
                path: path.display().to_string(),
                source,
            })?;
        let mut values = BTreeMap::new();
        flatten_into(&mut values, String::new(), &document);
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn flatten_into(out: &mut BTreeMap<String, String>, prefix: String, value: &Value) {
    match value {
        Value::Mapping(mapping) => {
            for (key, child) in mapping {
                let Some(key) = scalar_text(key) else {
                    continue;
                };
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(out, full_key, child);
            }
        }
        Value::Sequence(items) => {
            let joined = items.iter().filter_map(scalar_text).collect::<Vec<_>>();
            if !prefix.is_empty() {
                out.insert(prefix, joined.join(","));
            }
        }
        Value::Tagged(tagged) => flatten_into(out, prefix, &tagged.value),
        other => {
            if prefix.is_empty() {
                return;
            }
            if let Some(text) = scalar_text(other) {
                out.insert(prefix, text);
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = ProfileConfig::load(temp.path()).expect("load");
        assert_eq!(config.iter().count(), 0);
        assert_eq!(config.get("stack.elastic_version"), None);
    }

    #[test]
    fn nested_keys_are_flattened() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join(PROFILE_CONFIG_FILE_NAME),
            "stack:\n  elastic_version: \"8.12.0\"\n  logstash_enabled: true\n  ports: [9200, 5601]\nregistry: local\nempty: null\n",
        )
        .expect("write");

        let config = ProfileConfig::load(temp.path()).expect("load");

        assert_eq!(config.get("stack.elastic_version"), Some("8.12.0"));
        assert_eq!(config.get("stack.logstash_enabled"), Some("true"));
        assert_eq!(config.get("stack.ports"), Some("9200,5601"));
        assert_eq!(config.get("registry"), Some("local"));
        assert_eq!(config.get("empty"), None);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(PROFILE_CONFIG_FILE_NAME), "stack: [unclosed").expect("write");
        let err = ProfileConfig::load(temp.path()).expect_err("invalid");
        assert_eq!(err.kind(), crate::shared::errors::ErrorKind::Parse);
    }
}
