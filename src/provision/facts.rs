use super::ProvisionError;
use std::collections::BTreeMap;

pub const FACT_PROFILE_NAME: &str = "profile_name";
pub const FACT_PROFILE_PATH: &str = "profile_path";

/// Write-once key/value context for a single provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    values: BTreeMap<String, String>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ProvisionError> {
        let key = key.into();
        if self.values.contains_key(&key) {
            return Err(ProvisionError::DuplicateFact { key });
        }
        self.values.insert(key, value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, ProvisionError> {
        self.get(key).ok_or_else(|| ProvisionError::MissingFact {
            key: key.to_string(),
        })
    }

    /// Builds facts from pairs, failing on the first key given twice.
    pub fn try_from_pairs<I, K, V>(pairs: I) -> Result<Self, ProvisionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut facts = Facts::new();
        for (key, value) in pairs {
            facts.insert(key, value)?;
        }
        Ok(facts)
    }
}
