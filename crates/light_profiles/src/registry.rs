//! # Plugin Registry
//!
//! Host-owned table of plugin records. Each record is the tuple
//! `(category, version, key, implementation)`; the host groups records by
//! category and looks implementations up by key, optionally pinning a schema
//! version.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::RegistryError;
use crate::profile::RendererProfile;

/// Category under which renderer light profiles register
pub const GAFFER_PROFILE_CATEGORY: &str = "GafferProfile";

/// Schema version of renderer light profile records
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// One registration record
#[derive(Debug, Clone)]
pub struct PluginRecord {
    /// Plugin category
    pub category: String,
    /// Schema version the implementation follows
    pub version: u32,
    /// Lookup key within the category
    pub key: String,
    /// The profile itself
    pub implementation: Arc<dyn RendererProfile>,
}

impl PluginRecord {
    /// Create a record
    pub fn new(
        category: impl Into<String>,
        version: u32,
        key: impl Into<String>,
        implementation: Arc<dyn RendererProfile>,
    ) -> Self {
        Self {
            category: category.into(),
            version,
            key: key.into(),
            implementation,
        }
    }

    /// Record for a renderer light profile, keyed by its renderer name
    pub fn profile<P: RendererProfile + 'static>(profile: P) -> Self {
        let key = profile.renderer_name().to_owned();
        Self::new(GAFFER_PROFILE_CATEGORY, PROFILE_SCHEMA_VERSION, key, Arc::new(profile))
    }
}

/// What to do when a record's `(category, version, key)` is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Refuse the second registration
    #[default]
    Reject,
    /// Replace the existing record
    Replace,
}

/// Registered plugins, grouped by category and key
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    records: HashMap<(String, String), BTreeMap<u32, PluginRecord>>,
    policy: ConflictPolicy,
}

impl PluginRegistry {
    /// Create an empty registry that rejects conflicting records
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a conflict policy
    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            records: HashMap::new(),
            policy,
        }
    }

    /// Current conflict policy
    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Register a record under the registry's conflict policy
    pub fn register(&mut self, record: PluginRecord) -> Result<(), RegistryError> {
        self.register_with_policy(record, self.policy)
    }

    /// Register a record, overriding the conflict policy for this call
    pub fn register_with_policy(
        &mut self,
        record: PluginRecord,
        policy: ConflictPolicy,
    ) -> Result<(), RegistryError> {
        if record.category.is_empty() || record.key.is_empty() {
            return Err(RegistryError::EmptyKey);
        }

        let versions = self
            .records
            .entry((record.category.clone(), record.key.clone()))
            .or_default();

        if versions.contains_key(&record.version) {
            match policy {
                ConflictPolicy::Reject => {
                    log::warn!(
                        "Rejected duplicate plugin {}/{} v{}",
                        record.category,
                        record.key,
                        record.version
                    );
                    return Err(RegistryError::Conflict {
                        category: record.category,
                        version: record.version,
                        key: record.key,
                    });
                }
                ConflictPolicy::Replace => {
                    log::warn!(
                        "Replacing plugin {}/{} v{}",
                        record.category,
                        record.key,
                        record.version
                    );
                }
            }
        } else {
            log::debug!(
                "Registered plugin {}/{} v{}",
                record.category,
                record.key,
                record.version
            );
        }

        versions.insert(record.version, record);
        Ok(())
    }

    /// Record at an exact version
    pub fn get(&self, category: &str, key: &str, version: u32) -> Option<&PluginRecord> {
        self.versions(category, key)?.get(&version)
    }

    /// Record with the highest version
    pub fn latest(&self, category: &str, key: &str) -> Option<&PluginRecord> {
        self.versions(category, key)?.values().next_back()
    }

    /// Like [`latest`](Self::latest), but reports a missing record as an error
    pub fn require(&self, category: &str, key: &str) -> Result<&PluginRecord, RegistryError> {
        self.latest(category, key).ok_or_else(|| RegistryError::NotFound {
            category: category.to_owned(),
            key: key.to_owned(),
        })
    }

    /// Light profile for a renderer
    pub fn profile(&self, renderer_name: &str) -> Option<Arc<dyn RendererProfile>> {
        self.latest(GAFFER_PROFILE_CATEGORY, renderer_name)
            .map(|record| Arc::clone(&record.implementation))
    }

    /// Every registered light profile, at its latest version, sorted by key
    pub fn profiles(&self) -> Vec<Arc<dyn RendererProfile>> {
        self.keys(GAFFER_PROFILE_CATEGORY)
            .into_iter()
            .filter_map(|key| self.profile(key))
            .collect()
    }

    /// Sorted keys registered in a category
    pub fn keys(&self, category: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .records
            .keys()
            .filter(|(c, _)| c == category)
            .map(|(_, k)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Sorted, de-duplicated category names
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.records.keys().map(|(c, _)| c.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// All records, in no particular order
    pub fn records(&self) -> impl Iterator<Item = &PluginRecord> {
        self.records.values().flat_map(BTreeMap::values)
    }

    /// Number of records across all versions
    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn versions(&self, category: &str, key: &str) -> Option<&BTreeMap<u32, PluginRecord>> {
        self.records.get(&(category.to_owned(), key.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ProfileDefinition;
    use crate::imagine::{ImagineProfile, ProfileRevision};

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginRecord::profile(ImagineProfile::new(ProfileRevision::V2)))
            .unwrap();

        let record = registry.get(GAFFER_PROFILE_CATEGORY, "imagine", 1).unwrap();
        assert_eq!(record.key, "imagine");
        assert_eq!(record.version, 1);
        assert_eq!(record.implementation.material_parameter_value(), "imagine.light");
        assert!(registry.get(GAFFER_PROFILE_CATEGORY, "imagine", 2).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let mut registry = PluginRegistry::new();
        registry
            .register(PluginRecord::profile(ImagineProfile::new(ProfileRevision::V1)))
            .unwrap();

        let err = registry
            .register(PluginRecord::profile(ImagineProfile::new(ProfileRevision::V2)))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Conflict {
                category: GAFFER_PROFILE_CATEGORY.to_string(),
                version: 1,
                key: "imagine".to_string(),
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replace_policy_keeps_last() {
        let mut registry = PluginRegistry::with_policy(ConflictPolicy::Replace);
        registry
            .register(PluginRecord::profile(ProfileDefinition::new("imagine", "a", "first")))
            .unwrap();
        registry
            .register(PluginRecord::profile(ProfileDefinition::new("imagine", "a", "second")))
            .unwrap();

        let profile = registry.profile("imagine").unwrap();
        assert_eq!(profile.material_parameter_value(), "second");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_latest_picks_highest_version() {
        let mut registry = PluginRegistry::new();
        for (version, value) in [(1, "old"), (3, "newest"), (2, "newer")] {
            let profile = Arc::new(ProfileDefinition::new("r", "p", value));
            registry
                .register(PluginRecord::new(GAFFER_PROFILE_CATEGORY, version, "r", profile))
                .unwrap();
        }

        let latest = registry.latest(GAFFER_PROFILE_CATEGORY, "r").unwrap();
        assert_eq!(latest.version, 3);
        assert_eq!(latest.implementation.material_parameter_value(), "newest");

        let mut versions: Vec<u32> = registry.records().map(|record| record.version).collect();
        versions.sort_unstable();
        assert_eq!(versions, [1, 2, 3]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_profiles_sorted_by_key() {
        let mut registry = PluginRegistry::new();
        for name in ["zeta", "alpha", "imagine"] {
            registry
                .register(PluginRecord::profile(ProfileDefinition::new(name, "p", "v")))
                .unwrap();
        }
        registry
            .register(PluginRecord::new(
                "OtherCategory",
                1,
                "beta",
                Arc::new(ProfileDefinition::new("beta", "p", "v")),
            ))
            .unwrap();

        let names: Vec<String> = registry
            .profiles()
            .iter()
            .map(|p| p.renderer_name().to_owned())
            .collect();
        assert_eq!(names, ["alpha", "imagine", "zeta"]);
        assert_eq!(registry.categories(), ["GafferProfile", "OtherCategory"]);
    }

    #[test]
    fn test_missing_and_empty_keys() {
        let mut registry = PluginRegistry::new();
        assert!(registry.profile("imagine").is_none());
        assert!(matches!(
            registry.require(GAFFER_PROFILE_CATEGORY, "imagine"),
            Err(RegistryError::NotFound { .. })
        ));

        let record = PluginRecord::profile(ProfileDefinition::new("", "p", "v"));
        assert_eq!(registry.register(record), Err(RegistryError::EmptyKey));
        assert!(registry.is_empty());
    }
}
