//! Configuration system

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub use crate::error::ConfigError;
use crate::definition::ProfileDefinition;
use crate::imagine::{constants, ProfileRevision};
use crate::registry::ConflictPolicy;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        // Try different formats
        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn default_log_level() -> String {
    "info".to_string()
}

/// # Profiles Configuration
///
/// Host-side settings for registering renderer light profiles: which Imagine
/// revision to register, how to treat duplicate registrations, and any extra
/// renderers described as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Default log filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Imagine profile revision to register
    #[serde(default)]
    pub imagine_revision: ProfileRevision,
    /// Handling of duplicate `(category, version, key)` registrations
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
    /// Additional data-driven profiles
    #[serde(default)]
    pub profiles: Vec<ProfileDefinition>,
}

impl ProfilesConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            log_level: default_log_level(),
            imagine_revision: ProfileRevision::default(),
            conflict_policy: ConflictPolicy::default(),
            profiles: Vec::new(),
        }
    }

    /// Set the Imagine revision
    pub fn with_imagine_revision(mut self, revision: ProfileRevision) -> Self {
        self.imagine_revision = revision;
        self
    }

    /// Set the conflict policy
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Add a data-driven profile
    pub fn with_profile(mut self, profile: ProfileDefinition) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Validate the configuration
    ///
    /// A data-driven profile may replace the built-in Imagine profile only
    /// under [`ConflictPolicy::Replace`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.renderer_name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}' defined more than once",
                    profile.renderer_name
                )));
            }
            if profile.renderer_name == constants::RENDERER_NAME
                && self.conflict_policy == ConflictPolicy::Reject
            {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}' clashes with the built-in profile; set conflict_policy = \"replace\"",
                    profile.renderer_name
                )));
            }
        }

        Ok(())
    }
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ProfilesConfig {}
