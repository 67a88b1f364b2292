//! Error types for profile configuration, registration, and light extraction

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Plugin registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A record with the same category, version and key is already registered
    #[error("plugin '{key}' is already registered in category '{category}' at version {version}")]
    Conflict {
        /// Plugin category
        category: String,
        /// Schema version
        version: u32,
        /// Lookup key
        key: String,
    },

    /// No record exists for the requested category and key
    #[error("no plugin '{key}' registered in category '{category}'")]
    NotFound {
        /// Plugin category
        category: String,
        /// Lookup key
        key: String,
    },

    /// Records must carry a non-empty category and key
    #[error("plugin records need a non-empty category and key")]
    EmptyKey,
}

/// Errors raised while reading a light material
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightError {
    /// The material has no light shader parameter
    #[error("light material has no '{0}' parameter")]
    MissingShaderName(String),

    /// The light shader name is not one the renderer knows
    #[error("unknown light shader '{0}'")]
    UnknownShader(String),

    /// A parameter exists but holds the wrong kind of value
    #[error("parameter '{name}' should be {expected}")]
    WrongType {
        /// Parameter path
        name: String,
        /// Expected value kind
        expected: &'static str,
    },
}

/// Any error the crate can produce
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Registry failure
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Light material failure
    #[error(transparent)]
    Light(#[from] LightError),
}

/// Result alias for crate operations
pub type ProfileResult<T> = Result<T, ProfileError>;
