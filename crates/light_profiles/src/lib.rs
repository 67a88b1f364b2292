//! # Light Profiles
//!
//! Renderer light profiles for a host animation and compositing application.
//! A profile tells the host how to wire a scene light into one renderer's
//! shading network: which material parameter references the light shader,
//! what value to put there, and which shader parameters carry color,
//! intensity and exposure.
//!
//! ## Quick Start
//!
//! ```rust
//! use light_profiles::prelude::*;
//!
//! let mut registry = PluginRegistry::new();
//! register_plugins(&mut registry, &ProfilesConfig::default()).unwrap();
//!
//! let imagine = registry.profile("imagine").unwrap();
//! assert_eq!(imagine.material_parameter_name(), "imagineLightShader");
//!
//! let shader_params = ["imagineLightParams.colour", "imagineLightParams.intensity"];
//! assert_eq!(
//!     imagine.resolve(LightAttribute::Color, &shader_params),
//!     Some("imagineLightParams.colour"),
//! );
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod definition;
pub mod error;
pub mod imagine;
pub mod light;
pub mod logging;
pub mod profile;
pub mod registry;
pub mod resolve;

use std::sync::Arc;

pub use config::{Config, ProfilesConfig};
pub use definition::ProfileDefinition;
pub use error::{ConfigError, LightError, ProfileError, ProfileResult, RegistryError};
pub use imagine::{ImagineProfile, ProfileRevision};
pub use profile::{AliasList, LightAttribute, RendererProfile};
pub use registry::{ConflictPolicy, PluginRecord, PluginRegistry, GAFFER_PROFILE_CATEGORY};

/// Registration records this crate contributes
///
/// Contains the Imagine profile at the configured revision followed by every
/// data-driven profile in the configuration.
pub fn plugin_records(config: &ProfilesConfig) -> Vec<PluginRecord> {
    let mut records = Vec::with_capacity(config.profiles.len() + 1);
    records.push(PluginRecord::profile(ImagineProfile::new(config.imagine_revision)));
    records.extend(config.profiles.iter().map(|definition| {
        PluginRecord::new(
            GAFFER_PROFILE_CATEGORY,
            registry::PROFILE_SCHEMA_VERSION,
            definition.renderer_name.clone(),
            Arc::new(definition.clone()),
        )
    }));
    records
}

/// Register this crate's profiles into a host-owned registry
///
/// Called once during host startup. Conflicts follow the configuration's
/// policy, not the registry's. Either every record is registered or, on
/// error, the registry is left untouched.
pub fn register_plugins(
    registry: &mut PluginRegistry,
    config: &ProfilesConfig,
) -> Result<(), ProfileError> {
    config.validate()?;

    let mut staged = registry.clone();
    for record in plugin_records(config) {
        staged.register_with_policy(record, config.conflict_policy)?;
    }
    *registry = staged;

    log::info!(
        "Registered {} renderer profile(s), imagine at {}",
        registry.keys(GAFFER_PROFILE_CATEGORY).len(),
        config.imagine_revision
    );
    Ok(())
}

/// Common imports for profile users
pub mod prelude {
    pub use crate::{
        config::{Config, ProfilesConfig},
        definition::ProfileDefinition,
        error::{ProfileError, ProfileResult},
        imagine::{ImagineProfile, ProfileRevision},
        light::{AttributeGroup, LightSettings, LightShader},
        profile::{LightAttribute, RendererProfile},
        register_plugins,
        registry::{ConflictPolicy, PluginRecord, PluginRegistry},
        resolve::{ParameterSet, ResolvedLightParams},
    };
}
