//! # Imagine Renderer Profile
//!
//! Tells the host how lights are wired into Imagine's shading network. The
//! light shader is referenced through the `imagineLightShader` material
//! parameter and its settings live under the `imagineLightParams` group.
//!
//! Two revisions of this profile exist. Revision 1 spells the color parameter
//! `color` and has no exposure; revision 2 spells it `colour` and adds
//! `exposure`. Both register under schema version 1.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profile::{AliasList, LightAttribute, RendererProfile};

/// Fixed names used by the Imagine renderer
pub mod constants {
    /// Shader category of light shaders
    pub const LIGHT_SHADER_TYPE: &str = "light";
    /// Material parameter holding the light shader
    pub const MATERIAL_PARAMETER_NAME: &str = "imagineLightShader";
    /// Value stored in the material parameter
    pub const MATERIAL_PARAMETER_VALUE: &str = "imagine.light";
    /// Renderer identifier
    pub const RENDERER_NAME: &str = "imagine";
    /// Group holding the light shader's parameters
    pub const PARAMS_GROUP: &str = "imagineLightParams";
}

const V1_COLOR_PARAM_NAMES: &[&str] = &["imagineLightParams.color"];
const V2_COLOR_PARAM_NAMES: &[&str] = &["imagineLightParams.colour"];
const INTENSITY_PARAM_NAMES: &[&str] = &["imagineLightParams.intensity"];
const EXPOSURE_PARAM_NAMES: &[&str] = &["imagineLightParams.exposure"];

/// Revision of the Imagine profile's parameter naming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileRevision {
    /// `color` spelling, no exposure
    V1,
    /// `colour` spelling, adds exposure
    #[default]
    V2,
}

impl fmt::Display for ProfileRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("revision 1"),
            Self::V2 => f.write_str("revision 2"),
        }
    }
}

/// Light profile for the Imagine renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImagineProfile {
    revision: ProfileRevision,
}

impl ImagineProfile {
    /// Create the profile for a given revision
    pub const fn new(revision: ProfileRevision) -> Self {
        Self { revision }
    }

    /// Which revision this profile follows
    pub const fn revision(&self) -> ProfileRevision {
        self.revision
    }

    const fn aliases(&self, attribute: LightAttribute) -> &'static [&'static str] {
        match (self.revision, attribute) {
            (ProfileRevision::V1, LightAttribute::Color) => V1_COLOR_PARAM_NAMES,
            (ProfileRevision::V2, LightAttribute::Color) => V2_COLOR_PARAM_NAMES,
            (_, LightAttribute::Intensity) => INTENSITY_PARAM_NAMES,
            (ProfileRevision::V1, LightAttribute::Exposure) => &[],
            (ProfileRevision::V2, LightAttribute::Exposure) => EXPOSURE_PARAM_NAMES,
        }
    }
}

impl RendererProfile for ImagineProfile {
    fn light_shader_type(&self) -> &str {
        constants::LIGHT_SHADER_TYPE
    }

    fn material_parameter_name(&self) -> &str {
        constants::MATERIAL_PARAMETER_NAME
    }

    fn material_parameter_value(&self) -> &str {
        constants::MATERIAL_PARAMETER_VALUE
    }

    fn renderer_name(&self) -> &str {
        constants::RENDERER_NAME
    }

    fn param_names(&self, attribute: LightAttribute) -> AliasList<'_> {
        AliasList::Static(self.aliases(attribute))
    }
}
