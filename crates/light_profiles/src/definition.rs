//! Data-driven renderer profiles
//!
//! Lets a host describe additional renderers in a config file instead of code.
//! A definition carries the same fields as a built-in profile and implements
//! the same [`RendererProfile`] capability.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::profile::{AliasList, LightAttribute, RendererProfile};

fn default_light_shader_type() -> String {
    "light".to_string()
}

/// A renderer profile loaded from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    /// Renderer identifier, used as the registry key
    pub renderer_name: String,
    /// Shader category of light shaders
    #[serde(default = "default_light_shader_type")]
    pub light_shader_type: String,
    /// Material parameter holding the light shader
    pub material_parameter_name: String,
    /// Value stored in the material parameter
    pub material_parameter_value: String,
    /// Color aliases, most preferred first
    #[serde(default)]
    pub color_param_names: Vec<String>,
    /// Intensity aliases, most preferred first
    #[serde(default)]
    pub intensity_param_names: Vec<String>,
    /// Exposure aliases, most preferred first
    #[serde(default)]
    pub exposure_param_names: Vec<String>,
}

impl ProfileDefinition {
    /// Create a definition with no attribute aliases
    pub fn new(
        renderer_name: impl Into<String>,
        material_parameter_name: impl Into<String>,
        material_parameter_value: impl Into<String>,
    ) -> Self {
        Self {
            renderer_name: renderer_name.into(),
            light_shader_type: default_light_shader_type(),
            material_parameter_name: material_parameter_name.into(),
            material_parameter_value: material_parameter_value.into(),
            color_param_names: Vec::new(),
            intensity_param_names: Vec::new(),
            exposure_param_names: Vec::new(),
        }
    }

    /// Set the aliases for one attribute
    pub fn with_aliases<I, S>(mut self, attribute: LightAttribute, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.aliases_mut(attribute) = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Snapshot any profile into an editable definition
    pub fn from_profile(profile: &dyn RendererProfile) -> Self {
        Self {
            renderer_name: profile.renderer_name().to_owned(),
            light_shader_type: profile.light_shader_type().to_owned(),
            material_parameter_name: profile.material_parameter_name().to_owned(),
            material_parameter_value: profile.material_parameter_value().to_owned(),
            color_param_names: profile.param_names(LightAttribute::Color).to_vec(),
            intensity_param_names: profile.param_names(LightAttribute::Intensity).to_vec(),
            exposure_param_names: profile.param_names(LightAttribute::Exposure).to_vec(),
        }
    }

    /// Check the definition is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("renderer_name", &self.renderer_name),
            ("light_shader_type", &self.light_shader_type),
            ("material_parameter_name", &self.material_parameter_name),
            ("material_parameter_value", &self.material_parameter_value),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}': {} cannot be empty",
                    self.renderer_name, field
                )));
            }
        }

        for attribute in LightAttribute::ALL {
            let aliases = self.aliases(attribute);
            if aliases.iter().any(|alias| alias.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}': empty {} alias",
                    self.renderer_name, attribute
                )));
            }
            if let Some(dup) = aliases
                .iter()
                .enumerate()
                .find(|(i, alias)| aliases[..*i].contains(alias))
                .map(|(_, alias)| alias)
            {
                return Err(ConfigError::Invalid(format!(
                    "profile '{}': {} alias '{}' listed twice",
                    self.renderer_name, attribute, dup
                )));
            }
        }

        Ok(())
    }

    fn aliases(&self, attribute: LightAttribute) -> &[String] {
        match attribute {
            LightAttribute::Color => &self.color_param_names,
            LightAttribute::Intensity => &self.intensity_param_names,
            LightAttribute::Exposure => &self.exposure_param_names,
        }
    }

    fn aliases_mut(&mut self, attribute: LightAttribute) -> &mut Vec<String> {
        match attribute {
            LightAttribute::Color => &mut self.color_param_names,
            LightAttribute::Intensity => &mut self.intensity_param_names,
            LightAttribute::Exposure => &mut self.exposure_param_names,
        }
    }
}

impl RendererProfile for ProfileDefinition {
    fn light_shader_type(&self) -> &str {
        &self.light_shader_type
    }

    fn material_parameter_name(&self) -> &str {
        &self.material_parameter_name
    }

    fn material_parameter_value(&self) -> &str {
        &self.material_parameter_value
    }

    fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    fn param_names(&self, attribute: LightAttribute) -> AliasList<'_> {
        AliasList::Owned(self.aliases(attribute))
    }
}
