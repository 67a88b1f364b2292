//! # Imagine Light Materials
//!
//! Reads the light shader assignment from a light location's material
//! attributes and turns it into concrete light settings, using the Imagine
//! profile to find the shader and its color, intensity and exposure
//! parameters.
//!
//! Parameters that are missing, or hold the wrong kind of value, fall back to
//! the renderer's defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::LightError;
use crate::imagine::{constants, ImagineProfile};
use crate::profile::{LightAttribute, RendererProfile};
use crate::resolve::ParameterSet;

/// Radius the renderer gives environment and sky lights
pub const DISTANT_LIGHT_RADIUS: f32 = 1000.0;

// Parameters the renderer itself reads, whatever the profile revision calls them.
const RENDERER_COLOUR_PARAM: &str = "imagineLightParams.colour";
const RENDERER_INTENSITY_PARAM: &str = "imagineLightParams.intensity";

/// A single attribute value on a scene location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Floating point tuple, such as a color
    FloatTuple(Vec<f64>),
    /// String value
    String(String),
    /// Nested group of attributes
    Group(AttributeGroup),
}

/// Named attributes, possibly nested
///
/// Dotted paths (`imagineLightParams.intensity`) address children of nested
/// groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeGroup {
    children: BTreeMap<String, AttributeValue>,
}

impl AttributeGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a direct child
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.children.insert(name.into(), value.into());
    }

    /// Direct child by name
    pub fn child(&self, name: &str) -> Option<&AttributeValue> {
        self.children.get(name)
    }

    /// Descendant by dotted path
    pub fn get(&self, path: &str) -> Option<&AttributeValue> {
        match path.split_once('.') {
            Some((head, rest)) => match self.child(head)? {
                AttributeValue::Group(group) => group.get(rest),
                _ => None,
            },
            None => self.child(path),
        }
    }

    /// Float at `path`, or `default` when absent or not numeric
    pub fn float_or(&self, path: &str, default: f32) -> f32 {
        match self.get(path) {
            Some(AttributeValue::Float(v)) => *v as f32,
            Some(AttributeValue::FloatTuple(v)) => v.first().map_or(default, |x| *x as f32),
            _ => default,
        }
    }

    /// Integer at `path`, or `default` when absent or not an integer
    pub fn int_or(&self, path: &str, default: i64) -> i64 {
        match self.get(path) {
            Some(AttributeValue::Int(v)) => *v,
            _ => default,
        }
    }

    /// Three-component color at `path`, or `default` otherwise
    pub fn colour_or(&self, path: &str, default: [f32; 3]) -> [f32; 3] {
        match self.get(path) {
            Some(AttributeValue::FloatTuple(v)) if v.len() == 3 => {
                [v[0] as f32, v[1] as f32, v[2] as f32]
            }
            _ => default,
        }
    }

    /// String at `path`, or empty
    pub fn string_or_empty(&self, path: &str) -> String {
        match self.get(path) {
            Some(AttributeValue::String(v)) => v.clone(),
            _ => String::new(),
        }
    }

    /// Whether the group has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl ParameterSet for AttributeGroup {
    fn contains_param(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<[f64; 3]> for AttributeValue {
    fn from(value: [f64; 3]) -> Self {
        Self::FloatTuple(value.to_vec())
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(value: Vec<f64>) -> Self {
        Self::FloatTuple(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<AttributeGroup> for AttributeValue {
    fn from(value: AttributeGroup) -> Self {
        Self::Group(value)
    }
}

/// Light shaders the renderer provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightShader {
    /// Point light
    Point,
    /// Sky dome light
    SkyDome,
    /// Image-based environment light
    Environment,
    /// Physically based sun and sky
    PhysicalSky,
}

impl LightShader {
    /// Every shader
    pub const ALL: [Self; 4] = [Self::Point, Self::SkyDome, Self::Environment, Self::PhysicalSky];

    /// Parse a shader name as written in the material
    pub fn from_name(name: &str) -> Result<Self, LightError> {
        Self::ALL
            .into_iter()
            .find(|shader| shader.as_str() == name)
            .ok_or_else(|| LightError::UnknownShader(name.to_owned()))
    }

    /// Shader name as written in the material
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::SkyDome => "SkyDome",
            Self::Environment => "Environment",
            Self::PhysicalSky => "PhysicalSky",
        }
    }
}

impl fmt::Display for LightShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Settings that only apply to some shaders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Point light
    Point,
    /// Sky dome light
    SkyDome {
        /// Dome color
        colour: [f32; 3],
    },
    /// Image-based environment light
    Environment {
        /// Environment map file
        env_map_path: String,
        /// Dome radius
        radius: f32,
    },
    /// Physically based sun and sky
    PhysicalSky {
        /// Day of the year, 1-365
        day_of_year: i64,
        /// Hour of the day
        time_of_day: f32,
        /// Sky contribution scale
        sky_intensity: f32,
        /// Sun contribution scale
        sun_intensity: f32,
        /// Dome radius
        radius: f32,
    },
}

/// Light settings read from a light material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSettings {
    /// Overall intensity
    pub intensity: f32,
    /// Exposure in stops, when the profile names an exposure parameter
    pub exposure: Option<f32>,
    /// Sample count
    pub samples: i64,
    /// Shader-specific settings
    pub kind: LightKind,
}

impl LightSettings {
    /// Shader these settings belong to
    pub fn shader(&self) -> LightShader {
        match self.kind {
            LightKind::Point => LightShader::Point,
            LightKind::SkyDome { .. } => LightShader::SkyDome,
            LightKind::Environment { .. } => LightShader::Environment,
            LightKind::PhysicalSky { .. } => LightShader::PhysicalSky,
        }
    }

    /// Read a light material
    ///
    /// The shader name comes from the profile's material parameter; an absent
    /// parameter group means every setting takes its default.
    pub fn from_material(
        profile: &ImagineProfile,
        material: &AttributeGroup,
    ) -> Result<Self, LightError> {
        let shader_param = profile.material_parameter_name();
        let shader = match material.get(shader_param) {
            Some(AttributeValue::String(name)) => LightShader::from_name(name)?,
            Some(_) => {
                return Err(LightError::WrongType {
                    name: shader_param.to_owned(),
                    expected: "a string",
                })
            }
            None => return Err(LightError::MissingShaderName(shader_param.to_owned())),
        };

        let param = |name: &str| format!("{}.{}", constants::PARAMS_GROUP, name);
        let resolved = |attribute| profile.resolve(attribute, material);
        let resolved_or = |attribute, fallback: &'static str| {
            resolved(attribute).or_else(|| material.contains_param(fallback).then_some(fallback))
        };

        // Point lights take no parameters from the material.
        if shader == LightShader::Point {
            return Ok(Self {
                intensity: 1.0,
                exposure: None,
                samples: 1,
                kind: LightKind::Point,
            });
        }

        let intensity = resolved_or(LightAttribute::Intensity, RENDERER_INTENSITY_PARAM)
            .map_or(1.0, |path| material.float_or(path, 1.0));
        let exposure = if profile.supports(LightAttribute::Exposure) {
            Some(resolved(LightAttribute::Exposure).map_or(0.0, |path| material.float_or(path, 0.0)))
        } else {
            None
        };
        let samples = material.int_or(&param("num_samples"), 1);

        let kind = match shader {
            LightShader::Point => LightKind::Point,
            LightShader::SkyDome => LightKind::SkyDome {
                colour: resolved_or(LightAttribute::Color, RENDERER_COLOUR_PARAM)
                    .map_or([1.0; 3], |path| material.colour_or(path, [1.0; 3])),
            },
            LightShader::Environment => LightKind::Environment {
                env_map_path: material.string_or_empty(&param("env_map_path")),
                radius: DISTANT_LIGHT_RADIUS,
            },
            LightShader::PhysicalSky => LightKind::PhysicalSky {
                day_of_year: material.int_or(&param("day"), 174),
                time_of_day: material.float_or(&param("time"), 17.1),
                sky_intensity: material.float_or(&param("sky_intensity"), 1.0),
                sun_intensity: material.float_or(&param("sun_intensity"), 1.0),
                radius: DISTANT_LIGHT_RADIUS,
            },
        };

        log::debug!("Read {} light (intensity {}, {} samples)", shader, intensity, samples);

        Ok(Self {
            intensity,
            exposure,
            samples,
            kind,
        })
    }
}

/// Whether a light location is muted and should be skipped
pub fn is_muted(location: &AttributeGroup) -> bool {
    location.int_or("mute", 0) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagine::ProfileRevision;

    fn material(shader: &str, params: AttributeGroup) -> AttributeGroup {
        AttributeGroup::new()
            .with("imagineLightShader", shader)
            .with("imagineLightParams", params)
    }

    #[test]
    fn test_parse_shader_names() {
        assert_eq!(LightShader::from_name("SkyDome"), Ok(LightShader::SkyDome));
        assert_eq!(
            LightShader::from_name("Spot"),
            Err(LightError::UnknownShader("Spot".to_string()))
        );
    }

    #[test]
    fn test_dotted_paths() {
        let group = material("Point", AttributeGroup::new().with("intensity", 2.5));
        assert!(group.contains_param("imagineLightParams.intensity"));
        assert!(!group.contains_param("imagineLightParams.colour"));
        assert!(!group.contains_param("imagineLightShader.intensity"));
        assert_eq!(group.float_or("imagineLightParams.intensity", 1.0), 2.5);
        assert_eq!(group.child("imagineLightShader"), Some(&AttributeValue::from("Point")));
        assert_eq!(group.child("imagineLightParams.intensity"), None);
    }

    #[test]
    fn test_sky_dome_reads_colour() {
        let params = AttributeGroup::new()
            .with("intensity", 3.0)
            .with("colour", [0.5, 0.25, 1.0])
            .with("num_samples", 16_i64);
        let settings =
            LightSettings::from_material(&ImagineProfile::default(), &material("SkyDome", params))
                .unwrap();

        assert_eq!(settings.intensity, 3.0);
        assert_eq!(settings.samples, 16);
        assert_eq!(settings.exposure, Some(0.0));
        assert_eq!(settings.kind, LightKind::SkyDome { colour: [0.5, 0.25, 1.0] });
    }

    #[test]
    fn test_revision_1_reads_renderer_colour_spelling() {
        let params = AttributeGroup::new().with("colour", [0.5, 0.5, 0.5]);
        let profile = ImagineProfile::new(ProfileRevision::V1);
        let settings = LightSettings::from_material(&profile, &material("SkyDome", params)).unwrap();

        assert_eq!(settings.kind, LightKind::SkyDome { colour: [0.5; 3] });
        assert_eq!(settings.exposure, None);
    }

    #[test]
    fn test_profile_alias_preferred_over_renderer_spelling() {
        let params = AttributeGroup::new()
            .with("color", [0.25, 0.25, 0.25])
            .with("colour", [0.5, 0.5, 0.5]);
        let profile = ImagineProfile::new(ProfileRevision::V1);
        let settings = LightSettings::from_material(&profile, &material("SkyDome", params)).unwrap();

        assert_eq!(settings.kind, LightKind::SkyDome { colour: [0.25; 3] });
    }

    #[test]
    fn test_physical_sky_defaults() {
        let settings = LightSettings::from_material(
            &ImagineProfile::default(),
            &AttributeGroup::new().with("imagineLightShader", "PhysicalSky"),
        )
        .unwrap();

        assert_eq!(settings.intensity, 1.0);
        assert_eq!(settings.samples, 1);
        assert_eq!(
            settings.kind,
            LightKind::PhysicalSky {
                day_of_year: 174,
                time_of_day: 17.1,
                sky_intensity: 1.0,
                sun_intensity: 1.0,
                radius: DISTANT_LIGHT_RADIUS,
            }
        );
    }

    #[test]
    fn test_environment_map_path() {
        let params = AttributeGroup::new().with("env_map_path", "/maps/studio.exr");
        let settings =
            LightSettings::from_material(&ImagineProfile::default(), &material("Environment", params))
                .unwrap();

        assert_eq!(settings.shader(), LightShader::Environment);
        assert_eq!(
            settings.kind,
            LightKind::Environment {
                env_map_path: "/maps/studio.exr".to_string(),
                radius: DISTANT_LIGHT_RADIUS,
            }
        );
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let params = AttributeGroup::new()
            .with("intensity", "bright")
            .with("num_samples", 4.0)
            .with("colour", vec![1.0, 0.0]);
        let settings =
            LightSettings::from_material(&ImagineProfile::default(), &material("SkyDome", params))
                .unwrap();

        assert_eq!(settings.intensity, 1.0);
        assert_eq!(settings.samples, 1);
        assert_eq!(settings.kind, LightKind::SkyDome { colour: [1.0; 3] });
    }

    #[test]
    fn test_missing_or_bad_shader_name() {
        let profile = ImagineProfile::default();
        assert_eq!(
            LightSettings::from_material(&profile, &AttributeGroup::new()),
            Err(LightError::MissingShaderName("imagineLightShader".to_string()))
        );
        assert!(matches!(
            LightSettings::from_material(&profile, &AttributeGroup::new().with("imagineLightShader", 3_i64)),
            Err(LightError::WrongType { .. })
        ));
    }

    #[test]
    fn test_mute_flag() {
        assert!(is_muted(&AttributeGroup::new().with("mute", 1_i64)));
        assert!(!is_muted(&AttributeGroup::new().with("mute", 0_i64)));
        assert!(!is_muted(&AttributeGroup::new()));
    }
}
