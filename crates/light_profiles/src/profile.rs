//! # Renderer Profiles
//!
//! A renderer profile maps the abstract idea of a scene light onto one
//! renderer's shader naming: which material parameter holds the light shader,
//! what value goes into it, and which shader parameters carry color,
//! intensity and exposure.
//!
//! Attribute names are exposed as ordered alias lists. The first alias is the
//! preferred one; later entries are older spellings kept so lights authored
//! against earlier shader versions still resolve.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resolve::{resolve_alias, ParameterSet};

/// Light attributes a profile can name on its light shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightAttribute {
    /// Light color
    Color,
    /// Light intensity
    Intensity,
    /// Exposure, in stops
    Exposure,
}

impl LightAttribute {
    /// Every attribute, in display order
    pub const ALL: [Self; 3] = [Self::Color, Self::Intensity, Self::Exposure];

    /// Lowercase attribute name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Intensity => "intensity",
            Self::Exposure => "exposure",
        }
    }
}

impl fmt::Display for LightAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ordered parameter-name aliases for one attribute, most preferred first
///
/// Borrows either compile-time constants or names owned by a loaded profile.
#[derive(Debug, Clone, Copy)]
pub enum AliasList<'a> {
    /// Names baked into the binary
    Static(&'static [&'static str]),
    /// Names owned by the profile
    Owned(&'a [String]),
}

impl<'a> AliasList<'a> {
    /// An empty list, used for unsupported attributes
    pub const EMPTY: AliasList<'static> = AliasList::Static(&[]);

    /// Iterate aliases in preference order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (statics, owned): (&'a [&'a str], &'a [String]) = match *self {
            Self::Static(names) => (names, &[]),
            Self::Owned(names) => (&[], names),
        };
        statics.iter().copied().chain(owned.iter().map(String::as_str))
    }

    /// The preferred alias
    pub fn first(&self) -> Option<&'a str> {
        self.iter().next()
    }

    /// Number of aliases
    pub fn len(&self) -> usize {
        match self {
            Self::Static(names) => names.len(),
            Self::Owned(names) => names.len(),
        }
    }

    /// Whether the attribute has no aliases at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the aliases into owned strings
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

impl PartialEq for AliasList<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for AliasList<'_> {}

impl PartialEq<[&str]> for AliasList<'_> {
    fn eq(&self, other: &[&str]) -> bool {
        self.iter().eq(other.iter().copied())
    }
}

impl<const N: usize> PartialEq<[&str; N]> for AliasList<'_> {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.iter().eq(other.iter().copied())
    }
}

/// Capability every renderer profile provides to the host
///
/// All queries are pure reads of immutable data; profiles are shared between
/// threads as `Arc<dyn RendererProfile>`.
pub trait RendererProfile: Send + Sync + fmt::Debug {
    /// Shader category the light shader belongs to
    fn light_shader_type(&self) -> &str;

    /// Material parameter that should reference the light shader
    fn material_parameter_name(&self) -> &str;

    /// Value to store in the material parameter
    fn material_parameter_value(&self) -> &str;

    /// Renderer identifier, also the registry key
    fn renderer_name(&self) -> &str;

    /// Alias list for an attribute; empty when the renderer lacks it
    fn param_names(&self, attribute: LightAttribute) -> AliasList<'_>;

    /// Whether the renderer exposes the attribute at all
    fn supports(&self, attribute: LightAttribute) -> bool {
        !self.param_names(attribute).is_empty()
    }

    /// First alias of `attribute` present on a shader instance
    fn resolve<'a>(
        &'a self,
        attribute: LightAttribute,
        params: &dyn ParameterSet,
    ) -> Option<&'a str> {
        resolve_alias(self.param_names(attribute), params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_list_order_and_first() {
        let owned = vec!["a.colour".to_string(), "a.color".to_string()];
        let list = AliasList::Owned(&owned);

        assert_eq!(list.len(), 2);
        assert_eq!(list.first(), Some("a.colour"));
        assert_eq!(list, ["a.colour", "a.color"]);
    }

    #[test]
    fn test_static_and_owned_lists_compare_equal() {
        const NAMES: &[&str] = &["p.intensity"];
        let owned = vec!["p.intensity".to_string()];

        assert_eq!(AliasList::Static(NAMES), AliasList::Owned(&owned));
    }

    #[test]
    fn test_empty_list() {
        assert!(AliasList::EMPTY.is_empty());
        assert_eq!(AliasList::EMPTY.first(), None);
        assert!(AliasList::EMPTY.to_vec().is_empty());
    }

    #[test]
    fn test_attribute_names() {
        let names: Vec<_> = LightAttribute::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(names, ["color", "intensity", "exposure"]);
    }
}
