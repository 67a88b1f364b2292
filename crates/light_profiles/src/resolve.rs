//! Alias resolution against a shader's parameters
//!
//! The host owns the shader parameter data; this module only needs to ask
//! whether a name exists on it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

use crate::profile::{AliasList, LightAttribute, RendererProfile};

/// A set of parameter names on one shader instance
pub trait ParameterSet {
    /// Whether the shader exposes a parameter called `name`
    fn contains_param(&self, name: &str) -> bool;
}

impl<V, S: BuildHasher> ParameterSet for HashMap<String, V, S> {
    fn contains_param(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V> ParameterSet for BTreeMap<String, V> {
    fn contains_param(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<S: BuildHasher> ParameterSet for HashSet<String, S> {
    fn contains_param(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ParameterSet for BTreeSet<String> {
    fn contains_param(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ParameterSet for [&str] {
    fn contains_param(&self, name: &str) -> bool {
        self.iter().any(|p| *p == name)
    }
}

impl ParameterSet for [String] {
    fn contains_param(&self, name: &str) -> bool {
        self.iter().any(|p| p == name)
    }
}

impl<const N: usize> ParameterSet for [&str; N] {
    fn contains_param(&self, name: &str) -> bool {
        self[..].contains_param(name)
    }
}

impl ParameterSet for Vec<String> {
    fn contains_param(&self, name: &str) -> bool {
        self[..].contains_param(name)
    }
}

impl ParameterSet for Vec<&str> {
    fn contains_param(&self, name: &str) -> bool {
        self[..].contains_param(name)
    }
}

impl<T: ParameterSet + ?Sized> ParameterSet for &T {
    fn contains_param(&self, name: &str) -> bool {
        (**self).contains_param(name)
    }
}

/// First alias present on `params`, in preference order
pub fn resolve_alias<'a, P>(aliases: AliasList<'a>, params: &P) -> Option<&'a str>
where
    P: ParameterSet + ?Sized,
{
    let found = aliases.iter().find(|alias| params.contains_param(alias));
    if found.is_none() && !aliases.is_empty() {
        log::trace!("none of {:?} present on shader", aliases.to_vec());
    }
    found
}

/// Parameter names resolved for every light attribute of one shader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLightParams {
    /// Color parameter, if any alias matched
    pub color: Option<String>,
    /// Intensity parameter, if any alias matched
    pub intensity: Option<String>,
    /// Exposure parameter, if any alias matched
    pub exposure: Option<String>,
}

impl ResolvedLightParams {
    /// Resolve all attributes of `profile` against `params`
    pub fn resolve(profile: &dyn RendererProfile, params: &dyn ParameterSet) -> Self {
        let lookup = |attribute| profile.resolve(attribute, params).map(str::to_owned);
        let resolved = Self {
            color: lookup(LightAttribute::Color),
            intensity: lookup(LightAttribute::Intensity),
            exposure: lookup(LightAttribute::Exposure),
        };

        for attribute in LightAttribute::ALL {
            if profile.supports(attribute) && resolved.get(attribute).is_none() {
                log::debug!(
                    "{} profile: no {} parameter found on shader",
                    profile.renderer_name(),
                    attribute
                );
            }
        }

        resolved
    }

    /// Resolved name for one attribute
    pub fn get(&self, attribute: LightAttribute) -> Option<&str> {
        match attribute {
            LightAttribute::Color => self.color.as_deref(),
            LightAttribute::Intensity => self.intensity.as_deref(),
            LightAttribute::Exposure => self.exposure.as_deref(),
        }
    }

    /// Whether nothing resolved
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.intensity.is_none() && self.exposure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR_ALIASES: &[&str] = &["light.colour", "light.color"];

    #[test]
    fn test_first_present_alias_wins() {
        let params = ["light.color", "light.colour"];
        assert_eq!(resolve_alias(AliasList::Static(COLOR_ALIASES), &params), Some("light.colour"));
    }

    #[test]
    fn test_falls_back_to_older_alias() {
        let mut params = HashMap::new();
        params.insert("light.color".to_string(), 1.0_f32);

        assert_eq!(resolve_alias(AliasList::Static(COLOR_ALIASES), &params), Some("light.color"));
    }

    #[test]
    fn test_no_alias_present() {
        let params: BTreeSet<String> = ["light.intensity".to_string()].into_iter().collect();
        assert_eq!(resolve_alias(AliasList::Static(COLOR_ALIASES), &params), None);
    }

    #[test]
    fn test_empty_alias_list_never_resolves() {
        let params = vec!["anything".to_string()];
        assert_eq!(resolve_alias(AliasList::EMPTY, &params), None);
    }
}
