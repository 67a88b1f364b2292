//! Inspect registered renderer light profiles
//!
//! ```text
//! profile_inspect [--config <file.toml|file.ron>] [--renderer <name>] [shader-param ...]
//! ```
//!
//! Lists every registered profile. With a renderer and shader parameter
//! names, also shows which parameter each light attribute resolves to.

use clap::Parser;
use light_profiles::prelude::*;
use light_profiles::{logging, ConfigError};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
enum InspectError {
    #[error("no profile registered for '{0}'")]
    UnknownRenderer(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Inspect registered renderer light profiles
#[derive(Parser, Debug)]
#[command(name = "profile_inspect")]
struct Args {
    /// Profiles configuration (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Renderer to resolve shader parameters against
    #[arg(long, value_name = "NAME")]
    renderer: Option<String>,

    /// Parameter names present on the shader
    #[arg(value_name = "SHADER_PARAM")]
    shader_params: Vec<String>,
}

fn print_profile(profile: &dyn RendererProfile) {
    println!("{}", profile.renderer_name());
    println!("  light shader type:  {}", profile.light_shader_type());
    println!(
        "  material parameter: {} = {}",
        profile.material_parameter_name(),
        profile.material_parameter_value()
    );
    for attribute in LightAttribute::ALL {
        let aliases = profile.param_names(attribute);
        if aliases.is_empty() {
            println!("  {attribute:<10} (unsupported)");
        } else {
            println!("  {attribute:<10} {}", aliases.to_vec().join(", "));
        }
    }
}

fn run() -> Result<(), InspectError> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ProfilesConfig::load_from_file(path)?,
        None => ProfilesConfig::default(),
    };
    logging::init_with_level(&config.log_level);
    log::debug!("Loaded configuration: {:?}", config);

    let mut registry = PluginRegistry::with_policy(config.conflict_policy);
    register_plugins(&mut registry, &config)?;

    for profile in registry.profiles() {
        print_profile(profile.as_ref());
    }

    if let Some(name) = &args.renderer {
        let profile = registry
            .profile(name)
            .ok_or_else(|| InspectError::UnknownRenderer(name.clone()))?;
        let resolved = ResolvedLightParams::resolve(profile.as_ref(), &args.shader_params);

        println!();
        println!("{name} against {} shader parameter(s):", args.shader_params.len());
        for attribute in LightAttribute::ALL {
            println!("  {attribute:<10} {}", resolved.get(attribute).unwrap_or("-"));
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("profile_inspect: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let parsed = Args::try_parse_from([
            "profile_inspect",
            "--config",
            "p.toml",
            "--renderer",
            "imagine",
            "a.colour",
            "a.intensity",
        ])
        .unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("p.toml")));
        assert_eq!(parsed.renderer.as_deref(), Some("imagine"));
        assert_eq!(parsed.shader_params, ["a.colour", "a.intensity"]);
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = Args::try_parse_from(["profile_inspect"]).unwrap();
        assert!(parsed.config.is_none());
        assert!(parsed.renderer.is_none());
        assert!(parsed.shader_params.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Args::try_parse_from(["profile_inspect", "--config"]).is_err());
        assert!(Args::try_parse_from(["profile_inspect", "--verbose"]).is_err());
    }
}
