//! `recipe resolve`: run the pipeline and print the result.

use anyhow::{bail, Result};
use recipe_core::{Overrides, RecipeError, RequirementDescriptor, Resolution, ToolchainValue};
use recipe_settings::{parse_assignment, Settings};
use tracing::debug;

/// Resolve and print in the requested format (`text` or `json`).
///
/// `pins` are `name=version` entries from a lockfile; each must name a
/// resolved requirement and fall inside its version range.
pub fn run(
    settings: &Settings,
    overrides: &Overrides,
    format: Option<&str>,
    pins: &[String],
) -> Result<()> {
    let format = format.unwrap_or("text");
    if !matches!(format, "text" | "json") {
        bail!("unknown format '{format}' (expected text or json)");
    }
    let resolution = recipe_core::run(settings, overrides)?;
    check_pins(&resolution.requirements, pins)?;
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&resolution)?),
        _ => print!("{}", render_text(&resolution)),
    }
    Ok(())
}

/// Check locked versions against the resolved requirement ranges.
pub(crate) fn check_pins(requirements: &RequirementDescriptor, pins: &[String]) -> Result<()> {
    for text in pins {
        let (package, version) = parse_assignment(text)?;
        let unresolved = |detail: String| RecipeError::RequirementResolution {
            package: package.clone(),
            detail,
        };
        let Some(requirement) = requirements.get(&package) else {
            return Err(unresolved("not required by this configuration".into()).into());
        };
        match requirement.admits(&version) {
            Ok(true) => debug!(%package, %version, "pinned version admitted"),
            Ok(false) => {
                return Err(unresolved(format!(
                    "locked version {version} is outside [{}]",
                    requirement.version_range
                ))
                .into())
            }
            Err(e) => return Err(unresolved(format!("invalid version '{version}': {e}")).into()),
        }
    }
    Ok(())
}

pub(crate) fn render_text(resolution: &Resolution) -> String {
    let mut out = String::new();

    out.push_str("--- Settings ---\n");
    for (key, value) in resolution.settings.entries() {
        out.push_str(&format!("  {key}={value}\n"));
    }

    out.push_str("\n--- Options ---\n");
    for (id, value) in resolution.configuration.iter() {
        out.push_str(&format!("  {id}={value}\n"));
    }

    out.push_str("\n--- Requirements ---\n");
    for req in resolution.requirements.iter() {
        let mut line = format!("  {}", req.reference());
        if req.flags.transitive_headers {
            line.push_str(" [transitive headers]");
        }
        if req.flags.transitive_libs {
            line.push_str(" [transitive libs]");
        }
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\n--- Toolchain ---\n");
    for var in resolution.variables.iter() {
        let value = match &var.value {
            ToolchainValue::Bool(true) => "ON".to_string(),
            ToolchainValue::Bool(false) => "OFF".to_string(),
            ToolchainValue::Str(s) => s.clone(),
        };
        out.push_str(&format!("  {}={value}\n", var.key));
    }

    out.push_str(&format!(
        "\nBuild folder: {}\n",
        resolution.layout.build_folder.display()
    ));
    out
}
