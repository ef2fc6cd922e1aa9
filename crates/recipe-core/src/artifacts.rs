//! Writing emitted artifacts into the generators folder.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RecipeError, Result};
use crate::requirement::RequirementDescriptor;
use crate::toolchain::ToolchainVariables;

pub const REQUIREMENTS_FILE: &str = "requirements.json";
pub const TOOLCHAIN_FILE: &str = "toolchain.cmake";
pub const CACHE_VARIABLES_FILE: &str = "cache_variables.json";

/// Write the requirement descriptor and toolchain variables into `dir`,
/// creating it if needed. Returns the written paths.
pub fn write_artifacts(
    dir: &Path,
    requirements: &RequirementDescriptor,
    variables: &ToolchainVariables,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| RecipeError::Output {
        what: dir.display().to_string(),
        source,
    })?;

    let files = [
        (REQUIREMENTS_FILE, to_json(requirements)?),
        (TOOLCHAIN_FILE, variables.to_cmake()),
        (CACHE_VARIABLES_FILE, to_json(variables)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content).map_err(|source| RecipeError::Output {
            what: path.display().to_string(),
            source,
        })?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "artifacts written");
    Ok(written)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
