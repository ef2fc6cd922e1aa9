//! `recipe generate`: resolve and write artifacts for the build generator.

use std::path::{Path, PathBuf};

use anyhow::Result;
use recipe_core::{write_artifacts, Overrides};
use recipe_settings::Settings;

/// Resolve, then write artifacts into the layout's generators folder under
/// `output_dir`. Nothing is written if resolution fails.
pub fn run(settings: &Settings, overrides: &Overrides, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let resolution = recipe_core::run(settings, overrides)?;
    let target = output_dir.join(&resolution.layout.generators_folder);
    let written = write_artifacts(&target, &resolution.requirements, &resolution.variables)?;

    println!("Generated {} files in {}", written.len(), target.display());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(written)
}
