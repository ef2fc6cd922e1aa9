//! Build folder layout for the generated CMake project.

use std::path::PathBuf;

use recipe_settings::Settings;
use serde::Serialize;

/// Folders the downstream generator uses, relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildLayout {
    /// Where the native build runs.
    pub build_folder: PathBuf,
    /// Where toolchain and dependency files are written.
    pub generators_folder: PathBuf,
    /// Whether one build folder hosts every build type.
    pub multi_config: bool,
}

impl BuildLayout {
    /// Single-config generators get `build/<BuildType>`; multi-config
    /// generators share `build`.
    pub fn for_settings(settings: &Settings) -> Self {
        let multi_config = settings.compiler.is_multi_config();
        let mut build_folder = PathBuf::from("build");
        if !multi_config {
            build_folder.push(settings.build_type.as_str());
        }
        let generators_folder = build_folder.join("generators");
        Self {
            build_folder,
            generators_folder,
            multi_config,
        }
    }
}
