//! `recipe.toml` profile parsing and input assembly.
//!
//! A profile carries a partial `[settings]` table and an `[options]` table:
//!
//! ```toml
//! [settings]
//! os = "Windows"
//! compiler = "msvc"
//! compiler-version = "193"
//!
//! [options]
//! module_wx = true
//! "libbase/*:tests" = "False"
//! ```
//!
//! Dotted setting names must be quoted (`"compiler.version" = "193"`); a bare
//! `compiler.version` is a TOML sub-table of `compiler` and fails to parse.
//! The kebab-case spelling above needs no quotes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recipe_core::Overrides;
use recipe_settings::{load_settings_toml, parse_assignment, Settings, SettingsOverlay};
use serde::Deserialize;
use tracing::debug;

/// File name searched for when no profile is given explicitly.
pub const PROFILE_FILE: &str = "recipe.toml";

/// A parsed profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Settings laid over host detection.
    #[serde(default)]
    pub settings: SettingsOverlay,
    /// Option overrides.
    #[serde(default)]
    pub options: Overrides,
}

impl Profile {
    /// Load a profile from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Search upward from `start_dir` for a `recipe.toml` file, parse and
    /// return it along with its path.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(PROFILE_FILE);
            if candidate.is_file() {
                let profile = Self::load(&candidate)?;
                return Ok(Some((profile, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a profile from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing profile")
    }
}

/// Raw inputs gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    /// Complete settings file used instead of host detection.
    pub settings_file: Option<PathBuf>,
    /// Explicit profile path.
    pub profile: Option<PathBuf>,
    /// `-s key=value` settings assignments.
    pub settings: Vec<String>,
    /// `-o key=value` option assignments.
    pub options: Vec<String>,
}

/// Assemble settings and overrides: host detection (or a complete settings
/// file), then the profile, then command-line assignments.
pub fn assemble(cwd: &Path, args: &InputArgs) -> Result<(Settings, Overrides)> {
    let profile = match &args.profile {
        Some(path) => Profile::load(path)?,
        None => match Profile::find_and_load(cwd)? {
            Some((profile, path)) => {
                debug!(path = %path.display(), "using discovered profile");
                profile
            }
            None => Profile::default(),
        },
    };

    let base = match &args.settings_file {
        Some(path) => load_settings_toml(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::host(),
    };
    let mut settings = profile.settings.apply_to(base);
    for text in &args.settings {
        let (key, value) = parse_assignment(text)?;
        settings
            .set(&key, &value)
            .with_context(|| format!("applying -s {text}"))?;
    }

    let mut overrides = profile.options;
    for text in &args.options {
        let (key, value) = parse_assignment(text)?;
        overrides.insert(&key, value.as_str());
    }

    Ok((settings, overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::RawValue;
    use recipe_settings::{Compiler, Os};

    #[test]
    fn parse_full_profile() {
        let profile = Profile::from_str(
            r#"
[settings]
os = "Windows"
compiler = "msvc"
compiler-version = "193"

[options]
module_wx = true
"libbase/*:tests" = "False"
"#,
        )
        .unwrap();
        assert_eq!(profile.settings.os, Some(Os::Windows));
        assert_eq!(profile.settings.compiler, Some(Compiler::Msvc));
        assert_eq!(profile.options.get("module_wx"), Some(&RawValue::Bool(true)));
        assert_eq!(
            profile.options.get("tests"),
            Some(&RawValue::Text("False".into()))
        );
    }

    #[test]
    fn parse_empty_profile() {
        let profile = Profile::from_str("").unwrap();
        assert!(profile.settings.is_empty());
        assert!(profile.options.is_empty());
    }

    #[test]
    fn reject_unknown_sections() {
        assert!(Profile::from_str("[conf]\nfoo = 1\n").is_err());
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROFILE_FILE),
            "[settings]\nos = \"Macos\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let (profile, path) = Profile::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(profile.settings.os, Some(Os::Macos));
        assert_eq!(path, dir.path().join(PROFILE_FILE));
    }

    #[test]
    fn command_line_wins_over_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.toml");
        std::fs::write(
            &path,
            "[settings]\nos = \"Windows\"\ncompiler = \"msvc\"\ncompiler-version = 193\n\n[options]\ntests = false\ndocs = true\n",
        )
        .unwrap();
        let args = InputArgs {
            profile: Some(path),
            settings: vec!["build_type=Debug".into()],
            options: vec!["tests=True".into()],
            ..InputArgs::default()
        };
        let (settings, overrides) = assemble(dir.path(), &args).unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.build_type.as_str(), "Debug");
        assert_eq!(overrides.get("tests"), Some(&RawValue::Text("True".into())));
        assert_eq!(overrides.get("docs"), Some(&RawValue::Bool(true)));
    }

    #[test]
    fn bad_setting_assignment_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let args = InputArgs {
            settings: vec!["os=Plan9".into()],
            ..InputArgs::default()
        };
        let err = assemble(dir.path(), &args).unwrap_err();
        assert!(format!("{err:#}").contains("Plan9"));
    }

    #[test]
    fn settings_file_replaces_host_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macos.toml");
        std::fs::write(
            &path,
            "os = \"Macos\"\ncompiler = \"apple-clang\"\ncompiler-version = \"14.0\"\ncppstd = 17\nbuild-type = \"Debug\"\narch = \"armv8\"\n",
        )
        .unwrap();
        let args = InputArgs {
            settings_file: Some(path),
            settings: vec!["build_type=Release".into()],
            ..InputArgs::default()
        };
        let (settings, _) = assemble(dir.path(), &args).unwrap();
        assert_eq!(settings.os, Os::Macos);
        assert_eq!(settings.compiler, Compiler::AppleClang);
        assert_eq!(settings.compiler_version.as_str(), "14.0");
        assert_eq!(settings.arch.as_str(), "armv8");
        assert_eq!(settings.build_type.as_str(), "Release");
    }

    #[test]
    fn incomplete_or_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("partial.toml");
        std::fs::write(&partial, "os = \"Linux\"\n").unwrap();
        for path in [partial, dir.path().join("absent.toml")] {
            let args = InputArgs {
                settings_file: Some(path.clone()),
                ..InputArgs::default()
            };
            let err = assemble(dir.path(), &args).unwrap_err();
            assert!(format!("{err:#}").contains("loading settings"), "{}", path.display());
        }
    }

    #[test]
    fn missing_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = InputArgs {
            profile: Some(dir.path().join("nope.toml")),
            ..InputArgs::default()
        };
        assert!(assemble(dir.path(), &args).is_err());
    }
}
