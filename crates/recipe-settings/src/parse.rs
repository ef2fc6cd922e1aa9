//! TOML parsing, serialization, and `key=value` assignment handling for settings.
//!
//! A complete settings file names every field; profile files instead carry a
//! partial [`SettingsOverlay`] that is laid over detected host settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compiler::{Compiler, CompilerVersion, CppStd};
use crate::error::{Result, SettingsError};
use crate::platform::{Arch, BuildType, Os};
use crate::settings::Settings;

/// Load complete settings from a TOML file.
pub fn load_settings_toml(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(SettingsError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_settings_toml(&content)
}

/// Parse complete settings from a TOML string.
pub fn parse_settings_toml(toml_str: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(toml_str)?;
    Ok(settings)
}

/// Serialize settings to pretty TOML.
pub fn settings_to_toml(settings: &Settings) -> Result<String> {
    let toml_str = toml::to_string_pretty(settings)?;
    Ok(toml_str)
}

/// Split a `key=value` assignment. Whitespace around both halves is trimmed.
pub fn parse_assignment(text: &str) -> Result<(String, String)> {
    match text.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(SettingsError::MalformedAssignment {
            text: text.to_string(),
        }),
    }
}

/// A partial settings table, as found under `[settings]` in a profile.
///
/// Keys use kebab-case (`compiler-version`, `build-type`). The profile
/// spellings `"compiler.version"` and `"compiler.cppstd"` are accepted only
/// as quoted keys; bare dotted keys are TOML tables and are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsOverlay {
    #[serde(default)]
    pub os: Option<Os>,
    #[serde(default)]
    pub compiler: Option<Compiler>,
    #[serde(default, alias = "compiler.version")]
    pub compiler_version: Option<CompilerVersion>,
    #[serde(default, alias = "compiler.cppstd")]
    pub cppstd: Option<CppStd>,
    #[serde(default, alias = "build_type")]
    pub build_type: Option<BuildType>,
    #[serde(default)]
    pub arch: Option<Arch>,
}

impl SettingsOverlay {
    /// Lay this overlay over `base`; fields left unset keep the base value.
    pub fn apply_to(&self, base: Settings) -> Settings {
        Settings {
            os: self.os.unwrap_or(base.os),
            compiler: self.compiler.unwrap_or(base.compiler),
            compiler_version: self
                .compiler_version
                .clone()
                .unwrap_or(base.compiler_version),
            cppstd: self.cppstd.or(base.cppstd),
            build_type: self.build_type.unwrap_or(base.build_type),
            arch: self.arch.unwrap_or(base.arch),
        }
    }

    /// Whether the overlay sets nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_gcc11() -> Settings {
        Settings::new(
            Os::Linux,
            Compiler::Gcc,
            CompilerVersion::from_major(11),
            BuildType::Release,
            Arch::X86_64,
        )
    }

    #[test]
    fn round_trip_settings() {
        let mut original = linux_gcc11();
        original.cppstd = Some("gnu17".parse().unwrap());
        let toml_str = settings_to_toml(&original).unwrap();
        let parsed = parse_settings_toml(&toml_str).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn parse_full_settings_file() {
        let toml_str = r#"
os = "Windows"
compiler = "msvc"
compiler-version = 193
build-type = "Debug"
arch = "x86_64"
"#;
        let settings = parse_settings_toml(toml_str).unwrap();
        assert_eq!(settings.os, Os::Windows);
        assert_eq!(settings.compiler, Compiler::Msvc);
        assert_eq!(settings.compiler_version.as_str(), "193");
        assert_eq!(settings.build_type, BuildType::Debug);
        assert!(settings.cppstd.is_none());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_settings_toml(r#"os = "Linux""#).is_err());
    }

    #[test]
    fn parse_unknown_os_returns_error() {
        let toml_str = r#"
os = "Plan9"
compiler = "gcc"
compiler-version = "11"
build-type = "Release"
arch = "x86_64"
"#;
        assert!(parse_settings_toml(toml_str).is_err());
    }

    #[test]
    fn load_not_found() {
        let result = load_settings_toml(Path::new("/nonexistent/settings.toml"));
        assert!(matches!(result.unwrap_err(), SettingsError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, settings_to_toml(&linux_gcc11()).unwrap()).unwrap();
        assert_eq!(load_settings_toml(&path).unwrap(), linux_gcc11());
    }

    #[test]
    fn assignments() {
        assert_eq!(
            parse_assignment("compiler.version = 12").unwrap(),
            ("compiler.version".to_string(), "12".to_string())
        );
        assert_eq!(
            parse_assignment("compiler.cppstd=").unwrap(),
            ("compiler.cppstd".to_string(), String::new())
        );
        assert!(parse_assignment("os").is_err());
        assert!(parse_assignment("=Linux").is_err());
    }

    #[test]
    fn overlay_accepts_profile_spellings() {
        let toml_str = r#"
os = "Macos"
"compiler.version" = "15"
build_type = "Debug"
"#;
        let overlay: SettingsOverlay = toml::from_str(toml_str).unwrap();
        let merged = overlay.apply_to(linux_gcc11());
        assert_eq!(merged.os, Os::Macos);
        assert_eq!(merged.compiler, Compiler::Gcc);
        assert_eq!(merged.compiler_version.major(), 15);
        assert_eq!(merged.build_type, BuildType::Debug);
        assert_eq!(merged.arch, Arch::X86_64);
    }

    #[test]
    fn bare_cppstd_in_overlay_and_full_file() {
        let overlay: SettingsOverlay =
            toml::from_str("cppstd = 17\ncompiler-version = 11\n").unwrap();
        assert_eq!(overlay.cppstd, Some(CppStd::CPP17));
        assert_eq!(overlay.compiler_version.as_ref().map(|v| v.major()), Some(11));

        let toml_str = r#"
os = "Linux"
compiler = "clang"
compiler-version = 17
cppstd = 20
build-type = "Release"
arch = "armv8"
"#;
        let settings = parse_settings_toml(toml_str).unwrap();
        assert_eq!(settings.cppstd, Some("20".parse().unwrap()));
    }

    #[test]
    fn dotted_keys_must_be_quoted() {
        let quoted: SettingsOverlay =
            toml::from_str("\"compiler.version\" = \"15\"\n\"compiler.cppstd\" = 17\n").unwrap();
        assert_eq!(quoted.compiler_version.map(|v| v.major()), Some(15));
        assert_eq!(quoted.cppstd, Some(CppStd::CPP17));

        // Unquoted, TOML reads `compiler.version` as a nested table under `compiler`.
        assert!(toml::from_str::<SettingsOverlay>("compiler.version = \"15\"\n").is_err());
    }

    #[test]
    fn overlay_rejects_unknown_keys() {
        assert!(toml::from_str::<SettingsOverlay>(r#"compiler.libcxx = "libc++""#).is_err());
    }

    #[test]
    fn empty_overlay_is_identity() {
        let overlay = SettingsOverlay::default();
        assert!(overlay.is_empty());
        assert_eq!(overlay.apply_to(linux_gcc11()), linux_gcc11());
    }
}
