//! Cross-option and platform validation of a resolved configuration.
//!
//! Checks run in a fixed order and stop at the first violation:
//! 1. the target OS is supported
//! 2. no mutually exclusive pair of options is enabled together
//! 3. the toolchain supports the minimum C++ standard

use recipe_settings::{Compiler, CompilerVersion, CppStd, Os, Settings};
use tracing::debug;

use crate::configuration::Configuration;
use crate::error::{RecipeError, Result};
use crate::option::OptionId;

/// The set of constraints a configuration must satisfy.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Operating systems the library can be built for.
    pub supported_os: Vec<Os>,
    /// Boolean options that must not both be true.
    pub exclusive_pairs: Vec<(OptionId, OptionId)>,
    /// Minimum C++ standard.
    pub min_cppstd: CppStd,
}

impl ValidationRules {
    /// Rules of the libbase recipe.
    pub fn libbase() -> Self {
        Self {
            supported_os: vec![Os::Windows, Os::Linux, Os::Macos],
            exclusive_pairs: vec![(OptionId::WithAsan, OptionId::WithTsan)],
            min_cppstd: CppStd::CPP17,
        }
    }

    /// Run all checks in order, failing on the first violation.
    pub fn validate(&self, configuration: &Configuration, settings: &Settings) -> Result<()> {
        self.check_platform(settings)?;
        self.check_exclusive(configuration)?;
        self.check_standard(settings)?;
        debug!(os = %settings.os, compiler = %settings.compiler, "configuration validated");
        Ok(())
    }

    fn check_platform(&self, settings: &Settings) -> Result<()> {
        if self.supported_os.contains(&settings.os) {
            return Ok(());
        }
        Err(RecipeError::UnsupportedPlatform {
            os: settings.os,
            supported: self
                .supported_os
                .iter()
                .map(Os::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    fn check_exclusive(&self, configuration: &Configuration) -> Result<()> {
        match self
            .exclusive_pairs
            .iter()
            .find(|(a, b)| configuration.flag(*a) && configuration.flag(*b))
        {
            Some((a, b)) => Err(RecipeError::ConflictingOptions {
                first: a.as_str(),
                second: b.as_str(),
            }),
            None => Ok(()),
        }
    }

    fn check_standard(&self, settings: &Settings) -> Result<()> {
        let required = self.min_cppstd;
        if let Some(selected) = settings.cppstd {
            if selected.at_least(required) {
                return Ok(());
            }
            return Err(RecipeError::StandardNotSupported {
                required,
                detail: format!("compiler.cppstd={selected} is lower than C++{required}"),
            });
        }

        match first_supporting_version(settings.compiler, required) {
            Some(min) if settings.compiler_version >= min => Ok(()),
            Some(min) => Err(RecipeError::StandardNotSupported {
                required,
                detail: format!(
                    "{} {} predates C++{required} support ({} >= {min})",
                    settings.compiler, settings.compiler_version, settings.compiler
                ),
            }),
            None => Err(RecipeError::StandardNotSupported {
                required,
                detail: format!("{} has no known C++{required} support", settings.compiler),
            }),
        }
    }
}

/// First compiler release with full support for `std`.
///
/// Only standards up to C++17 are tabulated; later standards have no entry.
pub fn first_supporting_version(compiler: Compiler, std: CppStd) -> Option<CompilerVersion> {
    let major = match (std.full_year(), compiler) {
        (year, _) if year <= 2011 => match compiler {
            Compiler::Gcc => 5,
            Compiler::Clang => 3,
            Compiler::AppleClang => 5,
            Compiler::Msvc => 190,
        },
        (2014, Compiler::Gcc) => 5,
        (2014, Compiler::Clang) => 4,
        (2014, Compiler::AppleClang) => 6,
        (2014, Compiler::Msvc) => 190,
        (2017, Compiler::Gcc) => 7,
        (2017, Compiler::Clang) => 5,
        (2017, Compiler::AppleClang) => 10,
        (2017, Compiler::Msvc) => 191,
        _ => return None,
    };
    Some(CompilerVersion::from_major(major))
}

/// Validate with the libbase rules.
pub fn validate(configuration: &Configuration, settings: &Settings) -> Result<()> {
    ValidationRules::libbase().validate(configuration, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OptionModel, Overrides};
    use recipe_settings::{Arch, BuildType};

    fn settings(os: Os, compiler: Compiler, version: &str) -> Settings {
        Settings::new(
            os,
            compiler,
            version.parse().unwrap(),
            BuildType::Release,
            Arch::X86_64,
        )
    }

    fn resolve(settings: &Settings, overrides: Overrides) -> Configuration {
        OptionModel::libbase().prune(settings).resolve(&overrides).unwrap()
    }

    #[test]
    fn defaults_pass_on_supported_platforms() {
        for s in [
            settings(Os::Linux, Compiler::Gcc, "11"),
            settings(Os::Windows, Compiler::Msvc, "193"),
            settings(Os::Macos, Compiler::AppleClang, "15"),
        ] {
            let config = resolve(&s, Overrides::new());
            assert!(validate(&config, &s).is_ok(), "{:?}", s.os);
        }
    }

    #[test]
    fn unsupported_platform() {
        let s = settings(Os::Android, Compiler::Clang, "17");
        let config = resolve(&s, Overrides::new());
        let err = validate(&config, &s).unwrap_err();
        assert!(matches!(err, RecipeError::UnsupportedPlatform { os: Os::Android, .. }));
        assert!(err.to_string().contains("Android"));
    }

    #[test]
    fn sanitizers_conflict() {
        let s = settings(Os::Linux, Compiler::Gcc, "11");
        let config = resolve(
            &s,
            Overrides::new().with("with_asan", true).with("with_tsan", true),
        );
        let err = validate(&config, &s).unwrap_err();
        assert!(matches!(
            err,
            RecipeError::ConflictingOptions {
                first: "with_asan",
                second: "with_tsan"
            }
        ));
    }

    #[test]
    fn single_sanitizer_is_fine() {
        let s = settings(Os::Linux, Compiler::Clang, "16");
        for key in ["with_asan", "with_tsan"] {
            let config = resolve(&s, Overrides::new().with(key, true));
            assert!(validate(&config, &s).is_ok());
        }
    }

    #[test]
    fn platform_check_runs_before_conflict_check() {
        let s = settings(Os::Android, Compiler::Gcc, "4");
        let config = resolve(
            &s,
            Overrides::new().with("with_asan", true).with("with_tsan", true),
        );
        assert!(matches!(
            validate(&config, &s).unwrap_err(),
            RecipeError::UnsupportedPlatform { .. }
        ));
    }

    #[test]
    fn conflict_check_runs_before_standard_check() {
        let s = settings(Os::Linux, Compiler::Gcc, "4");
        let config = resolve(
            &s,
            Overrides::new().with("with_asan", true).with("with_tsan", true),
        );
        assert!(matches!(
            validate(&config, &s).unwrap_err(),
            RecipeError::ConflictingOptions { .. }
        ));
    }

    #[test]
    fn old_compiler_rejected() {
        let s = settings(Os::Linux, Compiler::Gcc, "6.5");
        let config = resolve(&s, Overrides::new());
        let err = validate(&config, &s).unwrap_err();
        assert!(matches!(err, RecipeError::StandardNotSupported { .. }));
        assert!(err.to_string().contains("gcc 6.5"));
    }

    #[test]
    fn compiler_thresholds() {
        let cases = [
            (Compiler::Gcc, "7", true),
            (Compiler::Clang, "4.0", false),
            (Compiler::Clang, "5", true),
            (Compiler::AppleClang, "9.1", false),
            (Compiler::AppleClang, "10.0", true),
            (Compiler::Msvc, "190", false),
            (Compiler::Msvc, "191", true),
        ];
        for (compiler, version, ok) in cases {
            let s = settings(Os::Linux, compiler, version);
            let config = resolve(&s, Overrides::new());
            assert_eq!(validate(&config, &s).is_ok(), ok, "{compiler} {version}");
        }
    }

    #[test]
    fn explicit_cppstd_decides() {
        let mut s = settings(Os::Linux, Compiler::Gcc, "11");
        s.cppstd = Some("14".parse().unwrap());
        let config = resolve(&s, Overrides::new());
        let err = validate(&config, &s).unwrap_err();
        assert!(err.to_string().contains("compiler.cppstd=14"));

        s.cppstd = Some("gnu17".parse().unwrap());
        assert!(validate(&config, &s).is_ok());

        // An explicit standard is trusted even on an old compiler.
        let mut old = settings(Os::Linux, Compiler::Gcc, "6");
        old.cppstd = Some("20".parse().unwrap());
        assert!(validate(&resolve(&old, Overrides::new()), &old).is_ok());
    }

    #[test]
    fn rules_are_configurable() {
        let rules = ValidationRules {
            supported_os: vec![Os::Linux, Os::Android],
            exclusive_pairs: vec![],
            min_cppstd: "20".parse().unwrap(),
        };
        let s = settings(Os::Android, Compiler::Clang, "17");
        let config = resolve(
            &s,
            Overrides::new().with("with_asan", true).with("with_tsan", true),
        );
        // No table entry for C++20, so the compiler cannot be vouched for.
        assert!(matches!(
            rules.validate(&config, &s).unwrap_err(),
            RecipeError::StandardNotSupported { .. }
        ));
    }
}
