//! Operating system, architecture, and build type settings.
//!
//! Value spellings follow the conventions of C/C++ package-manager profiles
//! (`os=Macos`, `arch=armv8`, `build_type=RelWithDebInfo`), so settings files
//! written for those tools can be read unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    Android,
    #[serde(rename = "iOS")]
    Ios,
    FreeBSD,
    Emscripten,
}

impl Os {
    /// Every OS the settings model can describe.
    pub const ALL: [Os; 7] = [
        Os::Windows,
        Os::Linux,
        Os::Macos,
        Os::Android,
        Os::Ios,
        Os::FreeBSD,
        Os::Emscripten,
    ];

    /// Profile spelling of this OS.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::Linux => "Linux",
            Os::Macos => "Macos",
            Os::Android => "Android",
            Os::Ios => "iOS",
            Os::FreeBSD => "FreeBSD",
            Os::Emscripten => "Emscripten",
        }
    }

    /// The OS this binary was compiled for, if the model knows it.
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Os::Windows),
            "linux" => Some(Os::Linux),
            "macos" => Some(Os::Macos),
            "android" => Some(Os::Android),
            "ios" => Some(Os::Ios),
            "freebsd" => Some(Os::FreeBSD),
            "emscripten" => Some(Os::Emscripten),
            _ => None,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Os::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| invalid("os", s, Os::ALL.iter().map(Os::as_str)))
    }
}

/// Target CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    X86,
    X86_64,
    Armv7,
    Armv8,
    Wasm,
}

impl Arch {
    pub const ALL: [Arch; 5] = [Arch::X86, Arch::X86_64, Arch::Armv7, Arch::Armv8, Arch::Wasm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Armv7 => "armv7",
            Arch::Armv8 => "armv8",
            Arch::Wasm => "wasm",
        }
    }

    /// The architecture this binary was compiled for, if the model knows it.
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Arch::X86),
            "x86_64" => Some(Arch::X86_64),
            "arm" => Some(Arch::Armv7),
            "aarch64" => Some(Arch::Armv8),
            "wasm32" => Some(Arch::Wasm),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arch::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| invalid("arch", s, Arch::ALL.iter().map(Arch::as_str)))
    }
}

/// CMake-style build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: [BuildType; 4] = [
        BuildType::Debug,
        BuildType::Release,
        BuildType::RelWithDebInfo,
        BuildType::MinSizeRel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|bt| bt.as_str() == s)
            .ok_or_else(|| invalid("build_type", s, BuildType::ALL.iter().map(BuildType::as_str)))
    }
}

/// Build an [`SettingsError::InvalidValue`] listing the accepted spellings.
pub(crate) fn invalid<'a>(
    setting: &'static str,
    value: &str,
    expected: impl Iterator<Item = &'a str>,
) -> SettingsError {
    SettingsError::InvalidValue {
        setting,
        value: value.to_string(),
        expected: expected.collect::<Vec<_>>().join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_spellings_round_trip() {
        for os in Os::ALL {
            assert_eq!(os.as_str().parse::<Os>().unwrap(), os);
        }
        assert_eq!("iOS".parse::<Os>().unwrap(), Os::Ios);
    }

    #[test]
    fn os_parse_is_case_sensitive() {
        let err = "linux".parse::<Os>().unwrap_err();
        assert!(err.to_string().contains("'linux'"));
        assert!(err.to_string().contains("Linux"));
    }

    #[test]
    fn arch_spellings() {
        assert_eq!("x86_64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("armv8".parse::<Arch>().unwrap(), Arch::Armv8);
        assert!("aarch64".parse::<Arch>().is_err());
    }

    #[test]
    fn build_type_spellings() {
        for bt in BuildType::ALL {
            assert_eq!(bt.to_string().parse::<BuildType>().unwrap(), bt);
        }
        assert!("release".parse::<BuildType>().is_err());
    }

    #[test]
    fn host_detection_matches_compile_target() {
        let expected_os = matches!(
            std::env::consts::OS,
            "windows" | "linux" | "macos" | "android" | "ios" | "freebsd" | "emscripten"
        );
        assert_eq!(Os::host().is_some(), expected_os);

        let expected_arch = matches!(
            std::env::consts::ARCH,
            "x86" | "x86_64" | "arm" | "aarch64" | "wasm32"
        );
        assert_eq!(Arch::host().is_some(), expected_arch);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_host_is_detected() {
        assert_eq!(Arch::host(), Some(Arch::X86_64));
    }
}
