//! The platform descriptor consumed by option pruning and validation.

use serde::{Deserialize, Serialize};

use crate::compiler::{Compiler, CompilerVersion, CppStd};
use crate::error::{Result, SettingsError};
use crate::platform::{Arch, BuildType, Os};

/// Read-only platform descriptor for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Target operating system.
    pub os: Os,
    /// Compiler family.
    pub compiler: Compiler,
    /// Compiler version.
    pub compiler_version: CompilerVersion,
    /// Explicitly selected C++ standard, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cppstd: Option<CppStd>,
    /// Build type.
    pub build_type: BuildType,
    /// Target architecture.
    pub arch: Arch,
}

/// Settings keys accepted by [`Settings::set`], in profile spelling.
pub const SETTING_KEYS: [&str; 6] = [
    "os",
    "compiler",
    "compiler.version",
    "compiler.cppstd",
    "build_type",
    "arch",
];

impl Settings {
    /// Construct settings with no explicit C++ standard.
    pub fn new(
        os: Os,
        compiler: Compiler,
        compiler_version: CompilerVersion,
        build_type: BuildType,
        arch: Arch,
    ) -> Self {
        Self {
            os,
            compiler,
            compiler_version,
            cppstd: None,
            build_type,
            arch,
        }
    }

    /// Settings describing the machine this binary runs on.
    ///
    /// OS and architecture come from the compile target. The compiler is the
    /// platform's conventional toolchain at a baseline version; callers that
    /// know better override it from a profile or `-s` assignments.
    pub fn host() -> Self {
        let os = Os::host().unwrap_or(Os::Linux);
        let (compiler, version) = match os {
            Os::Windows => (Compiler::Msvc, 193),
            Os::Macos | Os::Ios => (Compiler::AppleClang, 15),
            Os::FreeBSD | Os::Android | Os::Emscripten => (Compiler::Clang, 17),
            Os::Linux => (Compiler::Gcc, 11),
        };
        Self::new(
            os,
            compiler,
            CompilerVersion::from_major(version),
            BuildType::Release,
            Arch::host().unwrap_or(Arch::X86_64),
        )
    }

    /// Apply a single `key=value` setting in profile spelling.
    ///
    /// Both `compiler.version` and `compiler-version` forms are accepted.
    /// An empty `compiler.cppstd` clears the explicit standard.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.replace('-', "_").as_str() {
            "os" => self.os = value.parse()?,
            "compiler" => self.compiler = value.parse()?,
            "compiler.version" | "compiler_version" => self.compiler_version = value.parse()?,
            "compiler.cppstd" | "cppstd" => {
                self.cppstd = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                }
            }
            "build_type" => self.build_type = value.parse()?,
            "arch" => self.arch = value.parse()?,
            _ => {
                return Err(SettingsError::UnknownSetting {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Return a copy with the given assignments applied in order.
    pub fn with_assignments<'a>(
        mut self,
        assignments: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        for (key, value) in assignments {
            self.set(key, value)?;
        }
        Ok(self)
    }

    /// Settings as ordered `(key, value)` pairs in profile spelling.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("os", self.os.to_string()),
            ("compiler", self.compiler.to_string()),
            ("compiler.version", self.compiler_version.to_string()),
        ];
        if let Some(std) = self.cppstd {
            entries.push(("compiler.cppstd", std.to_string()));
        }
        entries.push(("build_type", self.build_type.to_string()));
        entries.push(("arch", self.arch.to_string()));
        entries
    }
}
