//! Compiler identity, compiler version, and C++ language standard.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::platform::invalid;

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Compiler {
    pub const ALL: [Compiler; 4] = [
        Compiler::Gcc,
        Compiler::Clang,
        Compiler::AppleClang,
        Compiler::Msvc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Msvc => "msvc",
        }
    }

    /// Whether the compiler's native CMake generator is multi-config.
    pub fn is_multi_config(&self) -> bool {
        matches!(self, Compiler::Msvc)
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compiler {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Compiler::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| invalid("compiler", s, Compiler::ALL.iter().map(Compiler::as_str)))
    }
}

/// A dotted numeric compiler version such as `11`, `14.0`, or `193`.
///
/// Comparison is component-wise with missing components treated as zero,
/// so `11 == 11.0` and `9.1 < 10`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "String")]
pub struct CompilerVersion {
    text: String,
    components: Vec<u32>,
}

impl CompilerVersion {
    /// A single-component version such as `11`.
    pub fn from_major(major: u32) -> Self {
        Self {
            text: major.to_string(),
            components: vec![major],
        }
    }

    /// Version text as given.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Major version component.
    pub fn major(&self) -> u32 {
        self.components.first().copied().unwrap_or(0)
    }

    fn component(&self, idx: usize) -> u32 {
        self.components.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for CompilerVersion {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || SettingsError::InvalidValue {
            setting: "compiler.version",
            value: s.to_string(),
            expected: "a dotted numeric version (e.g. 11, 14.0, 193)".into(),
        };
        if s.is_empty() {
            return Err(reject());
        }
        let components = s
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| reject()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: s.to_string(),
            components,
        })
    }
}

impl PartialEq for CompilerVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CompilerVersion {}

impl PartialOrd for CompilerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompilerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<CompilerVersion> for String {
    fn from(v: CompilerVersion) -> Self {
        v.text
    }
}

/// Settings files may write numeric values bare (`compiler-version = 11`,
/// `cppstd = 17`) as well as quoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(u64),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(s) => s,
            RawValue::Number(n) => n.to_string(),
        }
    }
}

impl TryFrom<RawValue> for CompilerVersion {
    type Error = SettingsError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        raw.into_text().parse()
    }
}

/// A C++ language standard, optionally with GNU extensions (`gnu17`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "String")]
pub struct CppStd {
    /// Two-digit standard year: 98, 11, 14, 17, 20, 23.
    pub year: u8,
    /// Whether GNU extensions are enabled.
    pub gnu: bool,
}

impl CppStd {
    const YEARS: [u8; 6] = [98, 11, 14, 17, 20, 23];

    pub const CPP17: CppStd = CppStd { year: 17, gnu: false };

    /// Four-digit year used for ordering (`98` sorts before `11`).
    pub fn full_year(&self) -> u16 {
        if self.year >= 98 {
            1900 + u16::from(self.year)
        } else {
            2000 + u16::from(self.year)
        }
    }

    /// Whether this standard is at least `other`, ignoring GNU extensions.
    pub fn at_least(&self, other: CppStd) -> bool {
        self.full_year() >= other.full_year()
    }
}

impl fmt::Display for CppStd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gnu {
            write!(f, "gnu{}", self.year)
        } else {
            write!(f, "{}", self.year)
        }
    }
}

impl FromStr for CppStd {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (gnu, digits) = match s.strip_prefix("gnu") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        digits
            .parse::<u8>()
            .ok()
            .filter(|year| Self::YEARS.contains(year))
            .map(|year| CppStd { year, gnu })
            .ok_or_else(|| SettingsError::InvalidValue {
                setting: "compiler.cppstd",
                value: s.to_string(),
                expected: "98, 11, 14, 17, 20, 23 (optionally gnu-prefixed)".into(),
            })
    }
}

impl TryFrom<RawValue> for CppStd {
    type Error = SettingsError;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        raw.into_text().parse()
    }
}

impl From<CppStd> for String {
    fn from(std: CppStd) -> Self {
        std.to_string()
    }
}
