//! Option descriptors: names, domains, defaults, and platform applicability.
//!
//! The libbase recipe declares a fixed set of options ([`OptionId`]). Each is
//! described by a static [`OptionDescriptor`] in [`LIBBASE_OPTIONS`], which
//! the option model consults uniformly for pruning and resolution.

use std::borrow::Cow;
use std::fmt;

use recipe_settings::{Os, Settings};
use serde::{Deserialize, Serialize};

/// Identifier of a declared recipe option.
///
/// Ordering follows declaration order, so maps keyed by `OptionId` iterate
/// in the same order as [`LIBBASE_OPTIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionId {
    ModuleNet,
    ModuleWin,
    ModuleWx,
    Examples,
    Tests,
    Docs,
    WithTidy,
    WithAsan,
    WithTsan,
}

impl OptionId {
    pub const ALL: [OptionId; 9] = [
        OptionId::ModuleNet,
        OptionId::ModuleWin,
        OptionId::ModuleWx,
        OptionId::Examples,
        OptionId::Tests,
        OptionId::Docs,
        OptionId::WithTidy,
        OptionId::WithAsan,
        OptionId::WithTsan,
    ];

    /// Option name as written in profiles and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionId::ModuleNet => "module_net",
            OptionId::ModuleWin => "module_win",
            OptionId::ModuleWx => "module_wx",
            OptionId::Examples => "examples",
            OptionId::Tests => "tests",
            OptionId::Docs => "docs",
            OptionId::WithTidy => "with_tidy",
            OptionId::WithAsan => "with_asan",
            OptionId::WithTsan => "with_tsan",
        }
    }

    /// Look up an option by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value inside some option's domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Choice(Cow<'static, str>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Choice(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("True"),
            OptionValue::Bool(false) => f.write_str("False"),
            OptionValue::Choice(s) => f.write_str(s),
        }
    }
}

/// The set of values an option may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Domain {
    Boolean,
    OneOf(&'static [&'static str]),
}

impl Domain {
    /// Whether `value` lies inside this domain.
    pub fn contains(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (Domain::Boolean, OptionValue::Bool(_)) => true,
            (Domain::OneOf(choices), OptionValue::Choice(c)) => choices.contains(&c.as_ref()),
            _ => false,
        }
    }

    /// Human-readable listing of accepted values.
    pub fn describe(&self) -> String {
        match self {
            Domain::Boolean => "True or False".to_string(),
            Domain::OneOf(choices) => format!("one of: {}", choices.join(", ")),
        }
    }
}

/// Platform predicate deciding whether an option (or a toolchain variable)
/// exists for given settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Applicability {
    Always,
    OnlyOn(Os),
}

impl Applicability {
    pub fn holds(&self, settings: &Settings) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::OnlyOn(os) => settings.os == *os,
        }
    }
}

/// Static description of one option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionDescriptor {
    pub id: OptionId,
    pub domain: Domain,
    pub default: OptionValue,
    pub applicability: Applicability,
    pub help: &'static str,
}

const fn flag(
    id: OptionId,
    default: bool,
    applicability: Applicability,
    help: &'static str,
) -> OptionDescriptor {
    OptionDescriptor {
        id,
        domain: Domain::Boolean,
        default: OptionValue::Bool(default),
        applicability,
        help,
    }
}

/// Options declared by the libbase recipe, in declaration order.
pub static LIBBASE_OPTIONS: [OptionDescriptor; 9] = [
    flag(OptionId::ModuleNet, true, Applicability::Always, "Build the networking module"),
    flag(
        OptionId::ModuleWin,
        true,
        Applicability::OnlyOn(Os::Windows),
        "Build the Win32 integration module",
    ),
    flag(OptionId::ModuleWx, false, Applicability::Always, "Build the wxWidgets integration module"),
    flag(OptionId::Examples, true, Applicability::Always, "Build example programs"),
    flag(OptionId::Tests, true, Applicability::Always, "Build unit and performance tests"),
    flag(OptionId::Docs, false, Applicability::Always, "Build the documentation site"),
    flag(OptionId::WithTidy, true, Applicability::Always, "Run clang-tidy during the build"),
    flag(OptionId::WithAsan, false, Applicability::Always, "Build with AddressSanitizer"),
    flag(OptionId::WithTsan, false, Applicability::Always, "Build with ThreadSanitizer"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for id in OptionId::ALL {
            assert_eq!(OptionId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(OptionId::from_name("shared"), None);
    }

    #[test]
    fn serde_name_matches_as_str() {
        for id in OptionId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn table_follows_declaration_order() {
        let ids: Vec<OptionId> = LIBBASE_OPTIONS.iter().map(|d| d.id).collect();
        assert_eq!(ids, OptionId::ALL);
    }

    #[test]
    fn defaults_lie_in_their_domains() {
        for d in &LIBBASE_OPTIONS {
            assert!(d.domain.contains(&d.default), "{} default out of domain", d.id);
        }
    }

    #[test]
    fn only_module_win_is_platform_guarded() {
        let guarded: Vec<OptionId> = LIBBASE_OPTIONS
            .iter()
            .filter(|d| d.applicability != Applicability::Always)
            .map(|d| d.id)
            .collect();
        assert_eq!(guarded, [OptionId::ModuleWin]);
    }

    #[test]
    fn domain_membership() {
        let levels = Domain::OneOf(&["none", "html"]);
        assert!(levels.contains(&OptionValue::Choice("html".into())));
        assert!(!levels.contains(&OptionValue::Choice("pdf".into())));
        assert!(!levels.contains(&OptionValue::Bool(true)));
        assert!(!Domain::Boolean.contains(&OptionValue::Choice("True".into())));
    }

    #[test]
    fn value_display_uses_profile_spelling() {
        assert_eq!(OptionValue::Bool(true).to_string(), "True");
        assert_eq!(OptionValue::Bool(false).to_string(), "False");
    }
}
