//! Projection of a configuration into CMake cache variables.

use std::fmt;

use recipe_settings::{Os, Settings};
use serde::{Serialize, Serializer};

use crate::configuration::Configuration;
use crate::option::{Applicability, OptionId, OptionValue};
use crate::requirement::{resolve_requirements, RequirementDescriptor};

/// A primitive toolchain value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ToolchainValue {
    Bool(bool),
    Str(String),
}

impl From<&OptionValue> for ToolchainValue {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Bool(b) => ToolchainValue::Bool(*b),
            OptionValue::Choice(s) => ToolchainValue::Str(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolchainVariable {
    pub key: String,
    pub value: ToolchainValue,
}

/// Ordered toolchain variables. Serializes as a JSON object in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainVariables {
    variables: Vec<ToolchainVariable>,
}

impl ToolchainVariables {
    pub fn get(&self, key: &str) -> Option<&ToolchainValue> {
        self.variables.iter().find(|v| v.key == key).map(|v| &v.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolchainVariable> {
        self.variables.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Render as a CMake script that forces each cache entry.
    pub fn to_cmake(&self) -> String {
        CmakeScript(self).to_string()
    }
}

/// CMake cache script view of [`ToolchainVariables`].
pub struct CmakeScript<'a>(pub &'a ToolchainVariables);

impl fmt::Display for CmakeScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by the libbase recipe. Do not edit.")?;
        for var in &self.0.variables {
            match &var.value {
                ToolchainValue::Bool(b) => writeln!(
                    f,
                    "set({} {} CACHE BOOL \"\" FORCE)",
                    var.key,
                    if *b { "ON" } else { "OFF" }
                )?,
                ToolchainValue::Str(s) => writeln!(
                    f,
                    "set({} \"{}\" CACHE STRING \"\" FORCE)",
                    var.key,
                    s.replace('\\', "\\\\").replace('"', "\\\"")
                )?,
            }
        }
        Ok(())
    }
}

impl Serialize for ToolchainVariables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.variables.iter().map(|v| (&v.key, &v.value)))
    }
}

/// Maps one option onto one cache variable.
#[derive(Debug, Clone, Copy)]
pub struct VariableRule {
    pub key: &'static str,
    pub option: OptionId,
    /// Emit only when this holds against the settings.
    pub guard: Applicability,
}

const fn var(key: &'static str, option: OptionId) -> VariableRule {
    VariableRule {
        key,
        option,
        guard: Applicability::Always,
    }
}

/// Cache variables of the libbase build, in emission order.
pub static LIBBASE_VARIABLES: [VariableRule; 10] = [
    var("LIBBASE_BUILD_MODULE_NET", OptionId::ModuleNet),
    VariableRule {
        key: "LIBBASE_BUILD_MODULE_WIN",
        option: OptionId::ModuleWin,
        guard: Applicability::OnlyOn(Os::Windows),
    },
    var("LIBBASE_BUILD_MODULE_WX", OptionId::ModuleWx),
    var("LIBBASE_BUILD_EXAMPLES", OptionId::Examples),
    var("LIBBASE_BUILD_TESTS", OptionId::Tests),
    var("LIBBASE_BUILD_PERFORMANCE_TESTS", OptionId::Tests),
    var("LIBBASE_BUILD_DOCS", OptionId::Docs),
    var("LIBBASE_CLANG_TIDY", OptionId::WithTidy),
    var("LIBBASE_BUILD_ASAN", OptionId::WithAsan),
    var("LIBBASE_BUILD_TSAN", OptionId::WithTsan),
];

/// Project a configuration through `rules`.
///
/// A rule is skipped when its guard fails or its option was pruned.
pub fn project_variables(
    rules: &[VariableRule],
    configuration: &Configuration,
    settings: &Settings,
) -> ToolchainVariables {
    let variables = rules
        .iter()
        .filter(|rule| rule.guard.holds(settings))
        .filter_map(|rule| {
            configuration.get(rule.option).map(|value| ToolchainVariable {
                key: rule.key.to_string(),
                value: value.into(),
            })
        })
        .collect();
    ToolchainVariables { variables }
}

/// Emit the requirement descriptor and toolchain variables for a validated
/// configuration.
pub fn emit(
    configuration: &Configuration,
    settings: &Settings,
) -> (RequirementDescriptor, ToolchainVariables) {
    (
        resolve_requirements(configuration),
        project_variables(&LIBBASE_VARIABLES, configuration, settings),
    )
}
