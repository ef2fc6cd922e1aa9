//! Option model: pruning by platform and resolution of raw overrides.
//!
//! Pruning depends only on [`Settings`]; resolution depends only on the
//! pruned set and the overrides. Neither step looks at other option values.

use std::collections::BTreeMap;
use std::fmt;

use recipe_settings::{Os, Settings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::configuration::Configuration;
use crate::error::{RecipeError, Result, UnknownReason};
use crate::option::{Domain, OptionDescriptor, OptionId, OptionValue, LIBBASE_OPTIONS};

/// Package name used to scope overrides (`libbase/*:tests=False`).
pub const RECIPE_NAME: &str = "libbase";

/// An override value as supplied by a profile or the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Raw option overrides keyed by option name.
///
/// Keys may carry a package scope (`libbase:tests`, `libbase/*:tests`,
/// `*:tests`); the scope is stripped on insert and keys scoped to other
/// packages are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Overrides {
    values: BTreeMap<String, RawValue>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an override. Later inserts for the same option win.
    pub fn insert(&mut self, key: &str, value: impl Into<RawValue>) {
        match unscoped_name(key) {
            Some(name) => {
                self.values.insert(name.to_string(), value.into());
            }
            None => debug!(key, "ignoring override scoped to another package"),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Lay `other` over `self`; entries in `other` win.
    pub fn extend(&mut self, other: Overrides) {
        self.values.extend(other.values);
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'de> Deserialize<'de> for Overrides {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawValue>::deserialize(deserializer)?;
        let mut overrides = Overrides::new();
        for (key, value) in raw {
            overrides.insert(&key, value);
        }
        Ok(overrides)
    }
}

/// Strip a package scope from an override key.
///
/// Returns `None` when the key is scoped to a package other than this recipe.
fn unscoped_name(key: &str) -> Option<&str> {
    let Some((scope, name)) = key.rsplit_once(':') else {
        return Some(key);
    };
    let package = scope.split('/').next().unwrap_or(scope);
    (package == RECIPE_NAME || package == "*").then_some(name)
}

/// The declared options of a recipe.
#[derive(Debug, Clone, Copy)]
pub struct OptionModel {
    descriptors: &'static [OptionDescriptor],
}

impl OptionModel {
    /// Model over an arbitrary descriptor table.
    pub fn new(descriptors: &'static [OptionDescriptor]) -> Self {
        Self { descriptors }
    }

    /// The libbase option model.
    pub fn libbase() -> Self {
        Self::new(&LIBBASE_OPTIONS)
    }

    pub fn descriptors(&self) -> &'static [OptionDescriptor] {
        self.descriptors
    }

    /// Keep only options whose applicability predicate holds for `settings`.
    pub fn prune(&self, settings: &Settings) -> OptionSet {
        let (kept, pruned): (Vec<_>, Vec<_>) = self
            .descriptors
            .iter()
            .partition(|d| d.applicability.holds(settings));
        debug!(
            os = %settings.os,
            kept = kept.len(),
            pruned = ?pruned.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            "pruned options"
        );
        OptionSet {
            os: settings.os,
            declared: self.descriptors,
            options: kept,
        }
    }
}

/// Options applicable under one set of settings.
#[derive(Debug, Clone)]
pub struct OptionSet {
    os: Os,
    declared: &'static [OptionDescriptor],
    options: Vec<&'static OptionDescriptor>,
}

impl OptionSet {
    pub fn contains(&self, id: OptionId) -> bool {
        self.descriptor(id).is_some()
    }

    pub fn descriptor(&self, id: OptionId) -> Option<&'static OptionDescriptor> {
        self.options.iter().copied().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static OptionDescriptor> + '_ {
        self.options.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Build a configuration from defaults and `overrides`.
    ///
    /// Overrides are checked in name order, so the reported error is stable
    /// when several overrides are bad.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Configuration> {
        let mut chosen = BTreeMap::new();
        for (name, raw) in overrides.iter() {
            let descriptor = self.lookup(name)?;
            let value = coerce(descriptor, raw)?;
            debug!(option = name, value = %value, "override applied");
            chosen.insert(descriptor.id, value);
        }

        let values = self
            .options
            .iter()
            .map(|d| {
                let value = chosen.remove(&d.id).unwrap_or_else(|| d.default.clone());
                (d.id, value)
            })
            .collect();
        Ok(Configuration::from_values(values))
    }

    fn lookup(&self, name: &str) -> Result<&'static OptionDescriptor> {
        let unknown = |reason| RecipeError::UnknownOption {
            name: name.to_string(),
            reason,
        };
        let declared = self
            .declared
            .iter()
            .find(|d| d.id.as_str() == name)
            .ok_or_else(|| unknown(UnknownReason::Undeclared))?;
        self.descriptor(declared.id)
            .ok_or_else(|| unknown(UnknownReason::NotApplicable { os: self.os }))
    }
}

/// Convert a raw override into a value inside the option's domain.
fn coerce(descriptor: &OptionDescriptor, raw: &RawValue) -> Result<OptionValue> {
    let value = match (descriptor.domain, raw) {
        (Domain::Boolean, RawValue::Bool(b)) => Some(OptionValue::Bool(*b)),
        (Domain::Boolean, RawValue::Text(s)) => match s.as_str() {
            "True" | "true" => Some(OptionValue::Bool(true)),
            "False" | "false" => Some(OptionValue::Bool(false)),
            _ => None,
        },
        (Domain::OneOf(choices), RawValue::Text(s)) => choices
            .iter()
            .find(|c| **c == s.as_str())
            .map(|c| OptionValue::Choice((*c).into())),
        (Domain::OneOf(_), RawValue::Bool(_)) => None,
    };
    value.ok_or_else(|| RecipeError::InvalidValue {
        option: descriptor.id.as_str().to_string(),
        value: raw.to_string(),
        expected: descriptor.domain.describe(),
    })
}
