//! The resolved option configuration for one build invocation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::option::{OptionId, OptionValue};

/// Immutable mapping from option to value.
///
/// Only [`OptionSet::resolve`](crate::model::OptionSet::resolve) builds one,
/// so every key is an option applicable under the settings it was resolved
/// for and every value lies inside that option's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Configuration {
    values: BTreeMap<OptionId, OptionValue>,
}

impl Configuration {
    pub(crate) fn from_values(values: BTreeMap<OptionId, OptionValue>) -> Self {
        Self { values }
    }

    /// Value of an option, or `None` if it was pruned.
    pub fn get(&self, id: OptionId) -> Option<&OptionValue> {
        self.values.get(&id)
    }

    /// Whether a boolean option is present and set to true.
    pub fn flag(&self, id: OptionId) -> bool {
        matches!(self.values.get(&id), Some(OptionValue::Bool(true)))
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.values.contains_key(&id)
    }

    /// Options and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionValue)> {
        self.values.iter().map(|(id, v)| (*id, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
