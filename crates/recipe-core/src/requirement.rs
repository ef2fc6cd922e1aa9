//! External dependency requirements derived from a configuration.
//!
//! Requirements are declared in groups gated on a single condition, so
//! packages that must travel together (the test and benchmark frameworks)
//! are added or skipped as a unit. Version ranges are passed through
//! verbatim; picking concrete versions is the dependency manager's job.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::configuration::Configuration;
use crate::option::OptionId;

/// Whether a dependency's headers and libraries propagate to consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropagationFlags {
    pub transitive_headers: bool,
    pub transitive_libs: bool,
}

impl PropagationFlags {
    pub const NONE: PropagationFlags = PropagationFlags {
        transitive_headers: false,
        transitive_libs: false,
    };

    pub const ALL: PropagationFlags = PropagationFlags {
        transitive_headers: true,
        transitive_libs: true,
    };
}

/// One external dependency with its version range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Requirement {
    pub name: String,
    /// Range expression; space-separated bounds are all required (`>=8.12 <9.0`).
    pub version_range: String,
    pub flags: PropagationFlags,
}

impl Requirement {
    pub fn new(
        name: impl Into<String>,
        version_range: impl Into<String>,
        flags: PropagationFlags,
    ) -> Self {
        Self {
            name: name.into(),
            version_range: version_range.into(),
            flags,
        }
    }

    /// Package reference as passed to the dependency manager: `glog/[~0.7]`.
    pub fn reference(&self) -> String {
        format!("{}/[{}]", self.name, self.version_range)
    }

    /// Whether a concrete version falls inside this requirement's range.
    ///
    /// Partial versions (`8.12`) are padded with zeros.
    pub fn admits(&self, version: &str) -> Result<bool, semver::Error> {
        let bounds = self.version_range.split_whitespace().collect::<Vec<_>>();
        let req = semver::VersionReq::parse(&bounds.join(", "))?;
        let version = semver::Version::parse(&pad_version(version))?;
        Ok(req.matches(&version))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference())
    }
}

fn pad_version(version: &str) -> String {
    let (core, rest) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    let parts = core.split('.').count();
    let mut padded = core.to_string();
    for _ in parts..3 {
        padded.push_str(".0");
    }
    padded.push_str(rest);
    padded
}

/// Ordered list of requirements with at most one entry per package name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementDescriptor {
    requirements: Vec<Requirement>,
}

impl RequirementDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a requirement unless one with the same name is already listed.
    ///
    /// Returns whether it was added.
    pub fn push(&mut self, requirement: Requirement) -> bool {
        if self.contains(&requirement.name) {
            debug!(package = %requirement.name, "duplicate requirement skipped");
            return false;
        }
        self.requirements.push(requirement);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.requirements.iter().map(|r| r.name.as_str()).collect()
    }

    /// Package references, one per requirement, in order.
    pub fn references(&self) -> Vec<String> {
        self.requirements.iter().map(Requirement::reference).collect()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// When a requirement group applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// The boolean option is present and true.
    Enabled(OptionId),
}

impl Condition {
    pub fn holds(&self, configuration: &Configuration) -> bool {
        match self {
            Condition::Always => true,
            Condition::Enabled(id) => configuration.flag(*id),
        }
    }
}

/// A static requirement declaration.
#[derive(Debug, Clone, Copy)]
pub struct RequirementSpec {
    pub name: &'static str,
    pub version_range: &'static str,
    pub flags: PropagationFlags,
}

impl RequirementSpec {
    const fn private(name: &'static str, version_range: &'static str) -> Self {
        Self {
            name,
            version_range,
            flags: PropagationFlags::NONE,
        }
    }

    fn to_requirement(self) -> Requirement {
        Requirement::new(self.name, self.version_range, self.flags)
    }
}

/// Requirements added or skipped together.
#[derive(Debug, Clone, Copy)]
pub struct RequirementGroup {
    pub condition: Condition,
    pub members: &'static [RequirementSpec],
}

/// Requirement groups of the libbase recipe, in emission order.
pub static LIBBASE_REQUIREMENTS: [RequirementGroup; 4] = [
    RequirementGroup {
        condition: Condition::Always,
        members: &[RequirementSpec {
            name: "glog",
            version_range: "~0.7",
            flags: PropagationFlags::ALL,
        }],
    },
    RequirementGroup {
        condition: Condition::Enabled(OptionId::ModuleNet),
        members: &[RequirementSpec::private("libcurl", ">=8.12 <9.0")],
    },
    RequirementGroup {
        condition: Condition::Enabled(OptionId::ModuleWx),
        members: &[RequirementSpec::private("wxwidgets", ">=3.2 <4.0")],
    },
    RequirementGroup {
        condition: Condition::Enabled(OptionId::Tests),
        members: &[
            RequirementSpec::private("gtest", "~1.16"),
            RequirementSpec::private("benchmark", "~1.9"),
        ],
    },
];

/// Derive requirements from `groups` for a configuration.
pub fn resolve_with(groups: &[RequirementGroup], configuration: &Configuration) -> RequirementDescriptor {
    let mut descriptor = RequirementDescriptor::new();
    for group in groups.iter().filter(|g| g.condition.holds(configuration)) {
        for spec in group.members {
            descriptor.push(spec.to_requirement());
        }
    }
    debug!(packages = ?descriptor.names(), "requirements resolved");
    descriptor
}

/// Derive the libbase requirements for a configuration.
pub fn resolve_requirements(configuration: &Configuration) -> RequirementDescriptor {
    resolve_with(&LIBBASE_REQUIREMENTS, configuration)
}
