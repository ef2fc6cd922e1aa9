//! Build-configuration resolution for the libbase C++ library.
//!
//! Turns user-selected options and a platform descriptor into a validated
//! configuration, the external requirements it implies, and the CMake cache
//! variables a downstream generator consumes. The pipeline is strictly linear:
//!
//! 1. [`OptionModel::prune`] drops options that do not apply to the platform
//! 2. [`OptionSet::resolve`] applies raw overrides over declared defaults
//! 3. [`validate`] checks platform support, exclusive options, and the C++ standard
//! 4. [`emit`] derives the [`RequirementDescriptor`] and [`ToolchainVariables`]
//!
//! Every stage is a pure function of its inputs. Values are built per
//! invocation, so resolutions for different settings can run concurrently.

pub mod artifacts;
pub mod configuration;
pub mod error;
pub mod layout;
pub mod model;
pub mod option;
pub mod pipeline;
pub mod requirement;
pub mod toolchain;
pub mod validate;

pub use artifacts::write_artifacts;
pub use configuration::Configuration;
pub use error::{ErrorCategory, RecipeError, Result, UnknownReason};
pub use layout::BuildLayout;
pub use model::{OptionModel, OptionSet, Overrides, RawValue, RECIPE_NAME};
pub use option::{
    Applicability, Domain, OptionDescriptor, OptionId, OptionValue, LIBBASE_OPTIONS,
};
pub use pipeline::{run, run_with, Resolution};
pub use requirement::{
    resolve_requirements, PropagationFlags, Requirement, RequirementDescriptor,
};
pub use toolchain::{emit, CmakeScript, ToolchainValue, ToolchainVariable, ToolchainVariables};
pub use validate::{validate, ValidationRules};
