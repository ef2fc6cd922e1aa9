//! Resolution pipeline orchestrator.

use recipe_settings::Settings;
use serde::Serialize;
use tracing::info;

use crate::configuration::Configuration;
use crate::error::Result;
use crate::layout::BuildLayout;
use crate::model::{OptionModel, Overrides};
use crate::requirement::RequirementDescriptor;
use crate::toolchain::{emit, ToolchainVariables};
use crate::validate::ValidationRules;

/// Output of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub settings: Settings,
    pub configuration: Configuration,
    pub requirements: RequirementDescriptor,
    pub variables: ToolchainVariables,
    pub layout: BuildLayout,
}

/// Run the full pipeline with the libbase model and rules:
/// prune -> resolve -> validate -> requirements + toolchain variables.
///
/// Nothing is produced unless every stage succeeds.
pub fn run(settings: &Settings, overrides: &Overrides) -> Result<Resolution> {
    run_with(
        OptionModel::libbase(),
        &ValidationRules::libbase(),
        settings,
        overrides,
    )
}

/// Run the pipeline with an explicit option model and validation rules.
pub fn run_with(
    model: OptionModel,
    rules: &ValidationRules,
    settings: &Settings,
    overrides: &Overrides,
) -> Result<Resolution> {
    // Stage 1: Drop options that do not exist on this platform
    let options = model.prune(settings);

    // Stage 2: Defaults + overrides
    let configuration = options.resolve(overrides)?;

    // Stage 3: Cross-option and platform constraints
    rules.validate(&configuration, settings)?;

    // Stage 4: Derived projections
    let (requirements, variables) = emit(&configuration, settings);
    let layout = BuildLayout::for_settings(settings);

    info!(
        os = %settings.os,
        compiler = %settings.compiler,
        requirements = requirements.len(),
        variables = variables.len(),
        "configuration resolved"
    );

    Ok(Resolution {
        settings: settings.clone(),
        configuration,
        requirements,
        variables,
        layout,
    })
}
