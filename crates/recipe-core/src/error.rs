//! Resolution errors.

use std::fmt;

use recipe_settings::{CppStd, Os};
use thiserror::Error;

/// Why an override key did not name a usable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownReason {
    /// No option with this name is declared.
    Undeclared,
    /// The option exists but was pruned for the target OS.
    NotApplicable { os: Os },
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::Undeclared => f.write_str("no such option is declared"),
            UnknownReason::NotApplicable { os } => {
                write!(f, "option is not available when os={os}")
            }
        }
    }
}

/// Errors that abort the resolution pipeline.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("unknown option '{name}': {reason}")]
    UnknownOption { name: String, reason: UnknownReason },

    #[error("invalid value '{value}' for option '{option}' (expected {expected})")]
    InvalidValue {
        option: String,
        value: String,
        expected: String,
    },

    #[error("unsupported platform: os={os} (supported: {supported})")]
    UnsupportedPlatform { os: Os, supported: String },

    #[error("options '{first}' and '{second}' cannot be enabled together")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
    },

    #[error("C++{required} is required: {detail}")]
    StandardNotSupported { required: CppStd, detail: String },

    /// Reserved for the external dependency manager; never raised here.
    #[error("requirement '{package}' could not be resolved: {detail}")]
    RequirementResolution { package: String, detail: String },

    #[error("failed to write {what}: {source}")]
    Output {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable error category, used for exit codes and structured reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    UnknownOption,
    InvalidValue,
    UnsupportedPlatform,
    ConflictingOptions,
    StandardNotSupported,
    RequirementResolution,
    Output,
}

impl ErrorCategory {
    /// Stable identifier for machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::UnknownOption => "unknown-option",
            ErrorCategory::InvalidValue => "invalid-value",
            ErrorCategory::UnsupportedPlatform => "unsupported-platform",
            ErrorCategory::ConflictingOptions => "conflicting-options",
            ErrorCategory::StandardNotSupported => "standard-not-supported",
            ErrorCategory::RequirementResolution => "requirement-resolution",
            ErrorCategory::Output => "output",
        }
    }

    /// Process exit code for this category. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorCategory::Output => 1,
            ErrorCategory::UnknownOption => 2,
            ErrorCategory::InvalidValue => 3,
            ErrorCategory::UnsupportedPlatform => 4,
            ErrorCategory::ConflictingOptions => 5,
            ErrorCategory::StandardNotSupported => 6,
            ErrorCategory::RequirementResolution => 7,
        }
    }
}

impl RecipeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecipeError::UnknownOption { .. } => ErrorCategory::UnknownOption,
            RecipeError::InvalidValue { .. } => ErrorCategory::InvalidValue,
            RecipeError::UnsupportedPlatform { .. } => ErrorCategory::UnsupportedPlatform,
            RecipeError::ConflictingOptions { .. } => ErrorCategory::ConflictingOptions,
            RecipeError::StandardNotSupported { .. } => ErrorCategory::StandardNotSupported,
            RecipeError::RequirementResolution { .. } => ErrorCategory::RequirementResolution,
            RecipeError::Output { .. } | RecipeError::Json(_) => ErrorCategory::Output,
        }
    }
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, RecipeError>;
