//! Platform settings model for the libbase build recipe.
//!
//! [`Settings`] is the read-only platform descriptor that drives option
//! pruning and validation: operating system, compiler and compiler version,
//! optional C++ standard, build type, and architecture.
//!
//! Settings are assembled from three sources, later ones winning:
//! - host detection ([`Settings::host`])
//! - a profile's `[settings]` table ([`SettingsOverlay`])
//! - individual `key=value` assignments ([`Settings::set`])

pub mod compiler;
pub mod error;
pub mod parse;
pub mod platform;
pub mod settings;

pub use compiler::{Compiler, CompilerVersion, CppStd};
pub use error::{Result, SettingsError};
pub use parse::{
    load_settings_toml, parse_assignment, parse_settings_toml, settings_to_toml, SettingsOverlay,
};
pub use platform::{Arch, BuildType, Os};
pub use settings::{Settings, SETTING_KEYS};
