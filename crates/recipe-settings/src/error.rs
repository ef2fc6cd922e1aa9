//! Error types for settings operations.

use std::path::PathBuf;

/// Errors that can occur while building or loading platform settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing settings files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file not found.
    #[error("settings file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A setting key that the model does not know about.
    #[error("unknown setting '{key}' (expected one of: {})", crate::SETTING_KEYS.join(", "))]
    UnknownSetting {
        /// The offending key.
        key: String,
    },

    /// A value outside the domain of a known setting.
    #[error("invalid value '{value}' for setting '{setting}' (expected one of: {expected})")]
    InvalidValue {
        /// Setting name (e.g. "os", "compiler.version").
        setting: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable list of accepted values.
        expected: String,
    },

    /// A `key=value` assignment without `=`.
    #[error("malformed assignment '{text}' (expected key=value)")]
    MalformedAssignment {
        /// The raw assignment text.
        text: String,
    },
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
