//! CLI command implementations.

pub mod generate;
pub mod options;
pub mod resolve;
pub mod settings;
