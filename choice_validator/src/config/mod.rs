//! Configuration module for the choice validator
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from the workspace TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{LoggingPreferences, RuntimeConfig, ValidationPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("CHOICE_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("CHOICE_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

/// Design limits in one place, for messages and diagnostics
pub fn limits_summary() -> String {
    use compile_time::design::*;
    use compile_time::submission::*;

    format!(
        "Design Limits ({}):\n\
         - Attributes: {}..={}\n\
         - Levels per attribute: {}..={}\n\
         - Options per choice set: {}..={}\n\
         - Max submission file size: {} bytes\n\
         - Max submission field size: {} bytes",
        build_info::source_info(),
        MIN_FACTORS,
        MAX_FACTORS,
        MIN_LEVELS,
        MAX_LEVELS,
        MIN_OPTION_SET_SIZE,
        MAX_OPTION_SET_SIZE,
        MAX_FILE_SIZE,
        MAX_FIELD_SIZE,
    )
}
