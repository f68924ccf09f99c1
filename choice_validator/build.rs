// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    design: DesignLimits,
    submission: SubmissionLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct DesignLimits {
    min_factors: i64,
    max_factors: i64,
    min_levels: i64,
    max_levels: i64,
    min_option_set_size: i64,
    max_option_set_size: i64,
}

#[derive(serde::Deserialize)]
struct SubmissionLimits {
    max_file_size: u64,
    max_field_size: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_context_entries: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CHOICE_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CHOICE_CONFIG_DIR");

    let profile = env::var("CHOICE_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("CHOICE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of choice_validator directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_range(name: &str, min: i64, max: i64) {
    if min < 2 {
        panic!("DESIGN: {} lower bound must be at least 2 (got {})", name, min);
    }
    if min > max {
        panic!("DESIGN: {} range is inverted ({} > {})", name, min, max);
    }
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 100_000_000;

    validate_range(
        "factors",
        config.design.min_factors,
        config.design.max_factors,
    );
    validate_range("levels", config.design.min_levels, config.design.max_levels);
    validate_range(
        "option_set_size",
        config.design.min_option_set_size,
        config.design.max_option_set_size,
    );

    if config.submission.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SUBMISSION: max_file_size exceeds absolute maximum");
    }

    if config.submission.max_field_size as u64 > config.submission.max_file_size {
        panic!("SUBMISSION: max_field_size exceeds max_file_size");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("LOGGING: log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.submission.max_file_size > 10_485_760 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod design {{
        pub const MIN_FACTORS: i64 = {};
        pub const MAX_FACTORS: i64 = {};
        pub const MIN_LEVELS: i64 = {};
        pub const MAX_LEVELS: i64 = {};
        pub const MIN_OPTION_SET_SIZE: i64 = {};
        pub const MAX_OPTION_SET_SIZE: i64 = {};
    }}

    pub mod submission {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_FIELD_SIZE: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_CONTEXT_ENTRIES: usize = {};
    }}
}}
"#,
        profile,
        // Design
        config.design.min_factors,
        config.design.max_factors,
        config.design.min_levels,
        config.design.max_levels,
        config.design.min_option_set_size,
        config.design.max_option_set_size,
        // Submission
        config.submission.max_file_size,
        config.submission.max_field_size,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_context_entries,
    );

    fs::write(output_path, constants_code).unwrap();
}
