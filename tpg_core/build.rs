// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    params: ParamLimits,
    generation: GenerationLimits,
    document: DocumentLimits,
    security: SecurityLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ParamLimits {
    max_line_length: usize,
    max_components_per_line: usize,
    max_purpose_lines: usize,
    max_token_length: usize,
}

#[derive(serde::Deserialize)]
struct GenerationLimits {
    max_purposes_per_block: u64,
    max_output_size: u64,
    max_template_size: usize,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_source_size: u64,
    max_blocks_per_source: usize,
    max_purposes_per_block_section: usize,
    max_attributes_per_tag: usize,
    max_tag_name_length: usize,
}

#[derive(serde::Deserialize)]
struct SecurityLimits {
    memory_alert_threshold: u64,
    max_processing_time_seconds: u64,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
    security_min_log_level: u8,
    audit_log_retention_buffer: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TPG_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=TPG_CONFIG_DIR");

    let profile = env::var("TPG_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("TPG_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of tpg_core directory)
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

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);

    println!(
        "cargo:warning=Generated constants from {}",
        config_path.display()
    );
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_OUTPUT_SIZE: u64 = 10_000_000_000;
    const ABSOLUTE_MAX_PROCESSING_TIME: u64 = 3600;

    if config.document.max_source_size > ABSOLUTE_MAX_SOURCE_SIZE {
        panic!("SECURITY: max_source_size exceeds absolute maximum");
    }

    if config.generation.max_output_size > ABSOLUTE_MAX_OUTPUT_SIZE {
        panic!("SECURITY: max_output_size exceeds absolute maximum");
    }

    if config.security.max_processing_time_seconds > ABSOLUTE_MAX_PROCESSING_TIME {
        panic!("SECURITY: max_processing_time_seconds exceeds absolute maximum");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if config.params.max_purpose_lines == 0 {
        panic!("CONFIG: max_purpose_lines must be at least 1");
    }

    if profile == "production" {
        if config.document.max_source_size > 50_000_000 {
            panic!("PRODUCTION: max_source_size too high for production");
        }
        if config.security.max_processing_time_seconds > 600 {
            panic!("PRODUCTION: max_processing_time_seconds too high for production");
        }
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
    pub mod params {{
        pub const MAX_LINE_LENGTH: usize = {};
        pub const MAX_COMPONENTS_PER_LINE: usize = {};
        pub const MAX_PURPOSE_LINES: usize = {};
        pub const MAX_TOKEN_LENGTH: usize = {};
    }}

    pub mod generation {{
        pub const MAX_PURPOSES_PER_BLOCK: u64 = {};
        pub const MAX_OUTPUT_SIZE: u64 = {};
        pub const MAX_TEMPLATE_SIZE: usize = {};
    }}

    pub mod document {{
        pub const MAX_SOURCE_SIZE: u64 = {};
        pub const MAX_BLOCKS_PER_SOURCE: usize = {};
        pub const MAX_PURPOSES_PER_BLOCK_SECTION: usize = {};
        pub const MAX_ATTRIBUTES_PER_TAG: usize = {};
        pub const MAX_TAG_NAME_LENGTH: usize = {};
    }}

    pub mod security {{
        pub const MEMORY_ALERT_THRESHOLD: u64 = {};
        pub const MAX_PROCESSING_TIME_SECONDS: u64 = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
        pub const AUDIT_LOG_RETENTION_BUFFER: usize = {};
    }}
}}
"#,
        profile,
        // Params
        config.params.max_line_length,
        config.params.max_components_per_line,
        config.params.max_purpose_lines,
        config.params.max_token_length,
        // Generation
        config.generation.max_purposes_per_block,
        config.generation.max_output_size,
        config.generation.max_template_size,
        // Document
        config.document.max_source_size,
        config.document.max_blocks_per_source,
        config.document.max_purposes_per_block_section,
        config.document.max_attributes_per_tag,
        config.document.max_tag_name_length,
        // Security
        config.security.memory_alert_threshold,
        config.security.max_processing_time_seconds,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        config.logging.security_min_log_level,
        config.logging.audit_log_retention_buffer,
    );

    fs::write(output_path, constants_code).unwrap();
}
