// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserPreferences {
    /// Whether to log every degraded parameter line individually
    pub log_degraded_lines: bool,

    /// Whether to include the original line text in degradation warnings
    pub include_original_text: bool,

    /// Whether to show position information in warning messages
    pub include_position_in_warnings: bool,

    /// Whether to collect per-line token statistics
    pub collect_token_statistics: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            log_degraded_lines: env::var("TPG_PARSER_LOG_DEGRADED_LINES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_original_text: env::var("TPG_PARSER_INCLUDE_ORIGINAL_TEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_warnings: env::var("TPG_PARSER_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            collect_token_statistics: env::var("TPG_PARSER_COLLECT_TOKEN_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorPreferences {
    /// Whether to log the combination count after each expansion
    pub log_combination_counts: bool,

    /// Whether to track output size while generating
    pub track_output_size: bool,

    /// Whether to log progress for large expansions
    pub log_expansion_progress: bool,
}

impl Default for GeneratorPreferences {
    fn default() -> Self {
        Self {
            log_combination_counts: env::var("TPG_GENERATOR_LOG_COMBINATION_COUNTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_output_size: env::var("TPG_GENERATOR_TRACK_OUTPUT_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_expansion_progress: env::var("TPG_GENERATOR_LOG_PROGRESS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPreferences {
    /// Whether to require the .tpg extension on source names (user preference)
    pub require_tpg_extension: bool,

    /// Whether to log structural details while assembling blocks
    pub log_block_details: bool,

    /// Whether to include per-section statistics in output
    pub include_section_statistics: bool,
}

impl Default for DocumentPreferences {
    fn default() -> Self {
        Self {
            require_tpg_extension: env::var("TPG_DOCUMENT_REQUIRE_TPG_EXTENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_block_details: env::var("TPG_DOCUMENT_LOG_BLOCK_DETAILS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_section_statistics: env::var("TPG_DOCUMENT_INCLUDE_SECTION_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within enforced bounds)
    /// Note: degradation warnings are still reported regardless of this setting
    pub min_log_level: LogLevel,

    /// Whether to include expansion metrics in logs
    pub log_expansion_metrics: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include source context in log messages
    pub include_source_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("TPG_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("TPG_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("TPG_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_expansion_metrics: env::var("TPG_LOGGING_LOG_EXPANSION_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var("TPG_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_source_context: env::var("TPG_LOGGING_INCLUDE_SOURCE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    /// Convert from events::LogLevel for compatibility
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub parser: ParserPreferences,
    pub generator: GeneratorPreferences,
    pub document: DocumentPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load preferences from a TOML file, falling back to env/defaults for
    /// anything the file omits.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read preferences file {}: {}", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse preferences file {}: {}", path.display(), e))
    }

    /// Load preferences from the TPG_PREFERENCES_FILE location if set,
    /// otherwise from environment variables and defaults.
    pub fn load() -> Result<Self, String> {
        match env::var("TPG_PREFERENCES_FILE") {
            Ok(path) => Self::load_from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Parser
    pub const PARSER_LOG_DEGRADED_LINES: &str = "TPG_PARSER_LOG_DEGRADED_LINES";
    pub const PARSER_INCLUDE_ORIGINAL_TEXT: &str = "TPG_PARSER_INCLUDE_ORIGINAL_TEXT";
    pub const PARSER_INCLUDE_POSITIONS: &str = "TPG_PARSER_INCLUDE_POSITIONS";
    pub const PARSER_COLLECT_TOKEN_STATS: &str = "TPG_PARSER_COLLECT_TOKEN_STATS";

    // Generator
    pub const GENERATOR_LOG_COMBINATION_COUNTS: &str = "TPG_GENERATOR_LOG_COMBINATION_COUNTS";
    pub const GENERATOR_TRACK_OUTPUT_SIZE: &str = "TPG_GENERATOR_TRACK_OUTPUT_SIZE";
    pub const GENERATOR_LOG_PROGRESS: &str = "TPG_GENERATOR_LOG_PROGRESS";

    // Document
    pub const DOCUMENT_REQUIRE_TPG_EXTENSION: &str = "TPG_DOCUMENT_REQUIRE_TPG_EXTENSION";
    pub const DOCUMENT_LOG_BLOCK_DETAILS: &str = "TPG_DOCUMENT_LOG_BLOCK_DETAILS";
    pub const DOCUMENT_INCLUDE_SECTION_STATS: &str = "TPG_DOCUMENT_INCLUDE_SECTION_STATS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TPG_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TPG_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TPG_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_EXPANSION_METRICS: &str = "TPG_LOGGING_LOG_EXPANSION_METRICS";
    pub const LOGGING_CARGO_STYLE: &str = "TPG_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_SOURCE_CONTEXT: &str = "TPG_LOGGING_INCLUDE_SOURCE_CONTEXT";

    // Preferences file
    pub const PREFERENCES_FILE: &str = "TPG_PREFERENCES_FILE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::PARSER_LOG_DEGRADED_LINES.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::GENERATOR_LOG_COMBINATION_COUNTS.is_empty());
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let text = r#"
            [logging]
            use_structured_logging = true
            enable_console_logging = false
            min_log_level = "Debug"
            log_expansion_metrics = false
            enable_cargo_style_output = false
            include_source_context = true

            [generator]
            log_combination_counts = false
            track_output_size = true
            log_expansion_progress = false
        "#;

        let config: RuntimeConfig = toml::from_str(text).unwrap();
        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(!config.generator.log_combination_counts);
    }
}
