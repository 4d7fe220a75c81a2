//! Configuration module for logging - using compile-time constants
//!
//! Provides access to compile-time logging limits and runtime user preferences.
//! Limits are enforced at compile time and cannot be loosened at runtime.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

// Type aliases for clarity
type EventsLogLevel = crate::logging::events::LogLevel;
type RuntimeLogLevel = crate::config::runtime::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Validate runtime preferences against compile-time limits
fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    // Parameter-line warnings must remain visible: the minimum level may not
    // be raised above the compile-time floor.
    if (preferences.min_log_level as u8) < SECURITY_MIN_LOG_LEVEL
        && !preferences.enable_cargo_style_output
    {
        return Err(format!(
            "Warning output cannot be fully disabled: minimum level {} required",
            SECURITY_MIN_LOG_LEVEL
        ));
    }

    Ok(())
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (respects user preference within enforced bounds)
pub fn get_min_log_level() -> EventsLogLevel {
    let preferences = get_runtime_preferences();

    let user_level = preferences.min_log_level.to_events_log_level();

    // Parameter warnings degrade lines silently otherwise, so the level is
    // promoted to at least Warning when the compile-time floor demands it.
    if SECURITY_MIN_LOG_LEVEL >= 1 {
        match user_level {
            EventsLogLevel::Error => EventsLogLevel::Warning,
            level => level,
        }
    } else {
        user_level
    }
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Get the enforced floor for degradation warnings (compile-time constant)
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        2 => EventsLogLevel::Info,
        _ => EventsLogLevel::Debug,
    }
}

/// Check if expansion metrics should be logged (user preference)
pub fn log_expansion_metrics() -> bool {
    get_runtime_preferences().log_expansion_metrics
}

/// Get error buffer size (compile-time constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log events per source (compile-time constant)
pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Get maximum log message length (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Check if cargo-style output is enabled (user preference)
pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

/// Check if source context should be included (user preference)
pub fn include_source_context() -> bool {
    get_runtime_preferences().include_source_context
}

/// Get audit log retention buffer size (compile-time constant)
pub fn get_audit_log_retention_buffer() -> usize {
    AUDIT_LOG_RETENTION_BUFFER
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per source exceeds total buffer size".to_string());
    }

    if let Some(preferences) = RUNTIME_PREFERENCES.get() {
        validate_preferences(preferences)?;
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time Limits ===\n\
         - Log buffer size: {}\n\
         - Max events per source: {}\n\
         - Max message length: {}\n\
         - Warning level floor: {}\n\
         - Audit buffer size: {}\n\
         === User Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Expansion metrics: {}\n\
         - Cargo-style output: {}\n\
         - Include source context: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_FILE,
        MAX_LOG_MESSAGE_LENGTH,
        SECURITY_MIN_LOG_LEVEL,
        AUDIT_LOG_RETENTION_BUFFER,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.log_expansion_metrics,
        preferences.enable_cargo_style_output,
        preferences.include_source_context,
    )
}

/// Check if configuration is in development mode
pub fn is_development_mode() -> bool {
    cfg!(debug_assertions)
}

/// Check if configuration is in production mode
pub fn is_production_mode() -> bool {
    !cfg!(debug_assertions)
}

/// Get recommended configuration for development
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: RuntimeLogLevel::Debug,
        log_expansion_metrics: true,
        enable_cargo_style_output: true,
        include_source_context: true,
    }
}

/// Get recommended configuration for production
pub fn get_production_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: true,
        enable_console_logging: false,
        min_log_level: RuntimeLogLevel::Info,
        log_expansion_metrics: false,
        enable_cargo_style_output: false,
        include_source_context: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_warning_floor_enforced() {
        let floor = get_security_log_level();
        assert!(floor <= EventsLogLevel::Info);

        // With a floor of Warning or stricter, an Error-only preference is
        // promoted rather than honored.
        if SECURITY_MIN_LOG_LEVEL >= 1 {
            assert!(get_min_log_level() >= EventsLogLevel::Warning);
        }
    }

    #[test]
    fn test_compile_time_constants() {
        assert!(LOG_BUFFER_SIZE > 0);
        assert!(MAX_LOG_EVENTS_PER_FILE > 0);
        assert!(AUDIT_LOG_RETENTION_BUFFER > 0);
        assert!(SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_preference_factories() {
        let dev = get_development_preferences();
        assert!(dev.enable_console_logging);
        assert!(dev.enable_cargo_style_output);

        let prod = get_production_preferences();
        assert!(prod.use_structured_logging);
        assert!(!prod.enable_console_logging);
    }
}
