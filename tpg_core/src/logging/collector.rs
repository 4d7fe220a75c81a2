//! Warning/error collector for document processing with cargo-style output
//!
//! Groups events by source document so the caller can report every parameter
//! warning and structural error against the line that produced it.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// SOURCE PROCESSING CONTEXT
// ============================================================================

/// Context information for one source document being processed
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub source_name: PathBuf,
    pub source_id: usize,
    pub start_time: Instant,
}

impl SourceContext {
    pub fn new(source_name: PathBuf, source_id: usize) -> Self {
        Self {
            source_name,
            source_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of processing results across all sources
#[derive(Debug, Clone)]
pub struct ProcessingSummary {
    pub total_sources: usize,
    pub successful_sources: usize,
    pub failed_sources: usize,
    pub sources_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn new() -> Self {
        Self {
            total_sources: 0,
            successful_sources: 0,
            failed_sources: 0,
            sources_with_warnings: 0,
            total_errors: 0,
            total_warnings: 0,
            total_processing_time: Duration::new(0, 0),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

impl Default for ProcessingSummary {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe event collector keyed by source document
pub struct ErrorCollector {
    /// Events organized by source name for cargo-style output
    source_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,

    /// Processing contexts for timing information
    source_contexts: Mutex<BTreeMap<PathBuf, SourceContext>>,

    /// Global processing start time
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            source_events: Mutex::new(BTreeMap::new()),
            source_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific source
    pub fn record_event(&self, source: &Path, event: LogEvent) {
        let mut events = self.source_events.lock().unwrap();

        let max_events_per_source = MAX_LOG_EVENTS_PER_FILE;

        let source_events = events.entry(source.to_path_buf()).or_insert_with(Vec::new);

        if source_events.len() < max_events_per_source {
            source_events.push(event);
        } else if source_events.len() == max_events_per_source {
            let summary_event = LogEvent::warning(&format!(
                "Too many events for source (limit: {})",
                max_events_per_source
            ));
            source_events.push(summary_event);
        }
    }

    /// Record source processing context
    pub fn record_source_context(&self, context: SourceContext) {
        let mut contexts = self.source_contexts.lock().unwrap();
        contexts.insert(context.source_name.clone(), context);
    }

    /// Get all events for a specific source
    pub fn get_source_events(&self, source: &Path) -> Vec<LogEvent> {
        let events = self.source_events.lock().unwrap();
        events.get(source).cloned().unwrap_or_default()
    }

    /// Get errors for a specific source
    pub fn get_source_errors(&self, source: &Path) -> Vec<LogEvent> {
        let events = self.source_events.lock().unwrap();
        events
            .get(source)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    /// Get warnings for a specific source
    pub fn get_source_warnings(&self, source: &Path) -> Vec<LogEvent> {
        let events = self.source_events.lock().unwrap();
        events
            .get(source)
            .map(|events| events.iter().filter(|e| e.is_warning()).cloned().collect())
            .unwrap_or_default()
    }

    /// Get all events (for cargo-style output)
    pub fn get_all_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.source_events.lock().unwrap().clone()
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.source_events.lock().unwrap();

        let mut summary = ProcessingSummary::new();
        summary.total_sources = events.len();
        summary.total_processing_time = self.processing_start.elapsed();

        for source_events in events.values() {
            let has_errors = source_events.iter().any(|e| e.is_error());
            let has_warnings = source_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_sources += 1;
            } else if has_warnings {
                summary.sources_with_warnings += 1;
            } else {
                summary.successful_sources += 1;
            }

            for event in source_events {
                if event.is_error() {
                    summary.total_errors += 1;
                } else if event.is_warning() {
                    summary.total_warnings += 1;
                }
            }
        }

        summary
    }

    /// Get error count for a specific source
    pub fn get_source_error_count(&self, source: &Path) -> usize {
        let events = self.source_events.lock().unwrap();
        events
            .get(source)
            .map(|events| events.iter().filter(|e| e.is_error()).count())
            .unwrap_or(0)
    }

    /// Get warning count for a specific source
    pub fn get_source_warning_count(&self, source: &Path) -> usize {
        let events = self.source_events.lock().unwrap();
        events
            .get(source)
            .map(|events| events.iter().filter(|e| e.is_warning()).count())
            .unwrap_or(0)
    }

    /// Check if a source has any errors
    pub fn source_has_errors(&self, source: &Path) -> bool {
        self.get_source_error_count(source) > 0
    }

    /// Check if a source has any warnings
    pub fn source_has_warnings(&self, source: &Path) -> bool {
        self.get_source_warning_count(source) > 0
    }

    /// Get critical errors (errors that require halting)
    pub fn get_critical_errors(&self) -> Vec<(PathBuf, LogEvent)> {
        let events = self.source_events.lock().unwrap();
        let mut critical_errors = Vec::new();

        for (path, source_events) in events.iter() {
            for event in source_events {
                if event.is_error() && event.requires_halt() {
                    critical_errors.push((path.clone(), event.clone()));
                }
            }
        }

        critical_errors
    }

    /// Clear all collected data
    pub fn clear(&self) {
        let mut events = self.source_events.lock().unwrap();
        let mut contexts = self.source_contexts.lock().unwrap();
        events.clear();
        contexts.clear();
    }

    /// Get total event count across all sources
    pub fn total_event_count(&self) -> usize {
        let events = self.source_events.lock().unwrap();
        events.values().map(|v| v.len()).sum()
    }

    /// Get capacity information (using compile-time constants)
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        let max = LOG_BUFFER_SIZE;
        let percentage = if max > 0 {
            current as f64 / max as f64
        } else {
            0.0
        };
        (current, max, percentage)
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format errors in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();
    let all_events = collector.get_all_events();

    for (source, events) in &all_events {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if !error_events.is_empty() || !warning_events.is_empty() {
            output.push_str(&format!("Checking {}...\n", source.display()));

            for event in error_events {
                let span_info = event
                    .span
                    .as_ref()
                    .map(|s| {
                        format!(
                            " --> {}:{}:{}",
                            source.display(),
                            s.start().line,
                            s.start().column
                        )
                    })
                    .unwrap_or_default();

                output.push_str(&format!(
                    "error[{}]: {}{}\n",
                    event.code.as_str(),
                    event.message,
                    span_info
                ));

                output.push_str(&format!(
                    "  = severity: {}, category: {}\n",
                    event.severity(),
                    event.category()
                ));

                if !event.context.is_empty() {
                    output.push_str("  |\n");
                    for (key, value) in &event.context {
                        if key != "source" && key != "source_id" {
                            output.push_str(&format!("  = {}: {}\n", key, value));
                        }
                    }
                }

                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }

            for event in warning_events {
                let span_info = event
                    .span
                    .as_ref()
                    .map(|s| {
                        format!(
                            " --> {}:{}:{}",
                            source.display(),
                            s.start().line,
                            s.start().column
                        )
                    })
                    .unwrap_or_default();

                output.push_str(&format!(
                    "warning[{}]: {}{}\n",
                    event.code.as_str(),
                    event.message,
                    span_info
                ));

                if !event.context.is_empty() {
                    for (key, value) in &event.context {
                        if key != "source" && key != "source_id" {
                            output.push_str(&format!("  = {}: {}\n", key, value));
                        }
                    }
                }
            }

            output.push('\n');
        }
    }

    let summary = collector.get_summary();

    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Span;
    use std::path::PathBuf;

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();

        let source = PathBuf::from("suite.tpg");
        let event = LogEvent::error(codes::document::UNKNOWN_TAG, "Test error");

        collector.record_event(&source, event);

        let events = collector.get_source_events(&source);
        assert_eq!(events.len(), 1);
        assert!(collector.source_has_errors(&source));
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();

        let source1 = PathBuf::from("a.tpg");
        let source2 = PathBuf::from("b.tpg");

        collector.record_event(
            &source1,
            LogEvent::error(codes::document::MISSING_BLOCK_END, "Error"),
        );
        collector.record_event(
            &source2,
            LogEvent::warning_with_code(codes::params::SYNTAX_COLON, "Warning"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_sources, 2);
        assert_eq!(summary.failed_sources, 1);
        assert_eq!(summary.sources_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_critical_errors() {
        let collector = ErrorCollector::new();

        let source = PathBuf::from("suite.tpg");
        let critical_event = LogEvent::error(codes::system::INTERNAL_ERROR, "Critical error");
        let normal_event = LogEvent::error(codes::document::UNKNOWN_TAG, "Normal error");

        collector.record_event(&source, critical_event);
        collector.record_event(&source, normal_event);

        let critical_errors = collector.get_critical_errors();
        assert_eq!(critical_errors.len(), 1);
        assert_eq!(critical_errors[0].1.code.as_str(), "ERR001");
    }

    #[test]
    fn test_cargo_style_output_includes_line() {
        let collector = ErrorCollector::new();
        let source = PathBuf::from("suite.tpg");

        let span = Span::whole_line(7, 8);
        collector.record_event(
            &source,
            LogEvent::warning_with_code(
                codes::params::MISSING_CLOSE_BRACKET,
                "Close bracket is missing",
            )
            .with_span(span),
        );

        let report = format_cargo_style_errors(&collector);
        assert!(report.contains("warning[W013]"));
        assert!(report.contains("suite.tpg:7:1"));
    }

    #[test]
    fn test_capacity_info() {
        let collector = ErrorCollector::new();
        let (current, max, _) = collector.get_capacity_info();
        assert_eq!(current, 0);
        assert_eq!(max, LOG_BUFFER_SIZE);
    }
}
