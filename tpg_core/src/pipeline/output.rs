use crate::document::Document;
use crate::params::Warning;
use std::time::Duration;

/// One degraded parameter line, attributed to its source line.
#[derive(Debug, Clone)]
pub struct LineWarning {
    pub line: u32,
    pub text: String,
    pub warning: Warning,
}

/// Summary statistics for one processed source.
#[derive(Debug, Clone, Default)]
pub struct GenerationStats {
    pub blocks: usize,
    pub purpose_sections: usize,
    pub parameter_lines: usize,
    pub purposes_emitted: u64,
    pub warning_count: usize,
    pub output_bytes: usize,
    pub processing_duration: Duration,
}

impl GenerationStats {
    /// Generated purposes per second, 0.0 for immeasurably fast runs.
    pub fn purposes_per_second(&self) -> f64 {
        let seconds = self.processing_duration.as_secs_f64();
        if seconds > 0.0 {
            self.purposes_emitted as f64 / seconds
        } else {
            0.0
        }
    }
}

/// Complete result of processing one source document.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Parsed document structure, sections verbatim.
    pub document: Document,
    /// Generated purpose bodies for all blocks, in document order.
    pub text: String,
    /// Total purposes emitted across all blocks.
    pub purpose_count: u64,
    /// Parameter lines that degraded to COMMON, with their warnings.
    pub warnings: Vec<LineWarning>,
    pub stats: GenerationStats,
}

impl GenerationOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn log_success(&self, source_name: &str) {
        crate::log_success!(
            crate::logging::codes::success::GENERATION_SUCCESS,
            "Source processing completed",
            "source" => source_name,
            "blocks" => self.stats.blocks,
            "purposes" => self.purpose_count,
            "warnings" => self.warnings.len(),
            "output_bytes" => self.text.len(),
            "duration_ms" => format!("{:.2}", self.stats.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
