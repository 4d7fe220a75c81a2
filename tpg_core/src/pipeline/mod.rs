//! End-to-end processing: document parse -> parameter parsing -> expansion
//!
//! The purpose number base runs across every PURPOSE section of every block,
//! so generated purposes are numbered consecutively through the whole source.

mod error;
mod output;

pub use error::PipelineError;
pub use output::{GenerationOutput, GenerationStats, LineWarning};

use crate::config::compile_time::generation::{
    MAX_OUTPUT_SIZE, MAX_PURPOSES_PER_BLOCK, MAX_TEMPLATE_SIZE,
};
use crate::document::{block_template, parse_document, Block, PurposeSection};
use crate::expand::generate;
use crate::logging::{self, codes};
use crate::params::parser::parse_line;
use crate::params::Purpose;
use crate::utils::Span;
use std::path::PathBuf;
use std::time::Instant;

/// Process a single in-memory source through the complete pipeline
/// (document -> parameter lines -> cartesian expansion).
pub fn process_source(
    name: &str,
    source: &str,
    purpose_template: &str,
) -> Result<GenerationOutput, PipelineError> {
    let start_time = Instant::now();

    logging::with_source_context(PathBuf::from(name), 0, || {
        crate::log_info!("Starting source processing",
            "source" => name,
            "bytes" => source.len()
        );

        if purpose_template.len() > MAX_TEMPLATE_SIZE {
            let error = PipelineError::TemplateTooLarge {
                size: purpose_template.len(),
                limit: MAX_TEMPLATE_SIZE,
            };
            crate::log_error!(error.error_code(), "Purpose template rejected",
                "bytes" => purpose_template.len()
            );
            return Err(error);
        }

        let document = parse_document(source).map_err(|error| {
            match error.span() {
                Some(span) => {
                    crate::log_error!(error.error_code(), "Document parsing failed", span = span,
                        "detail" => error
                    );
                }
                None => {
                    crate::log_error!(error.error_code(), "Document parsing failed",
                        "detail" => error
                    );
                }
            }
            PipelineError::from(error)
        })?;

        crate::log_success!(
            codes::success::DOCUMENT_PARSING_COMPLETE,
            "Document parsed",
            "blocks" => document.block_count()
        );

        let mut text = String::new();
        let mut warnings = Vec::new();
        let mut stats = GenerationStats {
            blocks: document.block_count(),
            ..GenerationStats::default()
        };
        let mut purpose_count: u64 = 0;

        for block in &document.blocks {
            purpose_count = expand_block(
                block,
                purpose_template,
                purpose_count,
                &mut text,
                &mut warnings,
                &mut stats,
            )?;
        }

        stats.purposes_emitted = purpose_count;
        stats.warning_count = warnings.len();
        stats.output_bytes = text.len();
        stats.processing_duration = start_time.elapsed();

        let result = GenerationOutput {
            document,
            text,
            purpose_count,
            warnings,
            stats,
        };
        result.log_success(name);
        Ok(result)
    })
}

fn expand_block(
    block: &Block,
    purpose_template: &str,
    base: u64,
    text: &mut String,
    warnings: &mut Vec<LineWarning>,
    stats: &mut GenerationStats,
) -> Result<u64, PipelineError> {
    let template = block_template(block, purpose_template);
    let mut purpose_count = base;
    let mut block_emitted: u64 = 0;

    // A block without PURPOSE sections still emits one purpose, rendered
    // from an empty parameter list.
    let empty_section;
    let sections: &[PurposeSection] = if block.has_purposes() {
        &block.purposes
    } else {
        empty_section = [PurposeSection::new(block.span)];
        &empty_section
    };

    for section in sections {
        stats.purpose_sections += usize::from(block.has_purposes());
        let purpose = parse_purpose_section(section, warnings, stats);

        let combinations = purpose.combination_count();
        if block_emitted.saturating_add(combinations) > MAX_PURPOSES_PER_BLOCK {
            let error = PipelineError::PurposeLimitExceeded {
                count: block_emitted.saturating_add(combinations),
                limit: MAX_PURPOSES_PER_BLOCK,
            };
            crate::log_error!(error.error_code(), "Expansion rejected", span = section.span,
                "combinations" => combinations
            );
            return Err(error);
        }

        let expansion = generate(&purpose, &template, &block.finally, purpose_count);
        purpose_count += expansion.count;
        block_emitted += expansion.count;
        text.push_str(&expansion.text);

        if text.len() as u64 > MAX_OUTPUT_SIZE {
            let error = PipelineError::OutputLimitExceeded {
                size: text.len() as u64,
                limit: MAX_OUTPUT_SIZE,
            };
            crate::log_error!(error.error_code(), "Generated output rejected");
            return Err(error);
        }
    }

    crate::log_debug!("Block expanded",
        "purposes" => block_emitted,
        "targets" => block.targets.len()
    );
    Ok(purpose_count)
}

/// Parse the raw lines of one PURPOSE section, logging and collecting the
/// warnings of degraded lines.
fn parse_purpose_section(
    section: &PurposeSection,
    warnings: &mut Vec<LineWarning>,
    stats: &mut GenerationStats,
) -> Purpose {
    let mut purpose = Purpose::new();
    for (number, raw) in &section.lines {
        stats.parameter_lines += 1;
        let (line, warning) = parse_line(raw);
        if let Some(code) = warning.code() {
            crate::log_warning!(code, warning.message(),
                span = Span::whole_line(*number, raw.len()),
                "text" => raw.trim()
            );
            warnings.push(LineWarning {
                line: *number,
                text: raw.trim().to_string(),
                warning,
            });
        }
        purpose.push_line(line);
    }
    purpose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Warning;
    use assert_matches::assert_matches;

    const TEMPLATE: &str = "TP<%purpose_number%>[<%0%>]{<%finally%>}\n";

    fn source_with_purpose(purpose_lines: &str) -> String {
        format!(
            "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<FINALLY>\n</FINALLY>\n<CODE>\nx;\n</CODE>\n<PURPOSE>\n{}\n</PURPOSE>\n</BLOCK>\n",
            purpose_lines
        )
    }

    #[test]
    fn test_single_block_expansion() {
        let source = source_with_purpose("SET(a;b)");
        let output = process_source("demo.tpg", &source, TEMPLATE).unwrap();
        assert_eq!(output.purpose_count, 2);
        assert_eq!(output.text, "TP1[a]{}\nTP2[b]{}\n");
        assert!(!output.has_warnings());
        assert_eq!(output.stats.blocks, 1);
        assert_eq!(output.stats.parameter_lines, 1);
    }

    #[test]
    fn test_purpose_numbers_run_across_blocks() {
        let block = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\nx;\n</CODE>\n<PURPOSE>\nSET(1..2)\n</PURPOSE>\n</BLOCK>\n";
        let source = format!("{}{}", block, block);
        let output = process_source("demo.tpg", &source, "#<%purpose_number%> ").unwrap();
        assert_eq!(output.purpose_count, 4);
        assert_eq!(output.text, "#1 #2 #3 #4 ");
    }

    #[test]
    fn test_block_without_purpose_emits_one() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\nx;\n</CODE>\n</BLOCK>\n";
        let output = process_source("demo.tpg", source, "<%params%>#<%purpose_number%>\n").unwrap();
        assert_eq!(output.purpose_count, 1);
        assert_eq!(output.text, "//    none\n#1\n");
    }

    #[test]
    fn test_degraded_line_surfaces_warning() {
        let source = source_with_purpose("SET(a;b");
        let output = process_source("demo.tpg", &source, "[<%0%>]").unwrap();
        assert_eq!(output.purpose_count, 1);
        assert_eq!(output.text, "[SET(a;b]");
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].warning, Warning::MissingCloseBracket);
        assert_eq!(output.warnings[0].line, 11);
    }

    #[test]
    fn test_finally_code_reaches_every_purpose() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<FINALLY>\nclose(fd);\n</FINALLY>\n<CODE>\nx;\n</CODE>\n<PURPOSE>\nSET(a;b)\n</PURPOSE>\n</BLOCK>\n";
        let output = process_source("demo.tpg", source, "{<%finally%>}").unwrap();
        assert_eq!(output.text, "{close(fd);\n}{close(fd);\n}");
    }

    #[test]
    fn test_block_placeholders_filled_once_per_block() {
        let source = "<BLOCK>\n<TARGETS>\nopen\n</TARGETS>\n<DEFINE>\n#define N 1\n</DEFINE>\n<CODE>\ncall();\n</CODE>\n<PURPOSE>\nSET(a)\n</PURPOSE>\n</BLOCK>\n";
        let template = "<%comment%>\n<%define%><%code%><%undef%>";
        let output = process_source("demo.tpg", source, template).unwrap();
        assert!(output.text.contains("//    open\n"));
        assert!(output.text.contains("//    a\n"));
        assert!(output.text.contains("#define N 1\n"));
        assert!(output.text.contains("call();\n"));
        assert!(output.text.contains("#undef N\n"));
    }

    #[test]
    fn test_document_error_propagates() {
        let result = process_source("demo.tpg", "<BLOCK>\n", TEMPLATE);
        assert_matches!(result, Err(PipelineError::Document(_)));
    }

    #[test]
    fn test_res_resolution_in_full_pipeline() {
        let source = source_with_purpose("SET(1..3)\nRES(lo:2;hi:1)");
        let output = process_source("demo.tpg", &source, "<%0%>=<%1%>;").unwrap();
        assert_eq!(output.text, "1=lo;2=lo;3=hi;");
    }
}
