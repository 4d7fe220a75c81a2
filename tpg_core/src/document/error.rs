//! Document structure errors with global logging integration
//!
//! Section-nesting and block-policy violations, with error code mapping and
//! span-accurate reporting.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Structural errors raised while assembling a source document
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown tag <{name}> at {span}")]
    UnknownTag { name: String, span: Span },

    #[error("Section <{name}> opened at {span} but never closed")]
    UnclosedSection { name: String, span: Span },

    #[error("Duplicate CODE section at {span}")]
    DuplicateCodeSection { span: Span },

    #[error("Duplicate DEFINE section at {span}")]
    DuplicateDefineSection { span: Span },

    #[error("PURPOSE section at {span} appears before the CODE section")]
    PurposeBeforeCode { span: Span },

    #[error("CODE section at {span} appears before the TARGETS section")]
    CodeBeforeTargets { span: Span },

    #[error("Malformed attribute in tag <{tag}>: {message} at {span}")]
    MalformedAttribute {
        tag: String,
        message: String,
        span: Span,
    },

    #[error("End of document reached inside the block opened at {span}")]
    MissingBlockEnd { span: Span },

    #[error("Block opened at {span} closed without a CODE section")]
    MissingCodeSection { span: Span },

    #[error("Document is {size} bytes which exceeds the {limit} byte limit")]
    SourceTooLarge { size: usize, limit: usize },

    #[error("Document holds {count} blocks (limit {limit})")]
    TooManyBlocks { count: usize, limit: usize },

    #[error("PURPOSE section at {span} holds {count} parameter lines (limit {limit})")]
    TooManyPurposeLines {
        count: usize,
        limit: usize,
        span: Span,
    },

    #[error("Block opened at {span} holds {count} PURPOSE sections (limit {limit})")]
    TooManyPurposeSections {
        count: usize,
        limit: usize,
        span: Span,
    },
}

impl DocumentError {
    pub fn unknown_tag(name: &str, span: Span) -> Self {
        Self::UnknownTag {
            name: name.to_string(),
            span,
        }
    }

    pub fn unclosed_section(name: &str, span: Span) -> Self {
        Self::UnclosedSection {
            name: name.to_string(),
            span,
        }
    }

    pub fn malformed_attribute(tag: &str, message: &str, span: Span) -> Self {
        Self::MalformedAttribute {
            tag: tag.to_string(),
            message: message.to_string(),
            span,
        }
    }

    /// Get error code for the global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnknownTag { .. } => codes::document::UNKNOWN_TAG,
            Self::UnclosedSection { .. } => codes::document::UNCLOSED_SECTION,
            Self::DuplicateCodeSection { .. } => codes::document::DUPLICATE_CODE_SECTION,
            Self::DuplicateDefineSection { .. } => codes::document::DUPLICATE_DEFINE_SECTION,
            Self::PurposeBeforeCode { .. } => codes::document::PURPOSE_BEFORE_CODE,
            Self::CodeBeforeTargets { .. } => codes::document::MISSING_TARGETS,
            Self::MalformedAttribute { .. } => codes::document::MALFORMED_ATTRIBUTE,
            Self::MissingBlockEnd { .. } => codes::document::MISSING_BLOCK_END,
            Self::MissingCodeSection { .. } => codes::document::MISSING_CODE_SECTION,
            Self::SourceTooLarge { .. } => codes::document::SOURCE_TOO_LARGE,
            Self::TooManyBlocks { .. } => codes::document::SOURCE_TOO_LARGE,
            Self::TooManyPurposeLines { .. } => codes::document::TOO_MANY_PURPOSE_LINES,
            Self::TooManyPurposeSections { .. } => codes::document::TOO_MANY_PURPOSE_LINES,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnknownTag { span, .. }
            | Self::UnclosedSection { span, .. }
            | Self::DuplicateCodeSection { span }
            | Self::DuplicateDefineSection { span }
            | Self::PurposeBeforeCode { span }
            | Self::CodeBeforeTargets { span }
            | Self::MalformedAttribute { span, .. }
            | Self::MissingBlockEnd { span }
            | Self::MissingCodeSection { span }
            | Self::TooManyPurposeLines { span, .. }
            | Self::TooManyPurposeSections { span, .. } => Some(*span),
            Self::SourceTooLarge { .. } | Self::TooManyBlocks { .. } => None,
        }
    }

    /// Check if this error requires halting the whole run
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    fn span_at_line(line: u32) -> Span {
        Span::new(Position::new(0, line, 1), Position::new(0, line, 1))
    }

    #[test]
    fn test_error_code_mapping() {
        let span = span_at_line(3);

        assert_eq!(
            DocumentError::unknown_tag("WIDGET", span).error_code().as_str(),
            "E030"
        );
        assert_eq!(
            DocumentError::MissingBlockEnd { span }.error_code().as_str(),
            "E037"
        );
        assert_eq!(
            DocumentError::MissingCodeSection { span }.error_code().as_str(),
            "E040"
        );
        assert_eq!(
            DocumentError::SourceTooLarge { size: 10, limit: 5 }
                .error_code()
                .as_str(),
            "E038"
        );
    }

    #[test]
    fn test_span_extraction() {
        let span = span_at_line(7);
        let error = DocumentError::PurposeBeforeCode { span };
        assert_eq!(error.span(), Some(span));

        let no_span = DocumentError::SourceTooLarge { size: 10, limit: 5 };
        assert_eq!(no_span.span(), None);
    }

    #[test]
    fn test_halting_classification() {
        let span = span_at_line(1);
        assert!(DocumentError::SourceTooLarge { size: 10, limit: 5 }.requires_halt());
        assert!(!DocumentError::MissingBlockEnd { span }.requires_halt());
    }
}
