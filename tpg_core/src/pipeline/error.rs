use crate::document::DocumentError;
use crate::logging::{codes, Code};

/// Pipeline processing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("Document parsing failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Purpose template is {size} bytes which exceeds the {limit} byte limit")]
    TemplateTooLarge { size: usize, limit: usize },

    #[error("Expansion would emit {count} purposes (limit {limit})")]
    PurposeLimitExceeded { count: u64, limit: u64 },

    #[error("Generated output reached {size} bytes which exceeds the {limit} byte limit")]
    OutputLimitExceeded { size: u64, limit: u64 },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    /// Get error code for the global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::Document(inner) => inner.error_code(),
            Self::TemplateTooLarge { .. } => codes::generation::TEMPLATE_TOO_LARGE,
            Self::PurposeLimitExceeded { .. } => codes::generation::PURPOSE_LIMIT_EXCEEDED,
            Self::OutputLimitExceeded { .. } => codes::generation::OUTPUT_LIMIT_EXCEEDED,
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;

    #[test]
    fn test_document_errors_keep_their_code() {
        let error = PipelineError::from(DocumentError::MissingBlockEnd { span: Span::dummy() });
        assert_eq!(error.error_code().as_str(), "E037");
    }

    #[test]
    fn test_guard_error_codes() {
        let template = PipelineError::TemplateTooLarge { size: 10, limit: 5 };
        assert_eq!(template.error_code().as_str(), "E060");

        let purposes = PipelineError::PurposeLimitExceeded { count: 10, limit: 5 };
        assert_eq!(purposes.error_code().as_str(), "E061");

        let output = PipelineError::OutputLimitExceeded { size: 10, limit: 5 };
        assert_eq!(output.error_code().as_str(), "E062");
        assert!(output.requires_halt());
    }
}
