//! Consolidated warning/error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification
//! functions. Parameter-line warnings, document structural errors and
//! generation guards all draw their codes from here.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Parameter line warning codes
///
/// These are warnings, never fatal: the offending line degrades to a plain
/// COMMON line and generation continues.
pub mod params {
    use super::Code;

    pub const SYNTAX_COLON: Code = Code::new("W010");
    pub const INVALID_INTERVAL_TOKEN: Code = Code::new("W011");
    pub const NUMBER_TOO_LARGE: Code = Code::new("W012");
    pub const MISSING_CLOSE_BRACKET: Code = Code::new("W013");
    pub const LINE_TOO_LONG: Code = Code::new("W014");
}

/// Document structure error codes
pub mod document {
    use super::Code;

    pub const UNKNOWN_TAG: Code = Code::new("E030");
    pub const UNCLOSED_SECTION: Code = Code::new("E031");
    pub const DUPLICATE_CODE_SECTION: Code = Code::new("E032");
    pub const DUPLICATE_DEFINE_SECTION: Code = Code::new("E033");
    pub const PURPOSE_BEFORE_CODE: Code = Code::new("E034");
    pub const MISSING_TARGETS: Code = Code::new("E035");
    pub const MALFORMED_ATTRIBUTE: Code = Code::new("E036");
    pub const MISSING_BLOCK_END: Code = Code::new("E037");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E038");
    pub const TOO_MANY_PURPOSE_LINES: Code = Code::new("E039");
    pub const MISSING_CODE_SECTION: Code = Code::new("E040");
}

/// Expansion/generation guard codes
pub mod generation {
    use super::Code;

    pub const TEMPLATE_TOO_LARGE: Code = Code::new("E060");
    pub const PURPOSE_LIMIT_EXCEEDED: Code = Code::new("E061");
    pub const OUTPUT_LIMIT_EXCEEDED: Code = Code::new("E062");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const LINE_PARSING_COMPLETE: Code = Code::new("I010");
    pub const EXPANSION_COMPLETE: Code = Code::new("I020");
    pub const DOCUMENT_PARSING_COMPLETE: Code = Code::new("I030");
    pub const GENERATION_SUCCESS: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
        );

        // Parameter line warnings
        registry.insert(
            "W010",
            ErrorMetadata::new(
                "W010",
                "ParameterLine",
                Severity::Low,
                true,
                false,
                "Syntax error near ':' token in a RES line repeat count",
                "Write the repeat count as a single run of digits after ':'",
            ),
        );
        registry.insert(
            "W011",
            ErrorMetadata::new(
                "W011",
                "ParameterLine",
                Severity::Low,
                true,
                false,
                "Invalid token in interval (number is expected)",
                "Use non-negative decimal bounds on both sides of '..'",
            ),
        );
        registry.insert(
            "W012",
            ErrorMetadata::new(
                "W012",
                "ParameterLine",
                Severity::Low,
                true,
                false,
                "Interval bound is too big (exceeds the supported digit count)",
                "Use interval bounds of at most five digits",
            ),
        );
        registry.insert(
            "W013",
            ErrorMetadata::new(
                "W013",
                "ParameterLine",
                Severity::Low,
                true,
                false,
                "Close bracket is missing on a SET/RES line",
                "Terminate the line with ')' or quote the literal text",
            ),
        );
        registry.insert(
            "W014",
            ErrorMetadata::new(
                "W014",
                "ParameterLine",
                Severity::Medium,
                true,
                false,
                "Parameter line exceeds the configured length limit",
                "Shorten the line or raise the params limit in the build profile",
            ),
        );

        // Document structure errors
        registry.insert(
            "E030",
            ErrorMetadata::new(
                "E030",
                "Document",
                Severity::Medium,
                false,
                false,
                "Unknown tag opened in the document",
                "Use one of the supported section tags",
            ),
        );
        registry.insert(
            "E031",
            ErrorMetadata::new(
                "E031",
                "Document",
                Severity::High,
                false,
                false,
                "Section opened but never closed",
                "Add the matching close tag before the end of the document",
            ),
        );
        registry.insert(
            "E032",
            ErrorMetadata::new(
                "E032",
                "Document",
                Severity::Medium,
                false,
                false,
                "More than one CODE section in a block",
                "Merge the CODE sections into one",
            ),
        );
        registry.insert(
            "E033",
            ErrorMetadata::new(
                "E033",
                "Document",
                Severity::Medium,
                false,
                false,
                "More than one DEFINE section in a block",
                "Merge the DEFINE sections into one",
            ),
        );
        registry.insert(
            "E034",
            ErrorMetadata::new(
                "E034",
                "Document",
                Severity::Medium,
                false,
                false,
                "PURPOSE section appears before the CODE section",
                "Move PURPOSE sections after the CODE section",
            ),
        );
        registry.insert(
            "E035",
            ErrorMetadata::new(
                "E035",
                "Document",
                Severity::Medium,
                false,
                false,
                "CODE section appears before the TARGETS section",
                "Declare TARGETS before CODE inside the block",
            ),
        );
        registry.insert(
            "E036",
            ErrorMetadata::new(
                "E036",
                "Document",
                Severity::Medium,
                false,
                false,
                "Malformed attribute in an open tag",
                "Write attributes as name = \"value\"",
            ),
        );
        registry.insert(
            "E037",
            ErrorMetadata::new(
                "E037",
                "Document",
                Severity::High,
                false,
                false,
                "End of document reached inside a BLOCK",
                "Close the block with </BLOCK>",
            ),
        );
        registry.insert(
            "E038",
            ErrorMetadata::new(
                "E038",
                "Document",
                Severity::High,
                false,
                true,
                "Input document exceeds the configured size limit",
                "Split the document or raise the document limit in the build profile",
            ),
        );
        registry.insert(
            "E039",
            ErrorMetadata::new(
                "E039",
                "Document",
                Severity::High,
                false,
                false,
                "PURPOSE section holds more parameter lines than supported",
                "Split the purpose or raise the params limit in the build profile",
            ),
        );

        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Document",
                Severity::Medium,
                false,
                false,
                "Block closed without a CODE section",
                "Add a CODE section to the block",
            ),
        );

        // Generation guards
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Generation",
                Severity::Medium,
                false,
                false,
                "Purpose template exceeds the configured size limit",
                "Shrink the template or raise the generation limit",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Generation",
                Severity::High,
                false,
                false,
                "Expansion would emit more purposes than the configured limit",
                "Reduce SET alternatives/interval widths or raise the limit",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Generation",
                Severity::High,
                false,
                true,
                "Generated output exceeds the configured size limit",
                "Reduce the expansion size or raise the output limit",
            ),
        );

        // Success codes surfaced through the same registry
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue normal operation",
            ),
        );
        registry.insert(
            "I030",
            ErrorMetadata::new(
                "I030",
                "Document",
                Severity::Low,
                true,
                false,
                "Document parsing completed successfully",
                "Continue to expansion",
            ),
        );
        registry.insert(
            "I040",
            ErrorMetadata::new(
                "I040",
                "Generation",
                Severity::Low,
                true,
                false,
                "Purpose generation completed successfully",
                "Collect the rendered output",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if the condition is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if the condition requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
