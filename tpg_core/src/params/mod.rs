//! Parameter line model and parser
//!
//! A purpose declaration consists of parameter lines. Each line is either a
//! COMMON literal, a SET of alternatives that cross-multiply during
//! expansion, or a RES set whose value is selected per generated purpose by
//! a repeat-weighted ordinal mapping instead of multiplying the product.

pub mod parser;

pub use parser::parse_line;

use crate::logging::codes::{self, Code};

// ============================================================================
// COMPONENTS
// ============================================================================

/// One alternative within a parameter line.
///
/// A literal stores its text verbatim (trimming happens at render time); an
/// interval is an inclusive integer range. The repeat weight only influences
/// RES line selection and defaults to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Literal { text: String, repeat: u32 },
    Interval { low: i64, high: i64, repeat: u32 },
}

impl Component {
    pub fn literal(text: impl Into<String>) -> Self {
        Component::Literal {
            text: text.into(),
            repeat: 1,
        }
    }

    pub fn interval(low: i64, high: i64) -> Self {
        Component::Interval {
            low,
            high,
            repeat: 1,
        }
    }

    pub fn repeat(&self) -> u32 {
        match self {
            Component::Literal { repeat, .. } => *repeat,
            Component::Interval { repeat, .. } => *repeat,
        }
    }

    pub fn set_repeat(&mut self, n: u32) {
        match self {
            Component::Literal { repeat, .. } => *repeat = n,
            Component::Interval { repeat, .. } => *repeat = n,
        }
    }

    /// How many concrete values this component contributes to the cartesian
    /// product. An inverted interval contributes nothing.
    pub fn span(&self) -> u64 {
        match self {
            Component::Literal { .. } => 1,
            Component::Interval { low, high, .. } => {
                if high < low {
                    0
                } else {
                    (high - low + 1) as u64
                }
            }
        }
    }

    pub fn is_interval(&self) -> bool {
        matches!(self, Component::Interval { .. })
    }
}

// ============================================================================
// LINES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Common,
    Set,
    Res,
}

/// One parsed parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLine {
    pub kind: LineKind,
    pub components: Vec<Component>,
}

impl ParamLine {
    /// A COMMON line holding the whole input text as its single value.
    pub fn common(text: impl Into<String>) -> Self {
        ParamLine {
            kind: LineKind::Common,
            components: vec![Component::literal(text)],
        }
    }

    pub fn is_res(&self) -> bool {
        self.kind == LineKind::Res
    }

    /// Sum of component spans, the line's contribution to the cartesian
    /// product when it is not a RES line.
    pub fn value_count(&self) -> u64 {
        self.components.iter().map(Component::span).sum()
    }
}

// ============================================================================
// PURPOSE
// ============================================================================

/// Ordered parameter lines of one purpose declaration. Line order equals
/// placeholder index order: line i feeds the `<%i%>` placeholder.
#[derive(Debug, Clone, Default)]
pub struct Purpose {
    pub lines: Vec<ParamLine>,
}

impl Purpose {
    pub fn new() -> Self {
        Purpose { lines: Vec::new() }
    }

    pub fn push_line(&mut self, line: ParamLine) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Expected number of generated purposes: the product over all non-RES
    /// lines of their value counts. RES lines never multiply.
    pub fn combination_count(&self) -> u64 {
        self.lines
            .iter()
            .filter(|line| !line.is_res())
            .fold(1u64, |acc, line| acc.saturating_mul(line.value_count()))
    }
}

// ============================================================================
// WARNINGS
// ============================================================================

/// Outcome of parsing one parameter line. Anything but `Ok` means the line
/// was degraded to COMMON holding its raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    Ok,
    SyntaxColon,
    InvalidIntervalToken,
    NumberTooLarge,
    MissingCloseBracket,
    LineTooLong,
}

impl Warning {
    pub fn is_ok(&self) -> bool {
        matches!(self, Warning::Ok)
    }

    pub fn code(&self) -> Option<Code> {
        match self {
            Warning::Ok => None,
            Warning::SyntaxColon => Some(codes::params::SYNTAX_COLON),
            Warning::InvalidIntervalToken => Some(codes::params::INVALID_INTERVAL_TOKEN),
            Warning::NumberTooLarge => Some(codes::params::NUMBER_TOO_LARGE),
            Warning::MissingCloseBracket => Some(codes::params::MISSING_CLOSE_BRACKET),
            Warning::LineTooLong => Some(codes::params::LINE_TOO_LONG),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Warning::Ok => "No warnings",
            Warning::SyntaxColon => "Syntax error near ':' token",
            Warning::InvalidIntervalToken => "Invalid token in interval (number is expected)",
            Warning::NumberTooLarge => "Too big number (exceeds MAX_INT)",
            Warning::MissingCloseBracket => "Close bracket is missing",
            Warning::LineTooLong => "Parameter line exceeds the maximum length",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_span() {
        assert_eq!(Component::literal("x").span(), 1);
        assert_eq!(Component::interval(1, 3).span(), 3);
        assert_eq!(Component::interval(5, 5).span(), 1);
        assert_eq!(Component::interval(3, 1).span(), 0);
    }

    #[test]
    fn test_combination_count_ignores_res() {
        let mut purpose = Purpose::new();
        purpose.push_line(ParamLine {
            kind: LineKind::Set,
            components: vec![Component::literal("a"), Component::literal("b")],
        });
        purpose.push_line(ParamLine {
            kind: LineKind::Res,
            components: vec![
                Component::literal("x"),
                Component::literal("y"),
                Component::literal("z"),
            ],
        });
        purpose.push_line(ParamLine {
            kind: LineKind::Set,
            components: vec![Component::interval(1, 2)],
        });

        assert_eq!(purpose.combination_count(), 4);
    }

    #[test]
    fn test_warning_codes_and_messages() {
        assert!(Warning::Ok.is_ok());
        assert!(Warning::Ok.code().is_none());
        assert_eq!(
            Warning::MissingCloseBracket.code().unwrap().as_str(),
            "W013"
        );
        assert_eq!(
            Warning::NumberTooLarge.message(),
            "Too big number (exceeds MAX_INT)"
        );
    }
}
