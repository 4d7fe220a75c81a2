//! Document model produced by source parsing

use crate::utils::Span;

/// One PURPOSE section: the raw parameter lines with their source line
/// numbers, unparsed.
#[derive(Debug, Clone, Default)]
pub struct PurposeSection {
    pub lines: Vec<(u32, String)>,
    pub span: Span,
}

impl PurposeSection {
    pub fn new(span: Span) -> Self {
        Self {
            lines: Vec::new(),
            span,
        }
    }
}

/// One BLOCK of the document.
#[derive(Debug, Clone)]
pub struct Block {
    /// Value of the parentControlFunction attribute, "NULL" when absent.
    pub parent_control_function: String,
    /// Interface names collected from the TARGETS section.
    pub targets: Vec<String>,
    /// Verbatim DEFINE section body.
    pub define: String,
    /// Verbatim FINALLY section body.
    pub finally: String,
    /// Verbatim CODE section body.
    pub code: String,
    /// PURPOSE sections in document order.
    pub purposes: Vec<PurposeSection>,
    /// Span of the opening BLOCK tag.
    pub span: Span,
}

impl Block {
    pub fn new(parent_control_function: String, span: Span) -> Self {
        Self {
            parent_control_function,
            targets: Vec::new(),
            define: String::new(),
            finally: String::new(),
            code: String::new(),
            purposes: Vec::new(),
            span,
        }
    }

    /// Blocks without a PURPOSE section still emit one generated purpose.
    pub fn has_purposes(&self) -> bool {
        !self.purposes.is_empty()
    }
}

/// A fully parsed source document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Accumulated GLOBAL section bodies.
    pub global: String,
    /// Accumulated STARTUP section bodies.
    pub startup: String,
    /// Accumulated CLEANUP section bodies.
    pub cleanup: String,
    /// Blocks in document order.
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
