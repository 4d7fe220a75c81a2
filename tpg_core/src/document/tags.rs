//! Tag grammar for source documents
//!
//! A tag lives alone on its line. Open tags are `<NAME>` or
//! `<NAME attr = "value">`; close tags are `</NAME>`. Attribute values take
//! either double or single quotes. Anything after the closing `>` other than
//! whitespace disqualifies the line as a tag.

use crate::config::compile_time::document::{MAX_ATTRIBUTES_PER_TAG, MAX_TAG_NAME_LENGTH};
use crate::document::error::{DocumentError, DocumentResult};
use crate::utils::Span;

/// Top-level document sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopTag {
    Global,
    Startup,
    Cleanup,
    Block,
}

impl TopTag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "GLOBAL" => Some(TopTag::Global),
            "STARTUP" => Some(TopTag::Startup),
            "CLEANUP" => Some(TopTag::Cleanup),
            "BLOCK" => Some(TopTag::Block),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TopTag::Global => "GLOBAL",
            TopTag::Startup => "STARTUP",
            TopTag::Cleanup => "CLEANUP",
            TopTag::Block => "BLOCK",
        }
    }
}

/// Sections allowed inside a BLOCK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Targets,
    Define,
    Finally,
    Code,
    Purpose,
}

impl BlockTag {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TARGETS" => Some(BlockTag::Targets),
            "DEFINE" => Some(BlockTag::Define),
            "FINALLY" => Some(BlockTag::Finally),
            "CODE" => Some(BlockTag::Code),
            "PURPOSE" => Some(BlockTag::Purpose),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockTag::Targets => "TARGETS",
            BlockTag::Define => "DEFINE",
            BlockTag::Finally => "FINALLY",
            BlockTag::Code => "CODE",
            BlockTag::Purpose => "PURPOSE",
        }
    }
}

/// One `name = "value"` pair from an open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A parsed open tag with its attributes.
#[derive(Debug, Clone)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

impl OpenTag {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Try to read `line` as an open tag.
///
/// Returns `Ok(None)` when the line is not an open tag at all (no leading
/// `<`, a close tag, a missing `>`, or trailing text after `>`). Returns an
/// error only for a recognizable tag whose attribute list is malformed.
pub fn parse_open_tag(line: &str, line_number: u32) -> DocumentResult<Option<OpenTag>> {
    let span = Span::whole_line(line_number, line.len());
    let trimmed = line.trim();
    let mut rest = match trimmed.strip_prefix('<') {
        Some(rest) => rest,
        None => return Ok(None),
    };
    if rest.starts_with('/') {
        return Ok(None);
    }

    let name_len = rest.chars().take_while(|&ch| is_name_char(ch)).count();
    if name_len == 0 || name_len > MAX_TAG_NAME_LENGTH {
        return Ok(None);
    }
    let name: String = rest.chars().take(name_len).collect();
    rest = &rest[name_len..];

    let mut attributes = Vec::new();
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('>') {
            if !after.trim().is_empty() {
                return Ok(None);
            }
            return Ok(Some(OpenTag {
                name,
                attributes,
                span,
            }));
        }
        if rest.is_empty() {
            return Ok(None);
        }
        if attributes.len() == MAX_ATTRIBUTES_PER_TAG {
            return Err(DocumentError::malformed_attribute(
                &name,
                "too many attributes",
                span,
            ));
        }

        let attr_len = rest.chars().take_while(|&ch| is_name_char(ch)).count();
        if attr_len == 0 {
            return Err(DocumentError::malformed_attribute(
                &name,
                "expected an attribute name",
                span,
            ));
        }
        let attr_name: String = rest.chars().take(attr_len).collect();
        rest = rest[attr_len..].trim_start();

        rest = match rest.strip_prefix('=') {
            Some(rest) => rest.trim_start(),
            None => {
                return Err(DocumentError::malformed_attribute(
                    &name,
                    "expected '=' after the attribute name",
                    span,
                ));
            }
        };

        let quote = match rest.chars().next() {
            Some(ch @ ('"' | '\'')) => ch,
            _ => {
                return Err(DocumentError::malformed_attribute(
                    &name,
                    "attribute value must be quoted",
                    span,
                ));
            }
        };
        rest = &rest[1..];
        let value_len = match rest.find(quote) {
            Some(len) => len,
            None => {
                return Err(DocumentError::malformed_attribute(
                    &name,
                    "unterminated attribute value",
                    span,
                ));
            }
        };
        attributes.push(Attribute {
            name: attr_name,
            value: rest[..value_len].to_string(),
        });
        rest = &rest[value_len + 1..];
    }
}

/// Try to read `line` as a close tag, returning the closed name.
pub fn parse_close_tag(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix("</")?;
    let name_len = rest.chars().take_while(|&ch| is_name_char(ch)).count();
    if name_len == 0 {
        return None;
    }
    let after = rest[name_len..].strip_prefix('>')?;
    if !after.trim().is_empty() {
        return None;
    }
    Some(&rest[..name_len])
}

/// Check whether `line` closes the section named `name`.
pub fn is_close_tag_for(line: &str, name: &str) -> bool {
    parse_close_tag(line) == Some(name)
}
