//! Source document parser
//!
//! Assembles the tag-delimited sections of a document into a [`Document`].
//! Only structure is handled here; parameter lines inside PURPOSE sections
//! stay raw and are parsed during generation.

use crate::config::compile_time::document::{
    MAX_BLOCKS_PER_SOURCE, MAX_PURPOSES_PER_BLOCK_SECTION, MAX_SOURCE_SIZE,
};
use crate::config::compile_time::params::MAX_PURPOSE_LINES;
use crate::document::error::{DocumentError, DocumentResult};
use crate::document::reader::LineReader;
use crate::document::tags::{is_close_tag_for, parse_open_tag, BlockTag, TopTag};
use crate::document::types::{Block, Document, PurposeSection};
use crate::utils::{is_blank, Span};

/// Default control function name when the BLOCK tag carries no attribute.
pub const DEFAULT_PARENT_CONTROL_FUNCTION: &str = "NULL";

/// Attribute naming the control function a block's purposes attach to.
pub const PARENT_CONTROL_FUNCTION_ATTR: &str = "parentControlFunction";

/// Parse a whole source document.
pub fn parse_document(source: &str) -> DocumentResult<Document> {
    if source.len() as u64 > MAX_SOURCE_SIZE {
        return Err(DocumentError::SourceTooLarge {
            size: source.len(),
            limit: MAX_SOURCE_SIZE as usize,
        });
    }

    let mut document = Document::default();
    let mut reader = LineReader::new(source);
    while let Some((number, line)) = reader.next() {
        if is_blank(line) {
            continue;
        }
        let span = Span::whole_line(number, line.len());
        let tag = parse_open_tag(line, number)?
            .ok_or_else(|| DocumentError::unknown_tag(line.trim(), span))?;
        let top =
            TopTag::from_name(&tag.name).ok_or_else(|| DocumentError::unknown_tag(&tag.name, span))?;

        match top {
            TopTag::Global => {
                let body = read_section_body(&mut reader, TopTag::Global.name(), span)?;
                document.global.push_str(&body);
            }
            TopTag::Startup => {
                let body = read_section_body(&mut reader, TopTag::Startup.name(), span)?;
                document.startup.push_str(&body);
            }
            TopTag::Cleanup => {
                let body = read_section_body(&mut reader, TopTag::Cleanup.name(), span)?;
                document.cleanup.push_str(&body);
            }
            TopTag::Block => {
                if document.blocks.len() == MAX_BLOCKS_PER_SOURCE {
                    return Err(DocumentError::TooManyBlocks {
                        count: document.blocks.len() + 1,
                        limit: MAX_BLOCKS_PER_SOURCE,
                    });
                }
                let parent = tag
                    .attribute(PARENT_CONTROL_FUNCTION_ATTR)
                    .unwrap_or(DEFAULT_PARENT_CONTROL_FUNCTION)
                    .to_string();
                document.blocks.push(parse_block(&mut reader, parent, span)?);
            }
        }
    }
    Ok(document)
}

/// Accumulate a section body verbatim until its close tag.
fn read_section_body(
    reader: &mut LineReader<'_>,
    name: &str,
    open_span: Span,
) -> DocumentResult<String> {
    let mut body = String::new();
    for (_, line) in reader.by_ref() {
        if is_close_tag_for(line, name) {
            return Ok(body);
        }
        body.push_str(line);
        body.push('\n');
    }
    Err(DocumentError::unclosed_section(name, open_span))
}

fn parse_block(
    reader: &mut LineReader<'_>,
    parent_control_function: String,
    block_span: Span,
) -> DocumentResult<Block> {
    let mut block = Block::new(parent_control_function, block_span);
    let mut seen_targets = false;
    let mut seen_define = false;
    let mut seen_code = false;

    while let Some((number, line)) = reader.next() {
        if is_blank(line) {
            continue;
        }
        if is_close_tag_for(line, TopTag::Block.name()) {
            if !seen_code {
                return Err(DocumentError::MissingCodeSection { span: block_span });
            }
            return Ok(block);
        }

        let span = Span::whole_line(number, line.len());
        let tag = parse_open_tag(line, number)?
            .ok_or_else(|| DocumentError::unknown_tag(line.trim(), span))?;
        let section = BlockTag::from_name(&tag.name)
            .ok_or_else(|| DocumentError::unknown_tag(&tag.name, span))?;

        match section {
            BlockTag::Targets => {
                let body = read_section_body(reader, BlockTag::Targets.name(), span)?;
                block
                    .targets
                    .extend(body.split_whitespace().map(String::from));
                seen_targets = true;
            }
            BlockTag::Define => {
                if seen_define {
                    return Err(DocumentError::DuplicateDefineSection { span });
                }
                seen_define = true;
                block.define = read_section_body(reader, BlockTag::Define.name(), span)?;
            }
            BlockTag::Finally => {
                let body = read_section_body(reader, BlockTag::Finally.name(), span)?;
                block.finally.push_str(&body);
            }
            BlockTag::Code => {
                if seen_code {
                    return Err(DocumentError::DuplicateCodeSection { span });
                }
                if !seen_targets {
                    return Err(DocumentError::CodeBeforeTargets { span });
                }
                seen_code = true;
                block.code = read_section_body(reader, BlockTag::Code.name(), span)?;
            }
            BlockTag::Purpose => {
                if !seen_code {
                    return Err(DocumentError::PurposeBeforeCode { span });
                }
                if block.purposes.len() == MAX_PURPOSES_PER_BLOCK_SECTION {
                    return Err(DocumentError::TooManyPurposeSections {
                        count: block.purposes.len() + 1,
                        limit: MAX_PURPOSES_PER_BLOCK_SECTION,
                        span,
                    });
                }
                block.purposes.push(read_purpose_section(reader, span)?);
            }
        }
    }
    Err(DocumentError::MissingBlockEnd { span: block_span })
}

/// Collect the raw parameter lines of one PURPOSE section.
fn read_purpose_section(
    reader: &mut LineReader<'_>,
    open_span: Span,
) -> DocumentResult<PurposeSection> {
    let mut section = PurposeSection::new(open_span);
    for (number, line) in reader.by_ref() {
        if is_close_tag_for(line, BlockTag::Purpose.name()) {
            return Ok(section);
        }
        if is_blank(line) {
            continue;
        }
        if section.lines.len() == MAX_PURPOSE_LINES {
            return Err(DocumentError::TooManyPurposeLines {
                count: section.lines.len() + 1,
                limit: MAX_PURPOSE_LINES,
                span: open_span,
            });
        }
        section.lines.push((number, line.to_string()));
    }
    Err(DocumentError::unclosed_section(
        BlockTag::Purpose.name(),
        open_span,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE: &str = "\
<GLOBAL>
#include <unistd.h>
</GLOBAL>

<BLOCK parentControlFunction = \"tet_main\">
<TARGETS>
    getpid
    getppid
</TARGETS>
<DEFINE>
#define RETRIES 3
</DEFINE>
<FINALLY>
    close(fd);
</FINALLY>
<CODE>
    pid_t pid = getpid();
</CODE>
<PURPOSE>
SET(1..2)
# a comment inside the purpose
RES(ok;fail)
</PURPOSE>
</BLOCK>
";

    #[test]
    fn test_full_document_structure() {
        let document = parse_document(SAMPLE).unwrap();
        assert_eq!(document.global, "#include <unistd.h>\n");
        assert!(document.startup.is_empty());
        assert_eq!(document.block_count(), 1);

        let block = &document.blocks[0];
        assert_eq!(block.parent_control_function, "tet_main");
        assert_eq!(block.targets, vec!["getpid", "getppid"]);
        assert_eq!(block.define, "#define RETRIES 3\n");
        assert_eq!(block.finally, "    close(fd);\n");
        assert_eq!(block.code, "    pid_t pid = getpid();\n");
        assert_eq!(block.purposes.len(), 1);
        assert_eq!(
            block.purposes[0].lines,
            vec![(20, "SET(1..2)".to_string()), (22, "RES(ok;fail)".to_string())]
        );
    }

    #[test]
    fn test_block_without_attribute_defaults_to_null() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\nx;\n</CODE>\n</BLOCK>\n";
        let document = parse_document(source).unwrap();
        assert_eq!(document.blocks[0].parent_control_function, "NULL");
    }

    #[test]
    fn test_repeated_global_sections_accumulate() {
        let source = "<GLOBAL>\na\n</GLOBAL>\n<GLOBAL>\nb\n</GLOBAL>\n";
        let document = parse_document(source).unwrap();
        assert_eq!(document.global, "a\nb\n");
    }

    #[test]
    fn test_unknown_top_level_tag() {
        assert_matches!(
            parse_document("<WIDGET>\n</WIDGET>\n"),
            Err(DocumentError::UnknownTag { .. })
        );
        assert_matches!(
            parse_document("stray text\n"),
            Err(DocumentError::UnknownTag { .. })
        );
    }

    #[test]
    fn test_unclosed_top_section() {
        assert_matches!(
            parse_document("<GLOBAL>\nint x;\n"),
            Err(DocumentError::UnclosedSection { .. })
        );
    }

    #[test]
    fn test_code_requires_targets_first() {
        let source = "<BLOCK>\n<CODE>\nx;\n</CODE>\n</BLOCK>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::CodeBeforeTargets { .. })
        );
    }

    #[test]
    fn test_purpose_requires_code_first() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<PURPOSE>\nSET(a)\n</PURPOSE>\n</BLOCK>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::PurposeBeforeCode { .. })
        );
    }

    #[test]
    fn test_duplicate_code_section() {
        let source =
            "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\na;\n</CODE>\n<CODE>\nb;\n</CODE>\n</BLOCK>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::DuplicateCodeSection { .. })
        );
    }

    #[test]
    fn test_duplicate_define_section() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<DEFINE>\n</DEFINE>\n<DEFINE>\n</DEFINE>\n<CODE>\nx;\n</CODE>\n</BLOCK>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::DuplicateDefineSection { .. })
        );
    }

    #[test]
    fn test_block_missing_code_section() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n</BLOCK>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::MissingCodeSection { .. })
        );
    }

    #[test]
    fn test_unterminated_block() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\nx;\n</CODE>\n";
        assert_matches!(
            parse_document(source),
            Err(DocumentError::MissingBlockEnd { .. })
        );
    }

    #[test]
    fn test_comment_lines_invisible_to_structure() {
        let source = "# leading comment\n<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\nx;\n</CODE>\n</BLOCK>\n";
        let document = parse_document(source).unwrap();
        assert_eq!(document.block_count(), 1);
    }

    #[test]
    fn test_preprocessor_lines_kept_in_code() {
        let source = "<BLOCK>\n<TARGETS>\nf\n</TARGETS>\n<CODE>\n#ifdef FAST\nx;\n#endif\n</CODE>\n</BLOCK>\n";
        let document = parse_document(source).unwrap();
        assert_eq!(document.blocks[0].code, "#ifdef FAST\nx;\n#endif\n");
    }
}
