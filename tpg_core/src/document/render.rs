//! Block-level template assembly
//!
//! Before expansion, each block specializes the purpose template: the block
//! placeholders below are filled from the block's sections, leaving only the
//! per-purpose placeholders for the generator.

use crate::document::types::Block;
use crate::expand::template::{substitute, PARAMS_TAG};

pub const COMMENT_TAG: &str = "<%comment%>";
pub const DEFINE_TAG: &str = "<%define%>";
pub const UNDEF_TAG: &str = "<%undef%>";
pub const CODE_TAG: &str = "<%code%>";
pub const TARGETS_TAG: &str = "<%targets%>";

/// Specialize `purpose_template` for `block`.
///
/// The result still carries the per-purpose placeholders (parameter values,
/// purpose number, parameter comment, finally code) for the generator.
pub fn block_template(block: &Block, purpose_template: &str) -> String {
    let mut template = substitute(purpose_template, COMMENT_TAG, &target_comment(&block.targets));
    template = substitute(&template, DEFINE_TAG, &block.define);
    template = substitute(&template, UNDEF_TAG, &undef_directives(&block.define));
    template = substitute(&template, CODE_TAG, &block.code);
    substitute(&template, TARGETS_TAG, &target_list(&block.targets))
}

/// Heading comment naming the block's target interfaces, ending in the
/// parameter comment placeholder filled per generated purpose.
pub fn target_comment(targets: &[String]) -> String {
    let mut comment = String::from("// Target interfaces:\n");
    for target in targets {
        comment.push_str("//    ");
        comment.push_str(target);
        comment.push('\n');
    }
    comment.push_str("//");
    comment.push_str("\n// Parameters:\n");
    comment.push_str(PARAMS_TAG);
    comment
}

/// Target list rendered for embedding inside a C string literal, so line
/// breaks are written as the two characters `\` `n`.
pub fn target_list(targets: &[String]) -> String {
    let mut list = String::from("Target interface(s):\\n");
    for target in targets {
        let sanitized: String = target
            .chars()
            .map(|ch| if matches!(ch, '\n' | '\r' | '"') { ' ' } else { ch })
            .collect();
        list.push_str("    ");
        list.push_str(&sanitized);
        list.push_str("\\n");
    }
    list
}

/// One `#undef` per `#define` of the DEFINE section, in order.
pub fn undef_directives(define: &str) -> String {
    let mut undefs = String::new();
    for line in define.lines() {
        let rest = match line.trim_start().strip_prefix("#define") {
            Some(rest) => rest,
            None => continue,
        };
        let rest = rest.trim_start();
        let name_len = rest
            .chars()
            .take_while(|&ch| ch.is_ascii_alphanumeric() || ch == '_')
            .count();
        if name_len == 0 {
            continue;
        }
        undefs.push_str("#undef ");
        undefs.push_str(&rest[..name_len]);
        undefs.push('\n');
    }
    undefs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;

    fn block_with(targets: &[&str], define: &str, code: &str) -> Block {
        let mut block = Block::new("NULL".to_string(), Span::dummy());
        block.targets = targets.iter().map(|t| t.to_string()).collect();
        block.define = define.to_string();
        block.code = code.to_string();
        block
    }

    #[test]
    fn test_target_comment_layout() {
        let comment = target_comment(&["getpid".to_string(), "getppid".to_string()]);
        assert_eq!(
            comment,
            "// Target interfaces:\n//    getpid\n//    getppid\n//\n// Parameters:\n<%params%>"
        );
    }

    #[test]
    fn test_target_list_uses_escaped_newlines() {
        let list = target_list(&["getpid".to_string()]);
        assert_eq!(list, "Target interface(s):\\n    getpid\\n");
        assert!(!list.contains('\n'));
    }

    #[test]
    fn test_target_list_sanitizes_quotes() {
        let list = target_list(&["get\"pid".to_string()]);
        assert!(list.contains("get pid"));
    }

    #[test]
    fn test_undef_generation() {
        let undefs = undef_directives("#define RETRIES 3\nint x;\n  #define NAME(a) (a)\n");
        assert_eq!(undefs, "#undef RETRIES\n#undef NAME\n");
    }

    #[test]
    fn test_block_template_fills_block_placeholders() {
        let block = block_with(&["open"], "#define N 1\n", "open(path);\n");
        let template =
            "<%comment%>\n<%define%>body:<%code%>finally:<%finally%>\n<%undef%>msg(\"<%targets%>\");\n";
        let specialized = block_template(&block, template);

        assert!(specialized.contains("//    open\n"));
        assert!(specialized.contains("<%params%>"));
        assert!(specialized.contains("#define N 1\n"));
        assert!(specialized.contains("#undef N\n"));
        assert!(specialized.contains("body:open(path);\n"));
        // Per-purpose placeholders survive specialization.
        assert!(specialized.contains("<%finally%>"));
        assert!(specialized.contains("Target interface(s):\\n    open\\n"));
    }
}
