//! Purpose template placeholders and substitution helpers

/// Replaced with the global sequential number of the generated purpose.
pub const PURPOSE_NUMBER_TAG: &str = "<%purpose_number%>";

/// Replaced with the generated parameter comment block.
pub const PARAMS_TAG: &str = "<%params%>";

/// Replaced with the finally-code fragment of the enclosing block.
pub const FINALLY_TAG: &str = "<%finally%>";

/// Prefix of one parameter comment line.
pub const COMMENT_PREFIX: &str = "//    ";

/// Comment block stamped for a purpose without parameters.
pub const COMMENT_NONE: &str = "//    none\n";

/// Placeholder for the parameter value of line `index`.
pub fn param_tag(index: usize) -> String {
    format!("<%{}%>", index)
}

/// Replace every occurrence of `tag` in `text`.
pub fn substitute(text: &str, tag: &str, value: &str) -> String {
    text.replace(tag, value)
}

/// One comment line of the `<%params%>` block.
pub fn comment_line(value: &str) -> String {
    format!("{}{}\n", COMMENT_PREFIX, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_tag_format() {
        assert_eq!(param_tag(0), "<%0%>");
        assert_eq!(param_tag(12), "<%12%>");
    }

    #[test]
    fn test_substitute_replaces_all() {
        let out = substitute("x=<%0%>; y=<%0%>", "<%0%>", "7");
        assert_eq!(out, "x=7; y=7");
    }

    #[test]
    fn test_comment_line() {
        assert_eq!(comment_line("value"), "//    value\n");
    }
}
