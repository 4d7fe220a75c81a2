//! Line reader that drops whole-line comments from source documents
//!
//! Lines whose first non-whitespace character is `#` are comments and never
//! reach the document parser, with one exception: C preprocessor directives
//! are document content and pass through untouched.

/// Directives that keep a `#`-leading line from being treated as a comment.
const PRESERVED_DIRECTIVES: [&str; 13] = [
    "#define", "#undef", "#include", "#if", "#elif", "#else", "#endif", "#ifdef", "#ifndef",
    "#error", "#import", "#pragma", "#line",
];

/// Check whether a `#`-leading line is a preprocessor directive.
///
/// The directive must be followed by whitespace or the end of the line, so
/// `#definexyz` still counts as a comment.
pub fn is_preprocessor_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    PRESERVED_DIRECTIVES.iter().any(|directive| {
        trimmed
            .strip_prefix(directive)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\r', '\n']))
    })
}

/// Iterator over the content lines of a document, 1-based line numbers kept
/// from the original source so spans stay accurate.
pub struct LineReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> LineReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = (u32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            let trimmed = line.trim_start();
            if trimmed.starts_with('#') && !is_preprocessor_line(line) {
                continue;
            }
            return Some((index as u32 + 1, line));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_lines_are_skipped() {
        let source = "first\n# a comment\nsecond\n";
        let lines: Vec<_> = LineReader::new(source).collect();
        assert_eq!(lines, vec![(1, "first"), (3, "second")]);
    }

    #[test]
    fn test_indented_comment_is_skipped() {
        let lines: Vec<_> = LineReader::new("   # note\nbody").collect();
        assert_eq!(lines, vec![(2, "body")]);
    }

    #[test]
    fn test_preprocessor_lines_pass_through() {
        let source = "#include <stdio.h>\n#define N 3\n# out\n#endif";
        let lines: Vec<_> = LineReader::new(source).collect();
        assert_eq!(
            lines,
            vec![(1, "#include <stdio.h>"), (2, "#define N 3"), (4, "#endif")]
        );
    }

    #[test]
    fn test_directive_requires_a_delimiter() {
        assert!(is_preprocessor_line("#define X 1"));
        assert!(is_preprocessor_line("#endif"));
        assert!(!is_preprocessor_line("#definitely a comment"));
        assert!(!is_preprocessor_line("# define"));
    }

    #[test]
    fn test_line_numbers_track_the_original_source() {
        let source = "# 1\n# 2\nkept\n";
        let lines: Vec<_> = LineReader::new(source).collect();
        assert_eq!(lines, vec![(3, "kept")]);
    }
}
