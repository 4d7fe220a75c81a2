//! Small text helpers shared by the parameter parser and document scanner.

/// Trim leading and trailing spaces, tabs and line endings.
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n')
}

/// True when the line contains nothing but blanks.
pub fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n')
}

/// True when every character is an ASCII decimal digit (and there is at
/// least one).
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip a trailing `#` comment from one line.
///
/// A `#` loses its comment meaning when it is escaped by a backslash, when
/// it sits inside a double-quoted region, or when it is directly framed by
/// apostrophes (`'#'`). Quote state toggles on unescaped double quotes.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_quote = false;
    let mut i = 0;

    while i < bytes.len() {
        let prev = if i > 0 { bytes[i - 1] } else { 0 };
        match bytes[i] {
            b'"' if i == 0 || prev != b'\\' => in_quote = !in_quote,
            b'#' => {
                let escaped = i > 0 && prev == b'\\';
                let framed = i > 0
                    && prev == b'\''
                    && i + 1 < bytes.len()
                    && bytes[i + 1] == b'\'';
                if !escaped && !in_quote && !framed {
                    return &line[..i];
                }
            }
            _ => {}
        }
        i += 1;
    }

    line
}
