//! Character state machine for SET/RES parameter lines
//!
//! One line of a purpose declaration is classified as COMMON, SET or RES.
//! Every syntax violation degrades the line to COMMON holding the raw text
//! and surfaces a warning; parsing never fails hard.

use super::{Component, LineKind, ParamLine, Warning};
use crate::config::compile_time::params::MAX_LINE_LENGTH;
use crate::utils::{strip_comment, trim};

/// Numeric tokens (interval bounds, repeat counts) may not exceed this many
/// digits.
const MAX_NUMERIC_TOKEN_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    MatchKeyword,
    Body,
    Bslash,
    Quoted,
    IntervalDot,
    ColonCount,
    End,
}

/// Where a backslash escape returns to once its escaped character is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeReturn {
    Body,
    Quoted,
}

/// Parse one comment-stripped, non-empty parameter line.
///
/// Leading and trailing blanks are insignificant. The returned warning is
/// `Ok` unless the line was degraded to COMMON.
pub fn parse_line(raw: &str) -> (ParamLine, Warning) {
    let stripped = trim(strip_comment(raw));

    if stripped.len() > MAX_LINE_LENGTH {
        return (ParamLine::common(stripped), Warning::LineTooLong);
    }

    Parser::new(stripped).run()
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    state: State,
    kind: LineKind,
    components: Vec<Component>,
    token: String,
    keyword: &'static str,
    keyword_pos: usize,
    /// An interval low bound has been stored and the high bound is pending.
    interval_open: bool,
    /// At most one interval per value slot; re-armed after each separator.
    interval_available: bool,
    escape_return: EscapeReturn,
    numbers_began: bool,
    numbers_ended: bool,
    missing_close: bool,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser {
            text,
            chars: text.chars().collect(),
            state: State::Init,
            kind: LineKind::Common,
            components: Vec::new(),
            token: String::new(),
            keyword: "",
            keyword_pos: 0,
            interval_open: false,
            interval_available: true,
            escape_return: EscapeReturn::Body,
            numbers_began: false,
            numbers_ended: false,
            missing_close: true,
        }
    }

    fn run(mut self) -> (ParamLine, Warning) {
        let last_ch = self.chars.last().copied();

        for i in 0..self.chars.len() {
            let ch = self.chars[i];
            let at_end = i + 1 == self.chars.len();

            match self.state {
                State::Init => {
                    if ch == ' ' || ch == '\t' {
                        continue;
                    }
                    match ch {
                        'S' => {
                            self.keyword = "SET";
                            self.keyword_pos = 0;
                            self.state = State::MatchKeyword;
                        }
                        'R' => {
                            self.keyword = "RES";
                            self.keyword_pos = 0;
                            self.state = State::MatchKeyword;
                        }
                        _ => return (ParamLine::common(self.text), Warning::Ok),
                    }
                }

                State::MatchKeyword => {
                    self.keyword_pos += 1;
                    if self.keyword_pos < self.keyword.len() {
                        if ch != self.keyword.as_bytes()[self.keyword_pos] as char {
                            return (ParamLine::common(self.text), Warning::Ok);
                        }
                    } else if ch == '(' {
                        // Keyword matched. A line whose final character is
                        // the close bracket is considered closed up front,
                        // even if the scan never reaches it as a delimiter.
                        self.kind = if self.keyword == "SET" {
                            LineKind::Set
                        } else {
                            LineKind::Res
                        };
                        if last_ch == Some(')') {
                            self.missing_close = false;
                        }
                        self.components.clear();
                        self.token.clear();
                        self.interval_open = false;
                        self.state = State::Body;
                    } else if ch != ' ' && ch != '\t' {
                        return (ParamLine::common(self.text), Warning::Ok);
                    }
                }

                State::Body => {
                    let closes_token = ch == ';'
                        || (ch == ':' && self.kind == LineKind::Res)
                        || (ch == ')' && at_end);

                    if closes_token {
                        if self.interval_open {
                            if let Err(warning) = self.close_interval() {
                                return (ParamLine::common(self.text), warning);
                            }
                        } else {
                            self.components.push(Component::literal(self.token.clone()));
                        }

                        match ch {
                            ';' => {}
                            ':' => {
                                self.numbers_began = false;
                                self.numbers_ended = false;
                                self.state = State::ColonCount;
                            }
                            _ => {
                                self.missing_close = false;
                                self.state = State::End;
                            }
                        }

                        self.interval_available = true;
                        self.token.clear();
                    } else if ch == '\\' {
                        self.escape_return = EscapeReturn::Body;
                        self.state = State::Bslash;
                    } else if ch == '\'' {
                        self.state = State::Quoted;
                    } else if ch == '.'
                        && self.interval_available
                        && self.kind == LineKind::Set
                    {
                        self.state = State::IntervalDot;
                    } else {
                        self.token.push(ch);
                    }
                }

                State::Bslash => {
                    // The backslash itself is retained alongside the escaped
                    // character, mirroring what generation emits.
                    self.token.push('\\');
                    self.token.push(ch);
                    self.state = match self.escape_return {
                        EscapeReturn::Body => State::Body,
                        EscapeReturn::Quoted => State::Quoted,
                    };
                }

                State::Quoted => {
                    if ch == '\\' {
                        self.escape_return = EscapeReturn::Quoted;
                        self.state = State::Bslash;
                    } else if ch == '\'' {
                        self.state = State::Body;
                    } else {
                        self.token.push(ch);
                    }
                }

                State::IntervalDot => {
                    if ch == '.' {
                        if let Err(warning) = self.open_interval() {
                            return (ParamLine::common(self.text), warning);
                        }
                    } else {
                        // A lone dot is an ordinary character; the follower
                        // comes along with it, separator or not.
                        self.token.push('.');
                        self.token.push(ch);
                    }
                    self.state = State::Body;
                }

                State::ColonCount => {
                    if ch == ' ' || ch == '\t' {
                        if self.numbers_began {
                            self.numbers_ended = true;
                        }
                    } else if ch.is_ascii_digit() {
                        if self.numbers_ended {
                            return (ParamLine::common(self.text), Warning::SyntaxColon);
                        }
                        self.token.push(ch);
                        self.numbers_began = true;
                    } else if ch == ';' || ch == ')' {
                        if self.token.len() > MAX_NUMERIC_TOKEN_LEN {
                            return (ParamLine::common(self.text), Warning::NumberTooLarge);
                        }
                        let count = parse_numeric(&self.token) as u32;
                        if let Some(component) = self.components.last_mut() {
                            component.set_repeat(count);
                        }
                        if ch == ';' {
                            self.state = State::Body;
                        } else {
                            self.missing_close = false;
                            self.state = State::End;
                        }
                        self.token.clear();
                    } else {
                        return (ParamLine::common(self.text), Warning::SyntaxColon);
                    }
                }

                State::End => {}
            }
        }

        if self.missing_close {
            return (ParamLine::common(self.text), Warning::MissingCloseBracket);
        }

        (
            ParamLine {
                kind: self.kind,
                components: self.components,
            },
            Warning::Ok,
        )
    }

    /// Validate the pending token as an interval low bound and store it.
    fn open_interval(&mut self) -> Result<(), Warning> {
        let bound = validate_bound(&self.token)?;
        self.components.push(Component::interval(bound, 0));
        self.interval_open = true;
        self.interval_available = false;
        self.token.clear();
        Ok(())
    }

    /// Validate the pending token as the high bound of the open interval.
    fn close_interval(&mut self) -> Result<(), Warning> {
        let bound = validate_bound(&self.token)?;
        if let Some(Component::Interval { high, .. }) = self.components.last_mut() {
            *high = bound;
        }
        self.interval_open = false;
        Ok(())
    }
}

/// Interval bounds must be all-digits (an empty token counts as zero) and at
/// most [`MAX_NUMERIC_TOKEN_LEN`] characters long.
fn validate_bound(token: &str) -> Result<i64, Warning> {
    let token = trim(token);
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Warning::InvalidIntervalToken);
    }
    if token.len() > MAX_NUMERIC_TOKEN_LEN {
        return Err(Warning::NumberTooLarge);
    }
    Ok(parse_numeric(token))
}

fn parse_numeric(token: &str) -> i64 {
    token.parse().unwrap_or(0)
}
