//! Lightweight SQL lexer state machine.
//!
//! Not a parser: it only knows enough to tell executable text apart from quoted strings,
//! quoted identifiers, line/block comments and dollar-quoted bodies.

/// How string and comment boundaries are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lexing {
    /// Doubled quotes escape, block comments nest (PostgreSQL standard strings).
    Standard,
    /// `\x` also escapes inside single quotes and a block comment ends at the first `*/`
    /// (MySQL, PostgreSQL `E''` strings).
    Backslash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment(u32),
    DollarQuoted(String),
}

/// Iterator over byte offsets of `sql` that lie in executable text.
pub(super) struct CodePositions<'a> {
    bytes: &'a [u8],
    idx: usize,
    state: State,
    lexing: Lexing,
}

pub(super) fn code_positions(sql: &str) -> CodePositions<'_> {
    code_positions_with(sql, Lexing::Standard)
}

pub(super) fn code_positions_with(sql: &str, lexing: Lexing) -> CodePositions<'_> {
    CodePositions {
        bytes: sql.as_bytes(),
        idx: 0,
        state: State::Normal,
        lexing,
    }
}

impl Iterator for CodePositions<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let bytes = self.bytes;
        while self.idx < bytes.len() {
            let idx = self.idx;
            let b = bytes[idx];
            self.idx += 1;

            match self.state {
                State::Normal => match b {
                    b'\'' => self.state = State::SingleQuoted,
                    b'"' => self.state = State::DoubleQuoted,
                    b'-' if bytes.get(idx + 1) == Some(&b'-') => {
                        self.state = State::LineComment;
                        self.idx += 1;
                    }
                    b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                        self.state = State::BlockComment(1);
                        self.idx += 1;
                    }
                    b'$' => match dollar_tag(bytes, idx) {
                        Some((tag, close)) => {
                            self.state = State::DollarQuoted(tag);
                            self.idx = close + 1;
                        }
                        None => return Some(idx),
                    },
                    _ => return Some(idx),
                },
                State::SingleQuoted | State::DoubleQuoted => {
                    let quote = if self.state == State::SingleQuoted {
                        b'\''
                    } else {
                        b'"'
                    };
                    if b == b'\\'
                        && quote == b'\''
                        && self.lexing == Lexing::Backslash
                    {
                        self.idx += 1;
                    } else if b == quote {
                        if bytes.get(idx + 1) == Some(&quote) {
                            self.idx += 1; // doubled quote is an escape
                        } else {
                            self.state = State::Normal;
                        }
                    }
                }
                State::LineComment => {
                    if b == b'\n' {
                        self.state = State::Normal;
                    }
                }
                State::BlockComment(depth) => {
                    if b == b'/'
                        && bytes.get(idx + 1) == Some(&b'*')
                        && self.lexing == Lexing::Standard
                    {
                        self.state = State::BlockComment(depth + 1);
                        self.idx += 1;
                    } else if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                        self.idx += 1;
                        self.state = if depth == 1 {
                            State::Normal
                        } else {
                            State::BlockComment(depth - 1)
                        };
                    }
                }
                State::DollarQuoted(ref tag) => {
                    if b == b'$' && closes_tag(bytes, idx, tag) {
                        self.idx = idx + tag.len() + 2;
                        self.state = State::Normal;
                    }
                }
            }
        }
        None
    }
}

/// `$tag$` opener starting at `start`: returns the tag and the offset of its closing `$`.
fn dollar_tag(bytes: &[u8], start: usize) -> Option<(String, usize)> {
    // `x$y$z` is an identifier, not a quote opener
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }
    let tag_len = bytes[start + 1..]
        .iter()
        .position(|b| !(b.is_ascii_alphanumeric() || *b == b'_'))?;
    let close = start + 1 + tag_len;
    // `$1` is a placeholder, not a tag
    if bytes.get(close) != Some(&b'$') || bytes.get(start + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let tag = std::str::from_utf8(&bytes[start + 1..close]).ok()?;
    Some((tag.to_string(), close))
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || !b.is_ascii()
}

fn closes_tag(bytes: &[u8], idx: usize, tag: &str) -> bool {
    let end = idx + 1 + tag.len();
    bytes.get(idx + 1..end) == Some(tag.as_bytes()) && bytes.get(end) == Some(&b'$')
}

/// Run of ASCII digits starting at `start`: returns the end offset and the digits.
pub(super) fn scan_digits(bytes: &[u8], start: usize) -> Option<(usize, &str)> {
    let len = bytes
        .get(start..)?
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if len == 0 {
        return None;
    }
    let end = start + len;
    std::str::from_utf8(&bytes[start..end])
        .ok()
        .map(|digits| (end, digits))
}
