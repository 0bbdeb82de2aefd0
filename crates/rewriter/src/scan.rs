//! Lexical scan over declaration value bytes.
//!
//! The scanner classifies, at a given byte position, the spans the rewrite
//! either protects or rewrites. At every position the protected alternatives
//! run first: double quoted strings, single quoted strings, `url()` arguments
//! and custom property names. Only when none of those start at the position is
//! a numeric `rem` literal considered, so a custom property name shields any
//! digits and units inside it.

/// A matched numeric `rem` literal.
///
/// The match starts at the position handed to [`match_rem_literal`]; both
/// ends are exclusive byte offsets into the scanned value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemLiteral {
    /// End of the numeric text, sign and fraction included.
    pub number_end: usize,
    /// End of the whole match including the unit.
    pub end: usize,
}

/// Match any span that must never be rewritten, returning its end.
pub fn match_protected(bytes: &[u8], start: usize) -> Option<usize> {
    match_quoted(bytes, start, b'"')
        .or_else(|| match_quoted(bytes, start, b'\''))
        .or_else(|| match_url_function(bytes, start))
        .or_else(|| match_custom_property(bytes, start))
}

/// Match a quoted string with at least one byte between the delimiters.
///
/// An empty or unterminated string is not a match; the opening quote then
/// counts as plain text and scanning resumes inside it.
pub fn match_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    if bytes.get(start).copied() != Some(quote) {
        return None;
    }
    let mut pos = start + 1;
    while pos < bytes.len() && bytes[pos] != quote {
        pos += 1;
    }
    if pos == start + 1 || pos == bytes.len() {
        return None;
    }
    Some(pos + 1)
}

/// Match `url(` in any letter case up to and including the closing
/// parenthesis, requiring at least one byte of argument.
pub fn match_url_function(bytes: &[u8], start: usize) -> Option<usize> {
    let head = bytes.get(start..start + 4)?;
    if !head.eq_ignore_ascii_case(b"url(") {
        return None;
    }
    let mut pos = start + 4;
    while pos < bytes.len() && bytes[pos] != b')' {
        pos += 1;
    }
    if pos == start + 4 || pos == bytes.len() {
        return None;
    }
    Some(pos + 1)
}

/// Match a custom property name: `--` followed by at least one word byte.
pub fn match_custom_property(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start).copied() != Some(b'-') || bytes.get(start + 1).copied() != Some(b'-') {
        return None;
    }
    let mut pos = start + 2;
    while pos < bytes.len() && is_word_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == start + 2 {
        return None;
    }
    Some(pos)
}

/// Match a number directly followed by the unit `rem` in any letter case.
///
/// The number grammar is an optional leading minus, optional integer digits
/// and an optional fraction. At least one digit must be present overall, and
/// a decimal dot only belongs to the number when digits follow it.
pub fn match_rem_literal(bytes: &[u8], start: usize) -> Option<RemLiteral> {
    let mut pos = start;
    if bytes.get(pos).copied() == Some(b'-') {
        pos += 1;
    }
    let mut digits = 0;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
        digits += 1;
    }
    if bytes.get(pos).copied() == Some(b'.') {
        let mut fraction = pos + 1;
        while fraction < bytes.len() && bytes[fraction].is_ascii_digit() {
            fraction += 1;
        }
        if fraction == pos + 1 {
            return None;
        }
        digits += fraction - pos - 1;
        pos = fraction;
    }
    if digits == 0 {
        return None;
    }
    let unit = bytes.get(pos..pos + 3)?;
    if !unit.eq_ignore_ascii_case(b"rem") {
        return None;
    }
    Some(RemLiteral {
        number_end: pos,
        end: pos + 3,
    })
}

/// ASCII letters, digits, `_` and `-` may appear in a custom property name.
const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}
