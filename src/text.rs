//! Character classes and the lexical scanners of the HTTP/1.1 grammar.
//!
//! Bytes outside of the US-ASCII range are classified as control bytes: they
//! are never part of a token, and never valid TEXT.

use crate::error::ParseError;
use crate::span::Span;

pub const SP: u8 = b' ';
pub const HT: u8 = b'\t';
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF: &[u8] = b"\r\n";

const QUOTE: u8 = b'"';
const ESCAPE: u8 = b'\\';

/// Any US-ASCII byte.
#[inline]
pub const fn is_char(c: u8) -> bool {
    c < 0x80
}

#[inline]
pub const fn is_upalpha(c: u8) -> bool {
    c.is_ascii_uppercase()
}

#[inline]
pub const fn is_loalpha(c: u8) -> bool {
    c.is_ascii_lowercase()
}

#[inline]
pub const fn is_alpha(c: u8) -> bool {
    is_upalpha(c) || is_loalpha(c)
}

#[inline]
pub const fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Linear white space: space or horizontal tab.
#[inline]
pub const fn is_lws(c: u8) -> bool {
    c == SP || c == HT
}

#[inline]
pub const fn is_ctl(c: u8) -> bool {
    c < 0x20 || c >= 0x7F
}

#[inline]
pub const fn is_text(c: u8) -> bool {
    is_lws(c) || !is_ctl(c)
}

#[inline]
pub const fn is_separator(c: u8) -> bool {
    matches!(
        c,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | SP
            | HT
    )
}

#[inline]
pub const fn is_token_char(c: u8) -> bool {
    !(is_separator(c) || is_ctl(c))
}

/// Whether `text` starts with a CR LF pair.
#[inline]
pub fn is_crlf(text: &[u8]) -> bool {
    text.starts_with(CRLF)
}

/// Whether `text` is exactly a CR whose LF has not been received yet.
#[inline]
pub(crate) fn is_partial_crlf(text: &[u8]) -> bool {
    text == [CR]
}

/// Consume the longest run of token characters at the start of `text`.
///
/// The grammar requires at least one character.
pub fn consume_token(text: &[u8]) -> Result<Span<'_>, ParseError> {
    if text.is_empty() {
        return Err(ParseError::InvalidArgument);
    }
    let length = text
        .iter()
        .position(|&c| !is_token_char(c))
        .unwrap_or(text.len());
    if length == 0 {
        return Err(ParseError::Syntax);
    }
    Ok(Span::new(&text[..length]))
}

/// Decoded length of the quoted-string at the start of `text`, without
/// the quotes and with every quoted pair counted once.
pub fn quoted_string_length(text: &[u8]) -> Result<usize, ParseError> {
    let body = quoted_string_body(text)?;
    let mut length = 0;
    let mut escape = false;
    for &c in body {
        if escape {
            if !is_char(c) {
                return Err(ParseError::Syntax);
            }
            escape = false;
            length += 1;
        } else if c == QUOTE {
            return Ok(length);
        } else if c == ESCAPE {
            escape = true;
        } else if is_text(c) {
            length += 1;
        } else {
            return Err(ParseError::Syntax);
        }
    }
    Err(ParseError::Incomplete)
}

/// Result of [`consume_quoted_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedString {
    /// Input bytes consumed, both quotes included.
    pub consumed: usize,
    /// Decoded bytes written, the terminator excluded.
    pub length: usize,
}

/// Decode the quoted-string at the start of `text` into `output`.
///
/// A NUL terminator is written after the decoded text, so `output` needs room
/// for `quoted_string_length(text) + 1` bytes. Every byte is checked against
/// the remaining room before it is written.
pub fn consume_quoted_string(
    output: &mut [u8],
    text: &[u8],
) -> Result<QuotedString, ParseError> {
    if output.is_empty() {
        return Err(ParseError::InvalidArgument);
    }
    let body = quoted_string_body(text)?;
    let mut length = 0;
    let mut escape = false;
    for (index, &c) in body.iter().enumerate() {
        let decoded = if escape {
            if !is_char(c) {
                return Err(ParseError::Syntax);
            }
            escape = false;
            c
        } else if c == QUOTE {
            output[length] = 0;
            return Ok(QuotedString {
                // opening quote + body + closing quote
                consumed: index + 2,
                length,
            });
        } else if c == ESCAPE {
            escape = true;
            continue;
        } else if is_text(c) {
            c
        } else {
            return Err(ParseError::Syntax);
        };

        // keep one byte for the terminator
        if length + 1 >= output.len() {
            return Err(ParseError::Overflow);
        }
        output[length] = decoded;
        length += 1;
    }
    Err(ParseError::Incomplete)
}

/// Decode the quoted-string at the start of `text` into a new string.
///
/// Returns the decoded text and the number of input bytes consumed.
pub fn decode_quoted_string(text: &[u8]) -> Result<(ascii::AsciiString, usize), ParseError> {
    let mut decoded = ascii::AsciiString::with_capacity(quoted_string_length(text)?);
    let body = quoted_string_body(text)?;
    let mut escape = false;
    for (index, &c) in body.iter().enumerate() {
        if !escape && c == QUOTE {
            return Ok((decoded, index + 2));
        }
        if !escape && c == ESCAPE {
            escape = true;
            continue;
        }
        escape = false;
        decoded.push(ascii::AsciiChar::from_ascii(c).map_err(|_| ParseError::Syntax)?);
    }
    Err(ParseError::Incomplete)
}

/// Bytes following the opening quote.
fn quoted_string_body(text: &[u8]) -> Result<&[u8], ParseError> {
    match text.split_first() {
        None => Err(ParseError::InvalidArgument),
        Some((&QUOTE, body)) => Ok(body),
        Some(_) => Err(ParseError::Syntax),
    }
}
