//! Start line parsing: request line, status line and HTTP version.

use crate::error::ParseError;
use crate::http_msg::{HttpVersion, MessageType};
use crate::options::ConsumeOptions;
use crate::span::Span;
use crate::text::{self, CR, LF, SP};
use log::{debug, trace};

const VERSION_PREFIX: &[u8] = b"HTTP/";
/// `HTTP/` followed by the shortest `d.d`.
const VERSION_MIN_LENGTH: usize = 8;

/// The parts of a request line, e.g. `GET /index.html HTTP/1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: Span<'a>,
    pub target: Span<'a>,
    pub version: HttpVersion,
}

/// The parts of a status line, e.g. `HTTP/1.1 404 Not Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine<'a> {
    pub version: HttpVersion,
    pub status_code: u32,
    pub reason: Span<'a>,
}

/// Leading decimal digits of `text` and their value.
///
/// The value is not range checked: it wraps around on overflow.
fn consume_digits(text: &[u8]) -> (u32, usize) {
    let count = text
        .iter()
        .position(|&c| !text::is_digit(c))
        .unwrap_or(text.len());
    let value = text[..count].iter().fold(0_u32, |value, &c| {
        value.wrapping_mul(10).wrapping_add(u32::from(c - b'0'))
    });
    (value, count)
}

/// Consume `HTTP/major.minor`.
pub fn consume_http_version(text: &[u8]) -> Result<(HttpVersion, usize), ParseError> {
    if text.is_empty() {
        return Err(ParseError::InvalidArgument);
    }
    if text.len() < VERSION_MIN_LENGTH || !text.starts_with(VERSION_PREFIX) {
        return Err(ParseError::Syntax);
    }

    let mut consumed = VERSION_PREFIX.len();
    let (major, count) = consume_digits(&text[consumed..]);
    consumed += count;
    if count == 0 || text.get(consumed) != Some(&b'.') {
        return Err(ParseError::Syntax);
    }
    consumed += 1;

    let (minor, count) = consume_digits(&text[consumed..]);
    if count == 0 {
        return Err(ParseError::Syntax);
    }
    Ok((HttpVersion::new(major, minor), consumed + count))
}

/// Consume the request target: `*`, or everything up to the next white space
/// or line break.
pub fn consume_request_target(text: &[u8]) -> Result<Span<'_>, ParseError> {
    let Some(&first) = text.first() else {
        return Err(ParseError::InvalidArgument);
    };
    if text::is_lws(first) || text::is_ctl(first) {
        return Err(ParseError::Syntax);
    }
    if first == b'*' {
        return Ok(Span::new(&text[..1]));
    }

    let length = text
        .iter()
        .position(|&c| text::is_lws(c) || c == CR || c == LF)
        .unwrap_or(text.len());
    Ok(Span::new(&text[..length]))
}

/// Consume the line terminator after a start line.
fn consume_line_end(text: &[u8], options: ConsumeOptions) -> Result<usize, ParseError> {
    if text.is_empty() {
        if !options.accept_missing_terminator {
            return Err(ParseError::Incomplete);
        }
        return Ok(0);
    }
    if text::is_crlf(text) {
        return Ok(2);
    }
    if text::is_partial_crlf(text) {
        return Err(ParseError::Incomplete);
    }
    Err(ParseError::Syntax)
}

/// Consume the single space separating two start line elements.
fn consume_separator(text: &[u8]) -> Result<usize, ParseError> {
    match text.first() {
        None => Err(ParseError::Incomplete),
        Some(&SP) => Ok(1),
        Some(_) => Err(ParseError::Syntax),
    }
}

/// Consume `method SP target SP version CRLF`.
pub fn consume_request_line(
    text: &[u8],
    options: ConsumeOptions,
) -> Result<(RequestLine<'_>, usize), ParseError> {
    let method = text::consume_token(text)?;
    let mut consumed = method.len();
    consumed += consume_separator(&text[consumed..])?;

    let target = consume_request_target(&text[consumed..]).map_err(incomplete_if_empty)?;
    consumed += target.len();
    consumed += consume_separator(&text[consumed..])?;

    let (version, length) = consume_http_version(&text[consumed..]).map_err(incomplete_if_empty)?;
    consumed += length;
    consumed += consume_line_end(&text[consumed..], options)?;

    trace!("request line {:?} {:?} {}", method, target, version);
    Ok((
        RequestLine {
            method,
            target,
            version,
        },
        consumed,
    ))
}

/// Consume `version SP status-code [LWS] reason-phrase CRLF`.
pub fn consume_status_line(
    text: &[u8],
    options: ConsumeOptions,
) -> Result<(StatusLine<'_>, usize), ParseError> {
    let (version, mut consumed) = consume_http_version(text)?;
    consumed += consume_separator(&text[consumed..])?;

    let (status_code, count) = consume_digits(&text[consumed..]);
    if count == 0 {
        return Err(if consumed == text.len() {
            ParseError::Incomplete
        } else {
            ParseError::Syntax
        });
    }
    consumed += count;

    consumed += text[consumed..]
        .iter()
        .position(|&c| !text::is_lws(c))
        .unwrap_or(text.len() - consumed);
    let reason_length = text[consumed..]
        .iter()
        .position(|&c| !text::is_text(c))
        .unwrap_or(text.len() - consumed);
    let reason = Span::new(&text[consumed..consumed + reason_length]);
    consumed += reason_length;
    consumed += consume_line_end(&text[consumed..], options)?;

    trace!("status line {} {} {:?}", version, status_code, reason);
    Ok((
        StatusLine {
            version,
            status_code,
            reason,
        },
        consumed,
    ))
}

/// Nothing left to parse is incomplete input rather than a missing argument.
fn incomplete_if_empty(error: ParseError) -> ParseError {
    match error {
        ParseError::InvalidArgument => ParseError::Incomplete,
        error => error,
    }
}

/// Tell whether `text` starts with a request line or a status line.
///
/// Only local values are written, nothing is allocated.
pub fn message_type(text: &[u8], options: ConsumeOptions) -> MessageType {
    let kind = if consume_request_line(text, options).is_ok() {
        MessageType::Request
    } else if consume_status_line(text, options).is_ok() {
        MessageType::Response
    } else {
        MessageType::Unknown
    };
    debug!("message type: {:?}", kind);
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_http_version_test() {
        let tests: [(&[u8], Result<(u32, u32, usize), ParseError>); 9] = [
            (b"HTTP/1.1", Ok((1, 1, 8))),
            (b"HTTP/1.0\r\n", Ok((1, 0, 8))),
            (b"HTTP/12.34 200", Ok((12, 34, 10))),
            (b"HTTP/1.", Err(ParseError::Syntax)),
            (b"HTTP/1.x\r\n", Err(ParseError::Syntax)),
            (b"HTTP/11\r\n", Err(ParseError::Syntax)),
            (b"HTTP/.1\r\n", Err(ParseError::Syntax)),
            (b"http/1.1\r\n", Err(ParseError::Syntax)),
            (b"", Err(ParseError::InvalidArgument)),
        ];
        for (input, expected) in tests {
            let result = consume_http_version(input).map(|(v, n)| (v.major, v.minor, n));
            assert_eq!(result, expected, "{:?}", input.escape_ascii().to_string());
        }
    }

    #[test]
    fn consume_request_target_test() {
        assert_eq!(consume_request_target(b"* HTTP/1.1").unwrap(), "*");
        assert_eq!(consume_request_target(b"/a/b?c=d HTTP/1.1").unwrap(), "/a/b?c=d");
        assert_eq!(consume_request_target(b"/end").unwrap(), "/end");
        assert_eq!(consume_request_target(b"/x\r\n").unwrap(), "/x");
        assert_eq!(consume_request_target(b" /"), Err(ParseError::Syntax));
        assert_eq!(consume_request_target(b"\r\n"), Err(ParseError::Syntax));
        assert_eq!(consume_request_target(b"\x01/"), Err(ParseError::Syntax));
        assert_eq!(consume_request_target(b""), Err(ParseError::InvalidArgument));
    }

    #[test]
    fn consume_request_line_test() {
        let strict = ConsumeOptions::new();
        let lenient = ConsumeOptions::lenient();
        let tests: [(&[u8], ConsumeOptions, Result<usize, ParseError>); 12] = [
            (b"GET / HTTP/1.1\r\n", strict, Ok(16)),
            (b"GET / HTTP/1.1\r\nHost: a\r\n", strict, Ok(16)),
            (b"OPTIONS * HTTP/1.0\r\n", strict, Ok(20)),
            (b"GET / HTTP/1.1", strict, Err(ParseError::Incomplete)),
            (b"GET / HTTP/1.1", lenient, Ok(14)),
            (b"GET / HTTP/1.1\r", lenient, Err(ParseError::Incomplete)),
            (b"GET /", strict, Err(ParseError::Incomplete)),
            (b"GET / ", strict, Err(ParseError::Incomplete)),
            (b"GET", strict, Err(ParseError::Incomplete)),
            (b"GET  / HTTP/1.1\r\n", strict, Err(ParseError::Syntax)),
            (b"GET / HTTP/1.1 \r\n", strict, Err(ParseError::Syntax)),
            (b"/ GET HTTP/1.1\r\n", strict, Err(ParseError::Syntax)),
        ];
        for (input, options, expected) in tests {
            let result = consume_request_line(input, options).map(|(_, n)| n);
            assert_eq!(result, expected, "{:?}", input.escape_ascii().to_string());
        }

        let (line, _) = consume_request_line(b"POST /form HTTP/1.0\r\n", strict).unwrap();
        assert_eq!(line.method, "POST");
        assert_eq!(line.target, "/form");
        assert_eq!(line.version, HttpVersion::new(1, 0));
    }

    #[test]
    fn consume_status_line_test() {
        let strict = ConsumeOptions::new();
        let lenient = ConsumeOptions::lenient();
        let tests: [(&[u8], ConsumeOptions, Result<(u32, &str, usize), ParseError>); 10] = [
            (b"HTTP/1.1 200 OK\r\n", strict, Ok((200, "OK", 17))),
            (b"HTTP/1.1 404 Not Found\r\n", strict, Ok((404, "Not Found", 24))),
            (b"HTTP/1.1 204\r\n", strict, Ok((204, "", 14))),
            (b"HTTP/1.1 200 \t OK \r\n", strict, Ok((200, "OK ", 20))),
            (b"HTTP/1.1 200 OK", strict, Err(ParseError::Incomplete)),
            (b"HTTP/1.1 200 OK", lenient, Ok((200, "OK", 15))),
            (b"HTTP/1.1 ", strict, Err(ParseError::Incomplete)),
            (b"HTTP/1.1 OK\r\n", strict, Err(ParseError::Syntax)),
            (b"HTTP/1.1\t200 OK\r\n", strict, Err(ParseError::Syntax)),
            (b"HTTP/1.1 200 OK\x01\r\n", strict, Err(ParseError::Syntax)),
        ];
        for (input, options, expected) in tests {
            let result = consume_status_line(input, options)
                .map(|(line, n)| (line.status_code, line.reason, n));
            let expected = expected.map(|(code, reason, n)| (code, Span::from(reason), n));
            assert_eq!(result, expected, "{:?}", input.escape_ascii().to_string());
        }
    }

    #[test]
    fn status_code_accumulation_test() {
        let (line, _) = consume_status_line(b"HTTP/1.1 0042 Odd\r\n", ConsumeOptions::new()).unwrap();
        assert_eq!(line.status_code, 42);
        // not range checked
        let (line, _) = consume_status_line(b"HTTP/1.1 4294967297 Big\r\n", ConsumeOptions::new())
            .unwrap();
        assert_eq!(line.status_code, 1);
    }

    #[test]
    fn message_type_test() {
        let options = ConsumeOptions::new();
        assert_eq!(message_type(b"GET / HTTP/1.1\r\n", options), MessageType::Request);
        assert_eq!(message_type(b"HTTP/1.1 200 OK\r\n", options), MessageType::Response);
        assert_eq!(message_type(b"Hello world\r\n", options), MessageType::Unknown);
        assert_eq!(message_type(b"", options), MessageType::Unknown);
        assert_eq!(message_type(b"GET / HTTP/1.1", options), MessageType::Unknown);
        assert_eq!(
            message_type(b"GET / HTTP/1.1", ConsumeOptions::lenient()),
            MessageType::Request
        );
    }
}
