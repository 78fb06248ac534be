//! Data structures for modeling an HTTP response.

use crate::error::ParseError;
use crate::http_header::HeaderList;
use crate::http_msg::{self, HttpVersion, Message, MessageType};
use crate::msg_parser;
use crate::options::ConsumeOptions;
use crate::span::Span;
use log::debug;
use std::fmt;

/// Canonical reason phrase of a status code, empty for an unknown code.
pub fn reason_phrase(status_code: u32) -> &'static str {
    match status_code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        426 => "Upgrade Required",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => "",
    }
}

/// A parsed response. Every span borrows the buffer given to [`Response::consume`].
#[derive(Debug)]
pub struct Response<'a> {
    status_code: u32,
    reason: Span<'a>,
    message: Message<'a>,
}

impl<'a> Response<'a> {
    pub fn new() -> Self {
        Self::with_message(Message::new(MessageType::Response))
    }

    /// A response whose header fields live in a bounded arena of `max_fields`
    /// fields spanning at most `max_lines` lines each.
    pub fn with_capacity(max_fields: usize, max_lines: usize) -> Result<Self, ParseError> {
        Ok(Self::with_message(Message::with_capacity(
            MessageType::Response,
            max_fields,
            max_lines,
        )?))
    }

    fn with_message(message: Message<'a>) -> Self {
        Self {
            status_code: 0,
            reason: Span::EMPTY,
            message,
        }
    }

    pub fn status_code(&self) -> u32 {
        self.status_code
    }

    /// Set the status code along with its canonical reason phrase.
    pub fn set_status(&mut self, status_code: u32) {
        self.status_code = status_code;
        self.reason = Span::from(reason_phrase(status_code));
    }

    pub fn reason(&self) -> Span<'a> {
        self.reason
    }

    pub fn set_reason(&mut self, reason: &'a [u8]) {
        self.reason = Span::new(reason);
    }

    pub fn version(&self) -> HttpVersion {
        self.message.version()
    }

    pub fn headers(&self) -> &HeaderList<'a> {
        self.message.headers()
    }

    pub fn body(&self) -> Span<'a> {
        self.message.body()
    }

    pub fn message(&self) -> &Message<'a> {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message<'a> {
        &mut self.message
    }

    /// Parse a whole response: status line, header block and body.
    ///
    /// Same rules as [`crate::http_req::Request::consume`].
    pub fn consume(&mut self, text: &'a [u8], options: ConsumeOptions) -> Result<usize, ParseError> {
        if text.is_empty() {
            return Err(ParseError::InvalidArgument);
        }

        let (line, consumed) = msg_parser::consume_status_line(text, options.strict_terminator())
            .map_err(|e| {
                debug!("invalid status line: {}", e);
                ParseError::Syntax
            })?;
        self.status_code = line.status_code;
        self.reason = line.reason;
        self.message.set_version(line.version);

        let rest = &text[consumed..];
        if rest.is_empty() {
            return Err(ParseError::Incomplete);
        }
        let content = self
            .message
            .consume_content(rest, options)
            .map_err(http_msg::coarsen)?;
        Ok(consumed + content)
    }

    pub fn clear(&mut self, options: ConsumeOptions) {
        self.message.clear(options);
        self.status_code = 0;
        self.reason = Span::EMPTY;
    }
}

impl Default for Response<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Response<'_> {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.version(), self.status_code, self.reason)
    }
}
