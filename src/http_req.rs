//! Data structures for modeling an HTTP request.

use crate::error::ParseError;
use crate::http_header::HeaderList;
use crate::http_msg::{self, HttpVersion, Message, MessageType};
use crate::msg_parser;
use crate::options::ConsumeOptions;
use crate::span::Span;
use log::debug;
use std::fmt;

/// A parsed request. Every span borrows the buffer given to [`Request::consume`].
#[derive(Debug)]
pub struct Request<'a> {
    method: Span<'a>,
    target: Span<'a>,
    message: Message<'a>,
}

impl<'a> Request<'a> {
    pub fn new() -> Self {
        Self::with_message(Message::new(MessageType::Request))
    }

    /// A request whose header fields live in a bounded arena of `max_fields`
    /// fields spanning at most `max_lines` lines each.
    pub fn with_capacity(max_fields: usize, max_lines: usize) -> Result<Self, ParseError> {
        Ok(Self::with_message(Message::with_capacity(
            MessageType::Request,
            max_fields,
            max_lines,
        )?))
    }

    fn with_message(message: Message<'a>) -> Self {
        Self {
            method: Span::EMPTY,
            target: Span::EMPTY,
            message,
        }
    }

    pub fn method(&self) -> Span<'a> {
        self.method
    }

    pub fn set_method(&mut self, method: &'a [u8]) {
        self.method = Span::new(method);
    }

    pub fn target(&self) -> Span<'a> {
        self.target
    }

    pub fn set_target(&mut self, target: &'a [u8]) {
        self.target = Span::new(target);
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

    /// Parse a whole request: request line, header block and body.
    ///
    /// The request line must end with CRLF whatever the options say. Any
    /// grammar error is reported as `Syntax`; `Capacity` is passed through, and
    /// fields parsed before it stay readable.
    pub fn consume(&mut self, text: &'a [u8], options: ConsumeOptions) -> Result<usize, ParseError> {
        if text.is_empty() {
            return Err(ParseError::InvalidArgument);
        }

        let (line, consumed) = msg_parser::consume_request_line(text, options.strict_terminator())
            .map_err(|e| {
                debug!("invalid request line: {}", e);
                ParseError::Syntax
            })?;
        self.method = line.method;
        self.target = line.target;
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
        self.method = Span::EMPTY;
        self.target = Span::EMPTY;
    }
}

impl Default for Request<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Request<'_> {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.method, self.target, self.version())
    }
}
