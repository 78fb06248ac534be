//! Data structures shared by requests and responses.

use crate::error::ParseError;
use crate::header_parser;
use crate::http_header::HeaderList;
use crate::options::ConsumeOptions;
use crate::span::Span;
use crate::text;
use log::trace;
use std::fmt;

/// Kind of message a buffer starts with, see [`crate::msg_parser::message_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Request,
    Response,
    Unknown,
}

/// Protocol version of a message, e.g. `HTTP/1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HttpVersion {
    pub major: u32,
    pub minor: u32,
}

impl HttpVersion {
    pub const HTTP_1_0: Self = Self::new(1, 0);
    pub const HTTP_1_1: Self = Self::new(1, 1);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::HTTP_1_1
    }
}

impl fmt::Display for HttpVersion {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

/// The part common to requests and responses: version, header fields and body.
#[derive(Debug)]
pub struct Message<'a> {
    kind: MessageType,
    version: HttpVersion,
    headers: HeaderList<'a>,
    body: Span<'a>,
}

impl<'a> Message<'a> {
    pub fn new(kind: MessageType) -> Self {
        Self::with_headers(kind, HeaderList::new())
    }

    /// A message whose header fields live in a bounded arena.
    pub fn with_capacity(
        kind: MessageType,
        max_fields: usize,
        max_lines: usize,
    ) -> Result<Self, ParseError> {
        Ok(Self::with_headers(
            kind,
            HeaderList::bounded(max_fields, max_lines)?,
        ))
    }

    fn with_headers(kind: MessageType, headers: HeaderList<'a>) -> Self {
        Self {
            kind,
            version: HttpVersion::default(),
            headers,
            body: Span::EMPTY,
        }
    }

    pub fn kind(&self) -> MessageType {
        self.kind
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn set_version(&mut self, version: HttpVersion) {
        self.version = version;
    }

    pub fn headers(&self) -> &HeaderList<'a> {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderList<'a> {
        &mut self.headers
    }

    pub fn body(&self) -> Span<'a> {
        self.body
    }

    pub fn set_body(&mut self, body: &'a [u8]) {
        self.body = Span::new(body);
    }

    /// Append a header field with a single-line value.
    pub fn append_header(
        &mut self,
        name: &'a [u8],
        value: &'a [u8],
        options: ConsumeOptions,
    ) -> Result<(), ParseError> {
        self.headers.append(name, value, options)
    }

    /// Reset the message. The version goes back to `0.0`, meaning "not parsed".
    pub fn clear(&mut self, options: ConsumeOptions) {
        self.headers.clear(options);
        self.body = Span::EMPTY;
        self.version = HttpVersion::new(0, 0);
    }

    /// Consume everything following the start line: the header block, the
    /// blank line closing it, and the body.
    ///
    /// The body is the rest of `text`; it stays empty when nothing follows the
    /// blank line. Errors are returned as the header parser reports them.
    pub fn consume_content(
        &mut self,
        text: &'a [u8],
        options: ConsumeOptions,
    ) -> Result<usize, ParseError> {
        self.body = Span::EMPTY;
        let mut consumed = header_parser::consume_header_list(&mut self.headers, text, options)?;

        let rest = &text[consumed..];
        if rest.is_empty() {
            if !options.accept_missing_terminator {
                return Err(ParseError::Incomplete);
            }
            return Ok(consumed);
        }
        if !text::is_crlf(rest) {
            return Err(ParseError::Syntax);
        }
        consumed += text::CRLF.len();

        let body = &text[consumed..];
        if !body.is_empty() {
            self.body = Span::new(body);
        }
        trace!("message body of {} bytes", body.len());
        Ok(text.len())
    }
}

/// Errors of the start line or the content are reported as syntax errors,
/// except a storage that ran out of room.
pub(crate) fn coarsen(error: ParseError) -> ParseError {
    if error.is_capacity() {
        error
    } else {
        ParseError::Syntax
    }
}
