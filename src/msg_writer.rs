//! Wire serialization of messages.
//!
//! A header field is written as `name ":"` followed by one `" " line CRLF` per
//! value line, a message as its header fields, a blank line and the body.

use crate::error::ParseError;
use crate::http_header::{Field, HeaderList};
use crate::http_msg::{HttpVersion, Message};
use crate::http_req::Request;
use crate::http_res::Response;
use crate::text::{CRLF, SP};
use std::convert::Infallible;
use std::io;

/// Destination of serialized bytes.
pub trait Sink {
    type Error;

    /// Write all of `bytes`, or nothing.
    fn put(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn put(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A [`Sink`] over any [`io::Write`], counting the bytes written.
pub struct IoSink<W> {
    inner: W,
    written: usize,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    type Error = io::Error;

    fn put(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }
}

/// A [`Sink`] over a caller-sized buffer.
///
/// The remaining room is checked before every write: a piece that does not
/// fit is not written at all, and the sink reports `Overflow`.
pub struct SliceSink<'o> {
    output: &'o mut [u8],
    written: usize,
}

impl<'o> SliceSink<'o> {
    pub fn new(output: &'o mut [u8]) -> Self {
        Self { output, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl Sink for SliceSink<'_> {
    type Error = ParseError;

    fn put(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let end = self.written + bytes.len();
        if end > self.output.len() {
            return Err(ParseError::Overflow);
        }
        self.output[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}

/// Serialization to the HTTP/1.1 wire format.
pub trait ToWire {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error>;

    /// Write to `writer`, returning the number of bytes written.
    fn write_to<W: io::Write>(&self, writer: W) -> io::Result<usize> {
        let mut sink = IoSink::new(writer);
        self.write_wire(&mut sink)?;
        Ok(sink.written())
    }

    /// Write into `output`, returning the number of bytes written.
    fn write_to_slice(&self, output: &mut [u8]) -> Result<usize, ParseError> {
        if output.is_empty() {
            return Err(ParseError::InvalidArgument);
        }
        let mut sink = SliceSink::new(output);
        self.write_wire(&mut sink)?;
        Ok(sink.written())
    }

    fn to_wire(&self) -> Vec<u8> {
        let mut output = Vec::new();
        let Ok(()) = self.write_wire(&mut output);
        output
    }
}

fn put_decimal<S: Sink>(sink: &mut S, mut value: u32) -> Result<(), S::Error> {
    let mut digits = [0_u8; 10];
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    sink.put(&digits[start..])
}

fn put_version<S: Sink>(sink: &mut S, version: HttpVersion) -> Result<(), S::Error> {
    sink.put(b"HTTP/")?;
    put_decimal(sink, version.major)?;
    sink.put(b".")?;
    put_decimal(sink, version.minor)
}

impl ToWire for Field<'_, '_> {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.put(self.name().as_bytes())?;
        sink.put(b":")?;
        let value = self.value();
        if value.is_empty() {
            return sink.put(CRLF);
        }
        for chunk in value.chunks() {
            sink.put(&[SP])?;
            sink.put(chunk.as_bytes())?;
            sink.put(CRLF)?;
        }
        Ok(())
    }
}

impl ToWire for HeaderList<'_> {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error> {
        self.iter().try_for_each(|field| field.write_wire(sink))
    }
}

impl ToWire for Message<'_> {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error> {
        self.headers().write_wire(sink)?;
        sink.put(CRLF)?;
        sink.put(self.body().as_bytes())
    }
}

impl ToWire for Request<'_> {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.put(self.method().as_bytes())?;
        sink.put(&[SP])?;
        sink.put(self.target().as_bytes())?;
        sink.put(&[SP])?;
        put_version(sink, self.version())?;
        sink.put(CRLF)?;
        self.message().write_wire(sink)
    }
}

impl ToWire for Response<'_> {
    fn write_wire<S: Sink>(&self, sink: &mut S) -> Result<(), S::Error> {
        put_version(sink, self.version())?;
        sink.put(&[SP])?;
        put_decimal(sink, self.status_code())?;
        sink.put(&[SP])?;
        sink.put(self.reason().as_bytes())?;
        sink.put(CRLF)?;
        self.message().write_wire(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ConsumeOptions;

    #[test]
    fn put_decimal_test() {
        for (value, expected) in [(0, "0"), (7, "7"), (200, "200"), (u32::MAX, "4294967295")] {
            let mut output = Vec::new();
            let Ok(()) = put_decimal(&mut output, value);
            assert_eq!(output, expected.as_bytes());
        }
    }

    #[test]
    fn field_to_wire_test() {
        let mut list = HeaderList::new();
        let options = ConsumeOptions::new();
        crate::header_parser::consume_header_list(
            &mut list,
            b"Empty:\r\nX-Folded: a\r\n  b\r\n\r\n",
            options,
        )
        .unwrap();
        assert_eq!(list.get(0).unwrap().to_wire(), b"Empty:\r\n");
        assert_eq!(list.get(1).unwrap().to_wire(), b"X-Folded: a\r\n b\r\n");
        assert_eq!(list.to_wire(), b"Empty:\r\nX-Folded: a\r\n b\r\n");
    }

    #[test]
    fn request_to_wire_test() {
        let mut request = Request::new();
        request.set_method(b"GET");
        request.set_target(b"/index.html");
        let options = ConsumeOptions::new();
        request
            .message_mut()
            .append_header(b"Host", b"example.org", options)
            .unwrap();
        request.message_mut().set_body(b"ping");

        let expected = b"GET /index.html HTTP/1.1\r\nHost: example.org\r\n\r\nping";
        assert_eq!(request.to_wire(), expected);

        let mut output = Vec::new();
        assert_eq!(request.write_to(&mut output).unwrap(), expected.len());
        assert_eq!(output, expected);

        let mut output = [0_u8; 64];
        assert_eq!(request.write_to_slice(&mut output), Ok(expected.len()));
        assert_eq!(&output[..expected.len()], expected);
    }

    #[test]
    fn response_to_wire_test() {
        let mut response = Response::new();
        response.set_status(404);
        response.message_mut().set_version(HttpVersion::HTTP_1_0);
        assert_eq!(response.to_wire(), b"HTTP/1.0 404 Not Found\r\n\r\n");
    }

    #[test]
    fn write_to_slice_overflow_test() {
        let mut response = Response::new();
        response.set_status(200);
        // "HTTP/1.1 200 OK\r\n\r\n" is 19 bytes
        let mut output = [b'#'; 18];
        assert_eq!(response.write_to_slice(&mut output), Err(ParseError::Overflow));
        // the CRLF that did not fit was not written
        assert_eq!(&output[..17], b"HTTP/1.1 200 OK\r\n");
        assert_eq!(output[17], b'#');

        let mut output = [0_u8; 19];
        assert_eq!(response.write_to_slice(&mut output), Ok(19));
        assert_eq!(response.write_to_slice(&mut []), Err(ParseError::InvalidArgument));
    }
}
