#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Incremental, zero-copy parsing of HTTP/1.1 messages.
//!
//! Parsed structures borrow the input buffer: a method, a header name or a
//! body is a [`Span`] into the bytes given to the consume call. Header fields
//! are kept either in growable storage or in a bounded arena that never
//! allocates while parsing.
//!
//! ```
//! use rust_http_message::{ConsumeOptions, Request};
//!
//! let input = b"GET /index.html HTTP/1.1\r\nHost: example.org\r\n\r\n";
//! let mut request = Request::new();
//! let consumed = request.consume(input, ConsumeOptions::new()).unwrap();
//! assert_eq!(consumed, input.len());
//! assert_eq!(request.target(), "/index.html");
//! assert_eq!(request.headers().find("host").unwrap().value().to_vec(), b"example.org");
//! ```

pub mod error;
pub mod header_parser;
pub mod http_header;
pub mod http_msg;
pub mod http_req;
pub mod http_res;
pub mod msg_parser;
pub mod msg_writer;
pub mod options;
pub mod span;
pub mod text;

pub use error::ParseError;
pub use http_header::HeaderList;
pub use http_msg::{HttpVersion, Message, MessageType};
pub use http_req::Request;
pub use http_res::Response;
pub use msg_writer::ToWire;
pub use options::ConsumeOptions;
pub use span::Span;
