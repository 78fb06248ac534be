//! Non-owning views into the buffer handed to a consume call.
//!
//! A [`Span`] borrows the input, so a parsed structure can never outlive the
//! bytes it points into.

use std::{cmp, fmt};

/// A slice of the input buffer. The empty span stands for "no text".
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span<'a> {
    bytes: &'a [u8],
}

impl<'a> Span<'a> {
    pub const EMPTY: Span<'static> = Span { bytes: &[] };

    #[inline(always)]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Checked ASCII view of the span.
    pub fn as_ascii_str(&self) -> Result<&'a ascii::AsciiStr, ascii::AsAsciiStrError> {
        ascii::AsciiStr::from_ascii(self.bytes)
    }

    /// Byte-wise ordering: common prefix first, then the shorter text sorts first.
    pub fn compare_text(&self, text: &[u8]) -> cmp::Ordering {
        self.bytes.cmp(text)
    }

    pub fn compare(&self, other: &Span<'_>) -> cmp::Ordering {
        self.compare_text(other.bytes)
    }

    /// Same as [`Span::compare_text`] with ASCII letters folded to lower case.
    pub fn caseless_compare_text(&self, text: &[u8]) -> cmp::Ordering {
        self.bytes
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(text.iter().map(u8::to_ascii_lowercase))
    }

    pub fn caseless_compare(&self, other: &Span<'_>) -> cmp::Ordering {
        self.caseless_compare_text(other.bytes)
    }

    pub fn eq_ignore_ascii_case(&self, text: &[u8]) -> bool {
        self.bytes.eq_ignore_ascii_case(text)
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for Span<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl PartialEq<[u8]> for Span<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Span<'_> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for Span<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Span<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<str> for Span<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Span<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Display for Span<'_> {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.bytes))
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.bytes.escape_ascii())
    }
}
