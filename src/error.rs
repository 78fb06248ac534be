//! Error kinds reported by the consume and write functions.

use std::fmt;

/// Reason why a consume or write step failed.
///
/// `Incomplete` is kept apart from `Syntax`: a streaming caller can wait for
/// more bytes on the former and reject the message on the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// A required input was empty.
    InvalidArgument,
    /// The input does not match the grammar.
    Syntax,
    /// The input ended before the grammar unit did.
    Incomplete,
    /// The destination buffer is too small.
    Overflow,
    /// The bounded storage is exhausted, or a heap allocation was refused.
    Capacity,
}

impl ParseError {
    pub fn is_incomplete(&self) -> bool {
        *self == Self::Incomplete
    }

    pub fn is_capacity(&self) -> bool {
        *self == Self::Capacity
    }
}

impl fmt::Display for ParseError {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Syntax => write!(f, "syntax error"),
            Self::Incomplete => write!(f, "incomplete input"),
            Self::Overflow => write!(f, "output buffer overflow"),
            Self::Capacity => write!(f, "storage capacity exhausted"),
        }
    }
}

impl std::error::Error for ParseError {}
