//! Data structures for modeling the header block of an HTTP message.
//!
//! A header block is a list of fields. Each field has a name and a value, and
//! the value is itself a list of chunks, one per physical line when the value
//! is folded over several lines:
//!
//! ```text
//! X-Folded: first line\r\n
//!   second line\r\n
//! ```
//!
//! Two storages sit behind [`HeaderList`]: a growable one, and a bounded arena
//! sized once for a maximum number of fields and lines per value, which never
//! allocates while parsing.

mod arena;
mod chain;

use crate::error::ParseError;
use crate::options::ConsumeOptions;
use crate::span::Span;
use arena::{FieldArena, Node, NodeIndex};
use chain::{FieldChain, FieldNode};
use std::{fmt, slice};

#[derive(Debug)]
enum Storage<'a> {
    Dynamic(FieldChain<'a>),
    Bounded(FieldArena<'a>),
}

/// The header fields of a message, in reception order.
#[derive(Debug)]
pub struct HeaderList<'a> {
    storage: Storage<'a>,
}

impl<'a> HeaderList<'a> {
    /// An empty list with growable storage.
    pub fn new() -> Self {
        Self {
            storage: Storage::Dynamic(FieldChain::new()),
        }
    }

    /// An empty list backed by a pre-sized arena holding at most `max_fields`
    /// fields, each with a value spanning at most `max_lines` lines.
    ///
    /// Use it with [`ConsumeOptions::no_alloc`] to parse without allocating.
    pub fn bounded(max_fields: usize, max_lines: usize) -> Result<Self, ParseError> {
        Ok(Self {
            storage: Storage::Bounded(FieldArena::new(max_fields, max_lines)?),
        })
    }

    /// `(max_fields, max_lines)` of a bounded list.
    pub fn capacity(&self) -> Option<(usize, usize)> {
        match &self.storage {
            Storage::Dynamic(_) => None,
            Storage::Bounded(arena) => Some((arena.max_fields(), arena.max_lines())),
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self.storage, Storage::Bounded(_))
    }

    /// Number of fields before the first sentinel.
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Dynamic(chain) => chain.len(),
            Storage::Bounded(arena) => arena.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Fields<'_, 'a> {
        let inner = match &self.storage {
            Storage::Dynamic(chain) => FieldsInner::Dynamic(chain.fields().iter()),
            Storage::Bounded(arena) => FieldsInner::Bounded {
                nodes: arena.nodes(),
                cursor: arena.head(),
            },
        };
        Fields { inner }
    }

    pub fn get(&self, index: usize) -> Option<Field<'_, 'a>> {
        self.iter().nth(index)
    }

    /// First field whose name matches `name`, ignoring ASCII case.
    pub fn find(&self, name: impl AsRef<[u8]>) -> Option<Field<'_, 'a>> {
        let name = name.as_ref();
        self.iter().find(|field| field.is(name))
    }

    /// Reset the list. Without `clear_without_release`, growable storage drops
    /// its nodes; an arena always keeps its nodes and only resets them.
    pub fn clear(&mut self, options: ConsumeOptions) {
        match &mut self.storage {
            Storage::Dynamic(chain) => chain.clear(!options.clear_without_release),
            Storage::Bounded(arena) => arena.clear(),
        }
    }

    /// Append a field with a single-line value.
    pub fn append(
        &mut self,
        name: &'a [u8],
        value: &'a [u8],
        options: ConsumeOptions,
    ) -> Result<(), ParseError> {
        if name.is_empty() {
            return Err(ParseError::InvalidArgument);
        }
        self.open_field(Span::new(name), Span::new(value), options)
    }

    /// Start a new field. Nothing is written when the storage cannot hold it.
    pub(crate) fn open_field(
        &mut self,
        name: Span<'a>,
        chunk: Span<'a>,
        options: ConsumeOptions,
    ) -> Result<(), ParseError> {
        match &mut self.storage {
            Storage::Dynamic(chain) => chain.open(name, chunk, options.no_allocation),
            Storage::Bounded(arena) => arena.open(name, chunk),
        }
    }

    /// Add a line to the value of the last field.
    pub(crate) fn extend_value(
        &mut self,
        chunk: Span<'a>,
        options: ConsumeOptions,
    ) -> Result<(), ParseError> {
        match &mut self.storage {
            Storage::Dynamic(chain) => chain.extend(chunk, options.no_allocation),
            Storage::Bounded(arena) => arena.extend(chunk),
        }
    }
}

impl Default for HeaderList<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two lists are equal when they hold the same fields, whatever their storage.
impl PartialEq for HeaderList<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'l, 'a> IntoIterator for &'l HeaderList<'a> {
    type Item = Field<'l, 'a>;
    type IntoIter = Fields<'l, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A header field borrowed from a [`HeaderList`].
#[derive(Clone, Copy)]
pub struct Field<'l, 'a> {
    name: Span<'a>,
    value: Value<'l, 'a>,
}

impl<'l, 'a> Field<'l, 'a> {
    pub fn name(&self) -> Span<'a> {
        self.name
    }

    pub fn value(&self) -> Value<'l, 'a> {
        self.value
    }

    /// Whether the field name is `name`, ignoring ASCII case.
    pub fn is(&self, name: impl AsRef<[u8]>) -> bool {
        self.name.eq_ignore_ascii_case(name.as_ref())
    }
}

impl PartialEq for Field<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl fmt::Debug for Field<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish()
    }
}

#[derive(Clone, Copy)]
enum ValueRepr<'l, 'a> {
    Dynamic(&'l [Span<'a>]),
    Bounded {
        nodes: &'l [Node<'a>],
        head: NodeIndex,
    },
}

/// The value of a header field: one chunk per line.
#[derive(Clone, Copy)]
pub struct Value<'l, 'a> {
    repr: ValueRepr<'l, 'a>,
}

impl<'l, 'a> Value<'l, 'a> {
    /// The non-empty lines of the value, in order.
    pub fn chunks(&self) -> Chunks<'l, 'a> {
        let inner = match self.repr {
            ValueRepr::Dynamic(chunks) => ChunksInner::Dynamic(chunks.iter()),
            ValueRepr::Bounded { nodes, head } => ChunksInner::Bounded {
                nodes,
                cursor: head,
            },
        };
        Chunks { inner }
    }

    /// Length of the value once its lines are joined by a single space.
    pub fn total_length(&self) -> usize {
        self.chunks()
            .enumerate()
            .map(|(i, chunk)| chunk.len() + usize::from(i > 0))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks().next().is_none()
    }

    /// Join the lines of the value with a single space into `output`.
    ///
    /// The remaining room is checked before each piece is copied; on
    /// `Overflow` only whole, earlier lines have been written.
    pub fn merge_into(&self, output: &mut [u8]) -> Result<usize, ParseError> {
        let mut written = 0;
        for chunk in self.chunks() {
            let separator = usize::from(written > 0);
            if output.len() - written < separator + chunk.len() {
                return Err(ParseError::Overflow);
            }
            if separator > 0 {
                output[written] = b' ';
                written += 1;
            }
            output[written..written + chunk.len()].copy_from_slice(chunk.as_bytes());
            written += chunk.len();
        }
        Ok(written)
    }

    /// The lines of the value joined by a single space.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut merged = Vec::with_capacity(self.total_length());
        for chunk in self.chunks() {
            if !merged.is_empty() {
                merged.push(b' ');
            }
            merged.extend_from_slice(chunk.as_bytes());
        }
        merged
    }
}

impl PartialEq for Value<'_, '_> {
    fn eq(&self, other: &Self) -> bool {
        self.chunks().eq(other.chunks())
    }
}

impl fmt::Debug for Value<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chunks()).finish()
    }
}

impl fmt::Display for Value<'_, '_> {
    #[cfg_attr(coverage, coverage(off))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_vec()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

enum FieldsInner<'l, 'a> {
    Dynamic(slice::Iter<'l, FieldNode<'a>>),
    Bounded {
        nodes: &'l [Node<'a>],
        cursor: NodeIndex,
    },
}

/// Iterator over the fields of a [`HeaderList`].
pub struct Fields<'l, 'a> {
    inner: FieldsInner<'l, 'a>,
}

impl<'l, 'a> Iterator for Fields<'l, 'a> {
    type Item = Field<'l, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            FieldsInner::Dynamic(fields) => fields.next().map(|field| Field {
                name: field.name,
                value: Value {
                    repr: ValueRepr::Dynamic(&field.chunks),
                },
            }),
            FieldsInner::Bounded { nodes, cursor } => {
                let node = nodes[cursor.get()?];
                if node.span.is_empty() {
                    return None;
                }
                *cursor = node.next;
                Some(Field {
                    name: node.span,
                    value: Value {
                        repr: ValueRepr::Bounded {
                            nodes: *nodes,
                            head: node.value,
                        },
                    },
                })
            }
        }
    }
}

enum ChunksInner<'l, 'a> {
    Dynamic(slice::Iter<'l, Span<'a>>),
    Bounded {
        nodes: &'l [Node<'a>],
        cursor: NodeIndex,
    },
}

/// Iterator over the lines of a [`Value`].
pub struct Chunks<'l, 'a> {
    inner: ChunksInner<'l, 'a>,
}

impl<'a> Iterator for Chunks<'_, 'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = match &mut self.inner {
            ChunksInner::Dynamic(chunks) => *chunks.next()?,
            ChunksInner::Bounded { nodes, cursor } => {
                let node = nodes[cursor.get()?];
                *cursor = node.next;
                node.span
            }
        };
        if chunk.is_empty() {
            // first sentinel ends the value
            self.inner = ChunksInner::Dynamic(Default::default());
            return None;
        }
        Some(chunk)
    }
}
