//! Pre-sized header storage.
//!
//! All nodes live in a single slot array allocated once, when the arena is
//! built. Every `next` link is threaded at construction time, so parsing only
//! ever writes spans into nodes that already exist. A node whose span is empty
//! is a sentinel.
//!
//! Layout for `max_fields = 2`, `max_lines = 2` (F = field node, V = value node):
//!
//! ```text
//! [F0 V0.0 V0.1 | F1 V1.0 V1.1]
//!  F0.next -> F1, F0.value -> V0.0, V0.0.next -> V0.1
//! ```

use crate::error::ParseError;
use crate::span::Span;

/// Index of a node in the slot array, or `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(u32);

impl NodeIndex {
    pub const NONE: Self = Self(u32::MAX);

    #[inline(always)]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    #[inline(always)]
    pub fn get(&self) -> Option<usize> {
        if self.is_none() {
            None
        } else {
            Some(self.0 as usize)
        }
    }

    fn from_usize(index: usize) -> Self {
        Self(index as u32)
    }
}

/// A field node or a value node.
///
/// Field nodes carry the field name in `span` and the head of their value
/// chain in `value`. Value nodes carry one line of the value in `span` and
/// have no `value`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node<'a> {
    pub span: Span<'a>,
    pub next: NodeIndex,
    pub value: NodeIndex,
}

impl Node<'_> {
    const SENTINEL: Node<'static> = Node {
        span: Span::EMPTY,
        next: NodeIndex::NONE,
        value: NodeIndex::NONE,
    };
}

#[derive(Debug)]
pub(crate) struct FieldArena<'a> {
    nodes: Box<[Node<'a>]>,
    max_fields: usize,
    max_lines: usize,
    /// Last field node in use.
    tail: NodeIndex,
    len: usize,
}

impl<'a> FieldArena<'a> {
    pub fn new(max_fields: usize, max_lines: usize) -> Result<Self, ParseError> {
        if max_lines == 0 {
            return Err(ParseError::InvalidArgument);
        }
        let stride = max_lines + 1;
        let total = max_fields
            .checked_mul(stride)
            .filter(|total| *total < u32::MAX as usize)
            .ok_or(ParseError::InvalidArgument)?;

        let mut nodes = vec![Node::SENTINEL; total].into_boxed_slice();
        for field in 0..max_fields {
            let base = field * stride;
            nodes[base].value = NodeIndex::from_usize(base + 1);
            if field + 1 < max_fields {
                nodes[base].next = NodeIndex::from_usize(base + stride);
            }
            for line in 1..max_lines {
                nodes[base + line].next = NodeIndex::from_usize(base + line + 1);
            }
        }

        Ok(Self {
            nodes,
            max_fields,
            max_lines,
            tail: NodeIndex::NONE,
            len: 0,
        })
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// First field node of the chain.
    pub fn head(&self) -> NodeIndex {
        if self.max_fields == 0 {
            NodeIndex::NONE
        } else {
            NodeIndex(0)
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn max_fields(&self) -> usize {
        self.max_fields
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Reset every node to the sentinel state. Links are kept.
    pub fn clear(&mut self) {
        for node in self.nodes.iter_mut() {
            node.span = Span::EMPTY;
        }
        self.tail = NodeIndex::NONE;
        self.len = 0;
    }

    /// Fill the next unused field node.
    pub fn open(&mut self, name: Span<'a>, chunk: Span<'a>) -> Result<(), ParseError> {
        let slot = match self.tail.get() {
            None => self.head(),
            Some(tail) => self.nodes[tail].next,
        };
        let Some(slot) = slot.get() else {
            log::debug!("header arena full ({} fields)", self.max_fields);
            return Err(ParseError::Capacity);
        };
        let value = self.nodes[slot].value.get().ok_or(ParseError::Capacity)?;

        self.nodes[slot].span = name;
        self.nodes[value].span = chunk;
        self.tail = NodeIndex::from_usize(slot);
        self.len += 1;
        Ok(())
    }

    /// Write `chunk` into the first unused value node of the last open field.
    pub fn extend(&mut self, chunk: Span<'a>) -> Result<(), ParseError> {
        let tail = self.tail.get().ok_or(ParseError::Syntax)?;
        let mut cursor = self.nodes[tail].value;
        while let Some(index) = cursor.get() {
            if self.nodes[index].span.is_empty() {
                self.nodes[index].span = chunk;
                return Ok(());
            }
            cursor = self.nodes[index].next;
        }
        log::debug!(
            "header arena full ({} lines for field {})",
            self.max_lines,
            self.nodes[tail].span
        );
        Err(ParseError::Capacity)
    }
}
