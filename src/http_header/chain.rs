//! Growable header storage.
//!
//! Nodes are owned by plain vectors and released when dropped. Slots past
//! `len` are kept in the sentinel state so a clear without release can hand
//! them back to the next parse.

use crate::error::ParseError;
use crate::span::Span;

#[derive(Debug, Clone)]
pub(crate) struct FieldNode<'a> {
    pub name: Span<'a>,
    /// One entry per value line; the first entry always exists.
    pub chunks: Vec<Span<'a>>,
}

#[derive(Debug, Default)]
pub(crate) struct FieldChain<'a> {
    fields: Vec<FieldNode<'a>>,
    len: usize,
}

impl<'a> FieldChain<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields in use.
    pub fn fields(&self) -> &[FieldNode<'a>] {
        &self.fields[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of field nodes held, in use or not.
    pub fn retained(&self) -> usize {
        self.fields.len()
    }

    pub fn clear(&mut self, release: bool) {
        if release {
            self.fields = Vec::new();
        } else {
            for field in self.fields.iter_mut() {
                field.name = Span::EMPTY;
                field.chunks.fill(Span::EMPTY);
            }
        }
        self.len = 0;
    }

    pub fn open(
        &mut self,
        name: Span<'a>,
        chunk: Span<'a>,
        no_allocation: bool,
    ) -> Result<(), ParseError> {
        if let Some(field) = self.fields.get_mut(self.len) {
            field.name = name;
            field.chunks[0] = chunk;
        } else if no_allocation {
            log::debug!("refusing to allocate field node #{}", self.len + 1);
            return Err(ParseError::Capacity);
        } else {
            self.fields.push(FieldNode {
                name,
                chunks: vec![chunk],
            });
        }
        self.len += 1;
        Ok(())
    }

    pub fn extend(&mut self, chunk: Span<'a>, no_allocation: bool) -> Result<(), ParseError> {
        let field = match self.len.checked_sub(1) {
            Some(last) => &mut self.fields[last],
            None => return Err(ParseError::Syntax),
        };
        if field.chunks[0].is_empty() {
            field.chunks[0] = chunk;
        } else if let Some(slot) = field.chunks[1..].iter_mut().find(|c| c.is_empty()) {
            *slot = chunk;
        } else if no_allocation {
            log::debug!("refusing to allocate value node for field {}", field.name);
            return Err(ParseError::Capacity);
        } else {
            field.chunks.push(chunk);
        }
        Ok(())
    }
}
