use arbitrary::Arbitrary;
use serde::{Deserialize, Serialize};

use super::ops::{Delete, Insert, Len, Retain};
use super::Attributes;

/// Individual insert, retain or delete operation.
///
/// The untagged serde representation tries the variants in order, so exactly
/// one of the payload keys `insert`, `retain` and `delete` selects the kind.
/// Unknown sibling keys (including `attributes` on a delete) are ignored.
#[derive(Arbitrary, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Op {
    /// Represents an insert-operation with text and optional attributes.
    Insert(Insert),

    /// Represents a retain-operation with a length and optional attributes.
    Retain(Retain),

    /// Represents a delete-operation with a length.
    Delete(Delete),
}

/// The kind of an [`Op`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// An insert-operation.
    Insert,
    /// A retain-operation.
    Retain,
    /// A delete-operation.
    Delete,
}

impl Op {
    /// Returns a new insert operation. Empty attribute maps are collapsed to
    /// absence, the canonical form.
    pub fn insert(text: impl Into<String>, attributes: impl Into<Option<Attributes>>) -> Op {
        Op::Insert(Insert {
            insert: text.into(),
            attributes: attributes.into().filter(|a| !a.is_empty()),
        })
    }

    /// Returns a new retain operation. Empty attribute maps are collapsed to
    /// absence, the canonical form.
    pub fn retain(len: usize, attributes: impl Into<Option<Attributes>>) -> Op {
        Op::Retain(Retain {
            retain: len,
            attributes: attributes.into().filter(|a| !a.is_empty()),
        })
    }

    /// Returns a new delete operation.
    pub fn delete(len: usize) -> Op {
        Op::Delete(Delete { delete: len })
    }

    /// Returns the kind of this operation.
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Insert(_) => OpKind::Insert,
            Op::Retain(_) => OpKind::Retain,
            Op::Delete(_) => OpKind::Delete,
        }
    }

    /// Returns whether this is an insert operation.
    pub fn is_insert(&self) -> bool {
        matches!(self, Op::Insert(_))
    }

    /// Returns whether this is a retain operation.
    pub fn is_retain(&self) -> bool {
        matches!(self, Op::Retain(_))
    }

    /// Returns whether this is a delete operation.
    pub fn is_delete(&self) -> bool {
        matches!(self, Op::Delete(_))
    }

    /// Returns this operation's attributes. Always absent for deletes.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Op::Insert(insert) => insert.attributes.as_ref(),
            Op::Retain(retain) => retain.attributes.as_ref(),
            Op::Delete(_) => None,
        }
    }

    /// Returns whether this operation carries no attributes (absent or
    /// empty map).
    pub fn is_plain(&self) -> bool {
        self.attributes().map_or(true, Attributes::is_empty)
    }

    /// Returns whether this operation has length zero and is therefore a
    /// no-op inside a delta.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sub-operation covering `len` characters starting at
    /// `offset`, clamped to this operation's length. Attributes are
    /// inherited.
    pub fn slice(&self, offset: usize, len: usize) -> Op {
        match self {
            Op::Insert(insert) => Op::Insert(insert.slice(offset, len)),
            Op::Retain(retain) => Op::Retain(retain.slice(offset, len)),
            Op::Delete(delete) => Op::Delete(delete.slice(offset, len)),
        }
    }
}

impl Len for Op {
    fn len(&self) -> usize {
        match self {
            Op::Insert(insert) => insert.len(),
            Op::Retain(retain) => retain.len(),
            Op::Delete(delete) => delete.len(),
        }
    }
}

impl From<Insert> for Op {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Retain> for Op {
    fn from(value: Retain) -> Self {
        Self::Retain(value)
    }
}

impl From<Delete> for Op {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
