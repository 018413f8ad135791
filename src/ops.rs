//! Types that represent the insert, retain and delete operations of a delta.
//!
//! Each struct's field names are exactly the keys of its wire encoding, so
//! the serde derives produce the canonical JSON shape (`{"insert": "abc"}`,
//! `{"retain": 5, "attributes": {...}}`, `{"delete": 3}`) without any custom
//! serialization code.

use std::cmp::min;

use arbitrary::Arbitrary;
use serde::{Deserialize, Deserializer, Serialize};

use super::Attributes;

/// Implemented by types that have a length: the operations, [`Op`](super::Op)
/// and [`Delta`](super::Delta).
pub trait Len {
    /// Should return the exact length of the receiver, counted in Unicode
    /// scalar values for text.
    fn len(&self) -> usize;
}

/// Represents an operation that inserts text with optional attributes.
#[derive(Arbitrary, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    /// The text this operation adds to the document.
    pub insert: String,

    /// Formatting applied to the inserted text. Absent means unformatted.
    /// This is the document's final state for the range, so a `null` value
    /// here carries no meaning and is dropped when attributes are composed
    /// onto it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Insert {
    /// Returns a plain retain operation with the same length as this
    /// insert's text.
    pub fn as_retain(&self) -> Retain {
        Retain {
            retain: self.len(),
            attributes: None,
        }
    }

    /// Returns the sub-operation covering `len` characters starting at
    /// `offset`, clamped to the text.
    pub fn slice(&self, offset: usize, len: usize) -> Insert {
        Insert {
            insert: self.insert.chars().skip(offset).take(len).collect(),
            attributes: self.attributes.clone(),
        }
    }
}

impl Len for Insert {
    fn len(&self) -> usize {
        self.insert.chars().count()
    }
}

/// Represents an operation that keeps a run of the document, optionally
/// updating its attributes.
#[derive(Arbitrary, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Retain {
    /// The number of characters to keep.
    #[serde(deserialize_with = "finite_len")]
    pub retain: usize,

    /// Attribute changes applied to the retained run. A `null` value removes
    /// that attribute from the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Retain {
    /// Returns the sub-operation covering `len` characters starting at
    /// `offset`, clamped to this operation's length.
    pub fn slice(&self, offset: usize, len: usize) -> Retain {
        Retain {
            retain: min(len, self.retain.saturating_sub(offset)),
            attributes: self.attributes.clone(),
        }
    }
}

impl Len for Retain {
    fn len(&self) -> usize {
        self.retain
    }
}

/// Represents an operation that removes a run of the document. Deletes never
/// carry attributes.
#[derive(Arbitrary, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    /// The number of characters to remove.
    #[serde(deserialize_with = "finite_len")]
    pub delete: usize,
}

impl Delete {
    /// Returns the sub-operation covering `len` characters starting at
    /// `offset`, clamped to this operation's length.
    pub fn slice(&self, offset: usize, len: usize) -> Delete {
        Delete {
            delete: min(len, self.delete.saturating_sub(offset)),
        }
    }
}

impl Len for Delete {
    fn len(&self) -> usize {
        self.delete
    }
}

/// `usize::MAX` is reserved as the unbounded length produced by a cursor
/// reading past the end of a delta. It never appears on the wire.
fn finite_len<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let len = usize::deserialize(deserializer)?;
    if len == usize::MAX {
        return Err(serde::de::Error::custom("operation length out of range"));
    }
    Ok(len)
}
