use std::ops::{Bound, RangeBounds};

use arbitrary::{Arbitrary, Unstructured};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ops::Len;
use super::{Attributes, DeltaError, Op, OpIter};

/// Series of insert, retain and delete operations, describing either a
/// document (insert-only) or an edit against one.
///
/// The stored sequence is kept in normal form by [`push`](Delta::push): no
/// empty operations, maximal merging of adjacent operations, and an insert
/// always ahead of an adjacent delete. Two deltas are equal when their
/// operation sequences are equal; the revision counter used for cursor
/// invalidation does not participate.
///
/// On the wire a delta is a bare JSON array of operations:
///
/// ```
/// use quilt::Delta;
///
/// let delta = Delta::new().retain(5, None).insert(" World", None);
/// let encoded = serde_json::to_string(&delta).unwrap();
///
/// assert_eq!(encoded, r#"[{"retain":5},{"insert":" World"}]"#);
/// assert_eq!(serde_json::from_str::<Delta>(&encoded).unwrap(), delta);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Delta {
    ops: Vec<Op>,
    revision: u64,
}

impl Delta {
    /// Returns a new empty delta (i.e. an empty series of operations).
    pub fn new() -> Delta {
        Delta::default()
    }

    /// Returns this delta with one insert operation appended, carrying the
    /// given text and optional attributes. Inserting empty text is a no-op.
    pub fn insert(mut self, text: impl Into<String>, attributes: impl Into<Option<Attributes>>) -> Self {
        self.push(Op::insert(text, attributes));
        self
    }

    /// Returns this delta with one retain operation appended, keeping the
    /// given number of characters and optionally replacing their attributes.
    /// A `null` attribute value removes that attribute.
    pub fn retain(mut self, len: usize, attributes: impl Into<Option<Attributes>>) -> Self {
        self.push(Op::retain(len, attributes));
        self
    }

    /// Returns this delta with one delete operation appended, removing the
    /// given number of characters.
    pub fn delete(mut self, len: usize) -> Self {
        self.push(Op::delete(len));
        self
    }

    /// Appends `op`, keeping the stored sequence in normal form.
    ///
    /// Zero-length operations (including an empty-string insert) vanish.
    /// An operation that continues the final one under the same attribute
    /// map folds into it: insert text concatenates (safe because every
    /// length in this crate counts Unicode scalar values), retain and
    /// delete lengths add, spilling into a second operation instead of
    /// overflowing. An insert pushed right after a delete slots in ahead
    /// of it, since both orders describe the same edit and insert-first is
    /// the canonical one; it may then fold into an insert already sitting
    /// there.
    pub fn push(&mut self, op: Op) {
        if op.is_empty() {
            return;
        }

        self.revision += 1;

        // Where `op` belongs: at the end, except that an insert never
        // trails an adjacent delete.
        let slot = match (self.ops.last(), &op) {
            (Some(Op::Delete(_)), Op::Insert(_)) => self.ops.len() - 1,
            _ => self.ops.len(),
        };

        match (self.ops[..slot].last_mut(), op) {
            (Some(Op::Insert(tail)), Op::Insert(next))
                if tail.attributes == next.attributes =>
            {
                tail.insert.push_str(&next.insert);
            }
            (Some(Op::Retain(tail)), Op::Retain(next))
                if tail.attributes == next.attributes =>
            {
                let headroom = usize::MAX - tail.retain;
                if next.retain > headroom {
                    tail.retain = usize::MAX;
                    self.ops.push(Op::retain(next.retain - headroom, next.attributes));
                } else {
                    tail.retain += next.retain;
                }
            }
            (Some(Op::Delete(tail)), Op::Delete(next)) => {
                let headroom = usize::MAX - tail.delete;
                if next.delete > headroom {
                    tail.delete = usize::MAX;
                    self.ops.push(Op::delete(next.delete - headroom));
                } else {
                    tail.delete += next.delete;
                }
            }
            (_, op) => self.ops.insert(slot, op),
        }
    }

    /// Returns this delta without its trailing plain retain, if any. Such a
    /// retain does not change the document and is dropped from every
    /// algorithm result.
    pub fn trim(mut self) -> Self {
        while let Some(op) = self.ops.last() {
            if op.is_retain() && op.is_plain() {
                self.ops.pop();
                self.revision += 1;
            } else {
                break;
            }
        }

        self
    }

    /// Returns this delta followed by `other`. The boundary pair is merged
    /// when the normal form allows it.
    pub fn concat(&self, other: &Delta) -> Delta {
        let mut delta = self.clone();

        if let Some((first, rest)) = other.ops.split_first() {
            delta.push(first.clone());
            if !rest.is_empty() {
                delta.ops.extend_from_slice(rest);
                delta.revision += 1;
            }
        }

        delta
    }

    /// Returns the sub-delta covering the given range of this delta's
    /// length.
    ///
    /// ```
    /// use quilt::Delta;
    ///
    /// let delta = Delta::new().insert("Hello", None).delete(2);
    ///
    /// assert_eq!(delta.slice(3..), Delta::new().insert("lo", None).delete(2));
    /// ```
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Delta {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => usize::MAX,
        };

        let mut delta = Delta::new();
        let mut iter = self.op_iter();
        let mut index = 0;

        while index < end && iter.has_next() {
            if index < start {
                let skipped = iter.take(start - index);
                index += skipped.len();
            } else {
                let op = iter.take(end - index);
                index += op.len();
                delta.push(op);
            }
        }

        delta
    }

    /// Returns a cursor over this delta's operations.
    pub fn op_iter(&self) -> OpIter<'_> {
        OpIter::new(self)
    }

    /// Returns the stored operations in order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Returns whether this delta contains no effective operations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the difference this delta makes to the length of a document
    /// it is applied to.
    pub fn change_len(&self) -> isize {
        self.ops.iter().fold(0, |len, op| match op {
            Op::Insert(insert) => len + insert.len() as isize,
            Op::Delete(delete) => len - delete.len() as isize,
            Op::Retain(_) => len,
        })
    }

    /// Parses a delta from its JSON encoding, a bare array of operations.
    /// The operations are taken verbatim; collect into a delta via
    /// [`FromIterator`] to renormalize foreign input.
    pub fn from_json(json: &str) -> Result<Delta, DeltaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes this delta as JSON, a bare array of operations.
    pub fn to_json(&self) -> Result<String, DeltaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }
}

impl Len for Delta {
    fn len(&self) -> usize {
        self.ops.iter().map(Len::len).sum()
    }
}

impl PartialEq for Delta {
    fn eq(&self, other: &Delta) -> bool {
        self.ops == other.ops
    }
}

impl From<Vec<Op>> for Delta {
    fn from(ops: Vec<Op>) -> Self {
        Delta { ops, revision: 0 }
    }
}

impl Extend<Op> for Delta {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Op>,
    {
        iter.into_iter().for_each(|op| self.push(op))
    }
}

impl FromIterator<Op> for Delta {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Op>,
    {
        let mut delta = Delta::new();
        delta.extend(iter);
        delta
    }
}

impl Serialize for Delta {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.ops.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Op>::deserialize(deserializer).map(Delta::from)
    }
}

impl<'a> Arbitrary<'a> for Delta {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Delta> {
        u.arbitrary_iter::<Op>()?.collect()
    }
}
