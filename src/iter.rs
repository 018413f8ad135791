use super::ops::{Len, Retain};
use super::{Delta, DeltaError, Op, OpKind};

/// Cursor over a [`Delta`] that yields sub-operations of a requested length,
/// as used by [`Compose`](crate::Compose), [`Transform`](crate::Transform)
/// and [`Delta::slice`].
///
/// Past the end of the delta the cursor keeps producing plain retains of
/// whatever length is asked for. That lets two deltas of different lengths
/// be walked in lock-step without either loop special-casing exhaustion; the
/// final [`trim`](Delta::trim) drops the padding again.
///
/// The cursor captures the delta's revision at construction and every
/// consuming call re-checks it, failing with
/// [`DeltaError::ConcurrentModification`] if the delta was structurally
/// mutated in between. (Safe Rust already prevents this through the shared
/// borrow; the check keeps the contract observable for callers that reach
/// the delta through other means.)
pub struct OpIter<'a> {
    delta: &'a Delta,
    index: usize,
    offset: usize,
    revision: u64,
}

impl<'a> OpIter<'a> {
    /// Returns a new cursor positioned at the start of the given delta.
    pub fn new(delta: &'a Delta) -> OpIter<'a> {
        OpIter {
            delta,
            index: 0,
            offset: 0,
            revision: delta.revision(),
        }
    }

    /// Returns the operation the cursor is inside of, if any.
    pub fn peek(&self) -> Option<&'a Op> {
        self.delta.ops().get(self.index)
    }

    /// Returns the remaining length of the current operation, or
    /// `usize::MAX` (the unbounded length) when the cursor is past the end.
    pub fn peek_len(&self) -> usize {
        match self.peek() {
            Some(op) => op.len() - self.offset,
            None => usize::MAX,
        }
    }

    /// Returns the kind of the next operation. Past the end this is
    /// [`OpKind::Retain`], matching the synthetic retains produced there.
    pub fn peek_kind(&self) -> OpKind {
        self.peek().map_or(OpKind::Retain, Op::kind)
    }

    /// Returns whether the cursor is still inside the delta.
    pub fn has_next(&self) -> bool {
        self.peek_len() < usize::MAX
    }

    /// Returns whether the next operation is an insert.
    pub fn is_next_insert(&self) -> bool {
        self.peek_kind() == OpKind::Insert
    }

    /// Returns whether the next operation is a retain.
    pub fn is_next_retain(&self) -> bool {
        self.peek_kind() == OpKind::Retain
    }

    /// Returns whether the next operation is a delete.
    pub fn is_next_delete(&self) -> bool {
        self.peek_kind() == OpKind::Delete
    }

    /// Consumes and returns the rest of the current operation.
    pub fn next(&mut self) -> Result<Op, DeltaError> {
        self.next_len(usize::MAX)
    }

    /// Consumes and returns up to `len` characters of the current operation
    /// as a new operation. Past the end of the delta this returns a plain
    /// retain of exactly `len`.
    pub fn next_len(&mut self, len: usize) -> Result<Op, DeltaError> {
        self.check_revision()?;
        Ok(self.take(len))
    }

    /// Consumes and discards `len` characters, crossing operation
    /// boundaries as needed.
    pub fn skip(&mut self, mut len: usize) -> Result<(), DeltaError> {
        self.check_revision()?;
        while len > 0 && self.has_next() {
            len -= self.take(len).len();
        }
        Ok(())
    }

    /// Consumes and returns all remaining operations, the first possibly
    /// shortened to the part the cursor had not yet passed.
    pub fn rest(&mut self) -> Result<Vec<Op>, DeltaError> {
        self.check_revision()?;
        Ok(self.take_rest())
    }

    fn check_revision(&self) -> Result<(), DeltaError> {
        let found = self.delta.revision();
        if found == self.revision {
            Ok(())
        } else {
            Err(DeltaError::ConcurrentModification {
                expected: self.revision,
                found,
            })
        }
    }

    pub(crate) fn take(&mut self, len: usize) -> Op {
        let Some(op) = self.peek() else {
            return Op::Retain(Retain {
                retain: len,
                attributes: None,
            });
        };

        let taken = op.slice(self.offset, len);
        if self.offset + taken.len() < op.len() {
            self.offset += taken.len();
        } else {
            self.index += 1;
            self.offset = 0;
        }

        taken
    }

    pub(crate) fn take_rest(&mut self) -> Vec<Op> {
        if !self.has_next() {
            return Vec::new();
        }

        let mut rest = vec![self.take(usize::MAX)];
        rest.extend_from_slice(&self.delta.ops()[self.index..]);
        self.index = self.delta.ops().len();
        self.offset = 0;

        rest
    }
}
