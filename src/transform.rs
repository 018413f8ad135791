use std::cmp::min;

use super::ops::Len;
use super::{Attributes, Delta, Op, OpKind};

/// Implemented by types that can transform a concurrent value to make the
/// two behave commutatively (i.e. order-independent).
///
/// For deltas, `a.transform(&b, priority)` rewrites `b` so that it applies
/// after `a`, given that both were made against the same base. With
/// `priority`, the receiver is treated as having happened first wherever the
/// two operations tie (simultaneous inserts at one position, attribute
/// changes to the same range).
pub trait Transform<Rhs> {
    /// Output type that transforming another value with the receiver
    /// produces.
    type Output;

    /// Transforms the given value with the receiver.
    fn transform(self, rhs: Rhs, priority: bool) -> Self::Output;
}

impl Transform<&Delta> for &Delta {
    type Output = Delta;

    fn transform(self, other: &Delta, priority: bool) -> Delta {
        let mut this_iter = self.op_iter();
        let mut other_iter = other.op_iter();

        let mut result = Delta::new();

        while this_iter.has_next() || other_iter.has_next() {
            if this_iter.is_next_insert() && (priority || !other_iter.is_next_insert()) {
                // other's operations shift past this's insertion
                let len = this_iter.take(usize::MAX).len();
                result.push(Op::retain(len, None));
            } else if other_iter.is_next_insert() {
                result.push(other_iter.take(usize::MAX));
            } else {
                let len = min(this_iter.peek_len(), other_iter.peek_len());
                let this_op = this_iter.take(len);
                let other_op = other_iter.take(len);

                if this_op.is_delete() {
                    // other's operation covered content this already removed
                    continue;
                } else if other_op.is_delete() {
                    result.push(other_op);
                } else {
                    let attributes = Attributes::transform(
                        this_op.attributes(),
                        other_op.attributes(),
                        priority,
                    );
                    result.push(Op::retain(len, attributes));
                }
            }
        }

        result.trim()
    }
}

impl Delta {
    /// Adjusts a caret position through this delta.
    ///
    /// Deletions ahead of the position pull it back, insertions push it
    /// forward. When the position sits exactly on an insertion boundary,
    /// `force` decides whether it is pushed past the new content or stays
    /// put.
    pub fn transform_position(&self, index: usize, force: bool) -> usize {
        let mut index = index;
        let mut offset = 0;
        let mut iter = self.op_iter();

        while iter.has_next() && offset <= index {
            let len = iter.peek_len();
            let kind = iter.peek_kind();
            iter.take(usize::MAX);

            if kind == OpKind::Delete {
                index -= min(len, index - offset);
                continue;
            }
            if kind == OpKind::Insert && (offset < index || force) {
                index += len;
            }
            offset += len;
        }

        index
    }
}
