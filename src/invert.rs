use super::ops::Len;
use super::{Attributes, Delta, Op};

impl Delta {
    /// Returns the delta that rolls this change back, given the document
    /// (insert-only delta) it was applied to.
    ///
    /// Composing `base.compose(self).compose(self.invert(base))` yields
    /// `base` again. Inserts invert to deletes, deletes restore the deleted
    /// slice of the base, and attribute retains invert each covered base
    /// operation's attributes.
    pub fn invert(&self, base: &Delta) -> Delta {
        let mut inverted = Delta::new();
        let mut base_index = 0;

        for op in self.ops() {
            match op {
                Op::Insert(insert) => {
                    inverted.push(Op::delete(insert.len()));
                }
                Op::Retain(retain) if retain.attributes.is_none() => {
                    inverted.push(Op::retain(retain.retain, None));
                    base_index += retain.retain;
                }
                Op::Retain(retain) => {
                    let end = base_index.saturating_add(retain.retain);
                    for base_op in base.slice(base_index..end).ops() {
                        let attributes = Attributes::invert(
                            retain.attributes.as_ref(),
                            base_op.attributes(),
                        );
                        inverted.push(Op::retain(base_op.len(), attributes));
                    }
                    base_index = end;
                }
                Op::Delete(delete) => {
                    let end = base_index.saturating_add(delete.delete);
                    for base_op in base.slice(base_index..end).ops() {
                        inverted.push(base_op.clone());
                    }
                    base_index = end;
                }
            }
        }

        inverted.trim()
    }
}
