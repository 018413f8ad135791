use std::cmp::min;

use super::ops::{Insert, Retain};
use super::{Attributes, Delta, Op};

/// Implemented by types that can apply a series of operations in sequence.
///
/// For deltas, `a.compose(&b)` returns the single delta whose application
/// equals applying `a` and then `b`. Composition is associative and the
/// empty delta is its identity.
pub trait Compose<Rhs> {
    /// Output type that applying a series of operations to this type
    /// produces.
    type Output;

    /// Applies the given series of operations to the receiver and returns
    /// the result.
    fn compose(self, rhs: Rhs) -> Self::Output;
}

impl Compose<&Delta> for &Delta {
    type Output = Delta;

    fn compose(self, other: &Delta) -> Delta {
        let mut this_iter = self.op_iter();
        let mut other_iter = other.op_iter();

        let mut result = Delta::new();

        // A leading plain retain in `other` passes the head of `self`
        // through untouched; whole inserts covered by it are copied
        // verbatim instead of being sliced and re-merged.
        if let Some(Op::Retain(first)) = other_iter.peek() {
            if first.attributes.is_none() {
                let mut left = first.retain;
                while this_iter.is_next_insert() && this_iter.peek_len() <= left {
                    left -= this_iter.peek_len();
                    result.push(this_iter.take(usize::MAX));
                }
                if first.retain - left > 0 {
                    other_iter.take(first.retain - left);
                }
            }
        }

        while this_iter.has_next() || other_iter.has_next() {
            if other_iter.is_next_insert() {
                // new content does not consume anything from `self`
                result.push(other_iter.take(usize::MAX));
            } else if this_iter.is_next_delete() {
                // content `self` already removed cannot be touched by `other`
                result.push(this_iter.take(usize::MAX));
            } else {
                let len = min(this_iter.peek_len(), other_iter.peek_len());
                let this_op = this_iter.take(len);
                let other_op = other_iter.take(len);

                match other_op {
                    Op::Retain(other_retain) => {
                        // the result keeps this's shape; nulls survive only
                        // between two retains, where the erasure still has a
                        // base to act on downstream
                        let attributes = Attributes::compose(
                            this_op.attributes(),
                            other_retain.attributes.as_ref(),
                            this_op.is_retain(),
                        );
                        let op = match this_op {
                            Op::Retain(_) => Op::Retain(Retain {
                                retain: len,
                                attributes,
                            }),
                            Op::Insert(insert) => Op::Insert(Insert {
                                insert: insert.insert,
                                attributes,
                            }),
                            Op::Delete(_) => unreachable!("deletes are consumed before length matching"),
                        };

                        let tail = op.clone();
                        result.push(op);

                        // once `other` is exhausted the rest of `self` passes
                        // through unchanged
                        if !other_iter.has_next() && result.ops().last() == Some(&tail) {
                            let rest = Delta::from(this_iter.take_rest());
                            return result.concat(&rest).trim();
                        }
                    }
                    Op::Delete(delete) => {
                        if this_op.is_retain() {
                            result.push(Op::Delete(delete));
                        }
                        // a deleted insert cancels out entirely
                    }
                    Op::Insert(_) => unreachable!("other inserts are consumed before length matching"),
                }
            }
        }

        result.trim()
    }
}

#[cfg(test)]
mod tests {
    use crate::attrs;

    use super::{Compose, Delta};
    use serde_json::Value;

    #[test]
    fn test_insert_insert() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().insert("B", None);

        assert_eq!(a.compose(&b), Delta::new().insert("BA", None));
    }

    #[test]
    fn test_insert_retain() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().retain(1, attrs! { "bold" => true, "color" => "red" });

        assert_eq!(
            a.compose(&b),
            Delta::new().insert("A", attrs! { "bold" => true, "color" => "red" }),
        );
    }

    #[test]
    fn test_insert_delete() {
        let a = Delta::new().insert("A", None);
        let b = Delta::new().delete(1);

        assert_eq!(a.compose(&b), Delta::new());
    }

    #[test]
    fn test_retain_insert() {
        let a = Delta::new().retain(1, attrs! { "color" => "blue" });
        let b = Delta::new().insert("B", None);

        assert_eq!(
            a.compose(&b),
            Delta::new()
                .insert("B", None)
                .retain(1, attrs! { "color" => "blue" }),
        );
    }

    #[test]
    fn test_retain_retain() {
        let a = Delta::new().retain(1, attrs! { "color" => "blue" });
        let b = Delta::new().retain(1, attrs! { "bold" => true, "color" => "red" });

        assert_eq!(
            a.compose(&b),
            Delta::new().retain(1, attrs! { "bold" => true, "color" => "red" }),
        );
    }

    #[test]
    fn test_retain_delete() {
        let a = Delta::new().retain(1, attrs! { "color" => "blue" });
        let b = Delta::new().delete(1);

        assert_eq!(a.compose(&b), Delta::new().delete(1));
    }

    #[test]
    fn test_delete_insert() {
        let a = Delta::new().delete(1);
        let b = Delta::new().insert("B", None);

        assert_eq!(a.compose(&b), Delta::new().insert("B", None).delete(1));
    }

    #[test]
    fn test_delete_retain() {
        let a = Delta::new().delete(1);
        let b = Delta::new().retain(1, attrs! { "bold" => true });

        assert_eq!(
            a.compose(&b),
            Delta::new().delete(1).retain(1, attrs! { "bold" => true }),
        );
    }

    #[test]
    fn test_delete_delete() {
        let a = Delta::new().delete(1);
        let b = Delta::new().delete(2);

        assert_eq!(a.compose(&b), Delta::new().delete(3));
    }

    #[test]
    fn test_insert_mid() {
        let a = Delta::new().insert("Hello", None);
        let b = Delta::new().retain(3, None).insert("X", None);

        assert_eq!(a.compose(&b), Delta::new().insert("HelXlo", None));
    }

    #[test]
    fn test_insert_in_middle_of_document() {
        let a = Delta::new().insert("Hello", None);
        let b = Delta::new().retain(5, None).insert(" World", None);

        assert_eq!(a.compose(&b), Delta::new().insert("Hello World", None));
    }

    #[test]
    fn test_delete_all() {
        let a = Delta::new().retain(4, None).insert("Hello", None);
        let b = Delta::new().delete(9);

        assert_eq!(a.compose(&b), Delta::new().delete(4));
    }

    #[test]
    fn test_retain_more_than_length() {
        let a = Delta::new().insert("Hello", None);
        let b = Delta::new().retain(10, None);

        assert_eq!(a.compose(&b), Delta::new().insert("Hello", None));
    }

    #[test]
    fn test_remove_attributes() {
        let a = Delta::new().insert("A", attrs! { "bold" => true });
        let b = Delta::new().retain(1, attrs! { "bold" => Value::Null });

        assert_eq!(a.compose(&b), Delta::new().insert("A", None));
    }

    #[test]
    fn test_retain_keeps_null_for_later() {
        let a = Delta::new().retain(1, attrs! { "color" => "blue" });
        let b = Delta::new().retain(1, attrs! { "color" => Value::Null });

        assert_eq!(
            a.compose(&b),
            Delta::new().retain(1, attrs! { "color" => Value::Null }),
        );
    }

    #[test]
    fn test_retain_start_optimization() {
        let a = Delta::new()
            .insert("A", attrs! { "bold" => true })
            .insert("B", None)
            .insert("C", attrs! { "bold" => true })
            .delete(1);
        let b = Delta::new().retain(3, None).insert("D", None);

        assert_eq!(
            a.compose(&b),
            Delta::new()
                .insert("A", attrs! { "bold" => true })
                .insert("B", None)
                .insert("C", attrs! { "bold" => true })
                .insert("D", None)
                .delete(1),
        );
    }

    #[test]
    fn test_retain_start_optimization_split() {
        let a = Delta::new()
            .insert("A", attrs! { "bold" => true })
            .insert("B", None)
            .insert("C", attrs! { "bold" => true })
            .retain(5, None)
            .delete(1);
        let b = Delta::new().retain(4, None).insert("D", None);

        assert_eq!(
            a.compose(&b),
            Delta::new()
                .insert("A", attrs! { "bold" => true })
                .insert("B", None)
                .insert("C", attrs! { "bold" => true })
                .retain(1, None)
                .insert("D", None)
                .retain(4, None)
                .delete(1),
        );
    }

    #[test]
    fn test_retain_end_optimization() {
        let a = Delta::new()
            .insert("A", attrs! { "bold" => true })
            .insert("B", None)
            .insert("C", attrs! { "bold" => true });
        let b = Delta::new().delete(1);

        assert_eq!(
            a.compose(&b),
            Delta::new()
                .insert("B", None)
                .insert("C", attrs! { "bold" => true }),
        );
    }

    #[test]
    fn test_retain_end_optimization_join() {
        let a = Delta::new()
            .insert("A", attrs! { "bold" => true })
            .insert("B", None)
            .insert("C", attrs! { "bold" => true })
            .insert("D", None)
            .insert("E", attrs! { "bold" => true })
            .insert("F", None);
        let b = Delta::new().retain(1, None).delete(1);

        assert_eq!(
            a.compose(&b),
            Delta::new()
                .insert("AC", attrs! { "bold" => true })
                .insert("D", None)
                .insert("E", attrs! { "bold" => true })
                .insert("F", None),
        );
    }

    #[test]
    fn test_compose_identity() {
        let a = Delta::new()
            .insert("Hello", attrs! { "bold" => true })
            .retain(3, None)
            .delete(2);

        assert_eq!(a.compose(&Delta::new()), a);
        assert_eq!(Delta::new().compose(&a), a);
    }

    #[test]
    fn test_compose_associativity() {
        let a = Delta::new().insert("Hello", None);
        let b = Delta::new().retain(5, None).insert(" World", None);
        let c = Delta::new().retain(2, attrs! { "bold" => true }).delete(4);

        assert_eq!(a.compose(&b).compose(&c), a.compose(&b.compose(&c)));
    }
}
