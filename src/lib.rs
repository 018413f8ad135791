#![warn(missing_docs)]
//! Operational transformation for rich text, wire-compatible with
//! [Quill](https://quilljs.com/docs/delta/) deltas and fuzzed for
//! convergence.
//!
//! A [`Delta`] is a compact, JSON-serializable description of a rich-text
//! document or of an edit to one: a sequence of insert, retain and delete
//! operations, each optionally carrying an [`Attributes`] map of formatting.
//! Operational Transformation (OT) enables real-time collaborative editing
//! by letting two (or more) users make changes at the same time: a central
//! server transforms and broadcasts these changes so everyone converges on
//! the same state, even in the presence of severe latency.
//!
//! The algebra lives in three places: [`Compose`] collapses two sequential
//! edits into one, [`Transform`] rewrites one of two concurrent edits so
//! they commute, and [`Delta::invert`] produces the edit that undoes another
//! against a base document.
//!
//! # Usage
//!
//! ```
//! use quilt::{Compose, Delta, Transform};
//!
//! let before = Delta::new().insert("Hello World", None);
//!
//! let alice = Delta::new().retain(5, None).insert(",", None);
//! let bob = Delta::new().retain(11, None).insert("!", None);
//!
//! assert_eq!(
//!     before
//!         .compose(&alice)
//!         .compose(&alice.transform(&bob, true)),
//!     before
//!         .compose(&bob)
//!         .compose(&bob.transform(&alice, false)),
//! )
//! ```

mod attributes;
mod compose;
mod delta;
mod error;
mod invert;
mod iter;
mod op;
pub mod ops;
mod transform;

pub use attributes::Attributes;
pub use compose::Compose;
pub use delta::Delta;
pub use error::DeltaError;
pub use iter::OpIter;
pub use op::{Op, OpKind};
pub use ops::{Delete, Insert, Len, Retain};
pub use transform::Transform;

#[cfg(test)]
mod tests {
    use crate::attrs;

    use super::{Compose, Delta, Transform};

    #[test]
    fn test_end_to_end() {
        let before = Delta::new().insert("Hello World", None);

        let alice = Delta::new().retain(5, None).insert(",", None);
        let bob = Delta::new().retain(11, None).insert("!", None);

        assert_eq!(
            before
                .compose(&alice)
                .compose(&alice.transform(&bob, true)),
            before
                .compose(&bob)
                .compose(&bob.transform(&alice, false)),
        )
    }

    #[test]
    fn test_end_to_end_insert_past_end() {
        let before = Delta::new().insert("0123456", None);

        let alice = Delta::new().retain(1000, None).insert("6", None);
        let bob = Delta::new().insert("ABCD", None);

        assert_eq!(
            before
                .compose(&alice)
                .compose(&alice.transform(&bob, true)),
            before
                .compose(&bob)
                .compose(&bob.transform(&alice, false)),
        )
    }

    #[test]
    fn test_end_to_end_same_insert() {
        let before = Delta::new().retain(5, None).insert("ABCD", None);

        let alice = Delta::new().retain(5, None).insert("ABCD", None);
        let bob = Delta::new().insert("ABC", None);

        assert_eq!(
            before
                .compose(&alice)
                .compose(&alice.transform(&bob, true)),
            before
                .compose(&bob)
                .compose(&bob.transform(&alice, false)),
        )
    }

    #[test]
    fn test_end_to_end_attributes() {
        let before = Delta::new().insert("Hello, World!", attrs! { "bold" => true });

        let alice = Delta::new().retain(128, attrs! { "bold" => false });
        let bob = Delta::new();

        assert_eq!(
            before
                .compose(&alice)
                .compose(&alice.transform(&bob, true)),
            before
                .compose(&bob)
                .compose(&bob.transform(&alice, false)),
        )
    }

    #[test]
    fn test_end_to_end_attribute_tie() {
        let before = Delta::new().insert("x", None);

        let alice = Delta::new().retain(1, attrs! { "color" => "green" });
        let bob = Delta::new().retain(1, attrs! { "color" => "red" });

        assert_eq!(
            before
                .compose(&alice)
                .compose(&alice.transform(&bob, true)),
            before
                .compose(&bob)
                .compose(&bob.transform(&alice, false)),
        )
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let base = Delta::new().insert("Hello", None);
        let change = Delta::new().retain(5, None).insert(" World", None);

        let inverted = change.invert(&base);
        assert_eq!(inverted, Delta::new().retain(5, None).delete(6));
        assert_eq!(base.compose(&change).compose(&inverted), base);
    }
}
