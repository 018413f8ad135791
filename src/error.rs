use thiserror::Error;

/// Errors surfaced by the fallible APIs of this crate.
///
/// The pure algorithms ([`Compose`](crate::Compose),
/// [`Transform`](crate::Transform), [`Delta::invert`](crate::Delta::invert))
/// never fail on well-formed input; errors come from parsing the JSON carrier
/// and from using a cursor whose source delta changed underneath it.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DeltaError {
    /// The JSON carrier did not describe a well-formed operation: no
    /// recognized payload key, a negative or non-integer length, or a retain
    /// of the reserved unbounded value.
    #[error("malformed operation: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A cursor observed a structural mutation of its source delta. The
    /// revision captured at construction no longer matches the delta's.
    #[error("delta modified during iteration (revision {expected} captured, now {found})")]
    ConcurrentModification {
        /// Revision of the delta when the cursor was created.
        expected: u64,
        /// Revision of the delta at the failing call.
        found: u64,
    },
}
