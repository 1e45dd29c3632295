//! Per-resource booking conflict decisions.
//!
//! The decision itself is pure and synchronous; fetching each resource's
//! events and aggregating across resources is the resolver's job.

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;

/// Opaque identifier that lets a booking be excluded from conflicting
/// with itself while it is being edited.
///
/// Produced by the resolver from a marker in event metadata; the conflict
/// checker only ever compares keys for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExclusionKey(String);

impl ExclusionKey {
    pub fn new(key: impl Into<String>) -> Self {
        ExclusionKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An existing interval on a resource, as seen by the conflict checker.
#[derive(Debug, Clone)]
pub struct TaggedInterval {
    pub interval: TimeInterval,
    pub exclusion_key: Option<ExclusionKey>,
    pub cancelled: bool,
}

/// Availability verdict for one resource. The resolver returns these in
/// caller-supplied resource order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceAvailability {
    pub resource_name: String,
    pub api_label: String,
    pub is_available: bool,
}

/// Decide whether `candidate` can be booked on a resource with the given
/// existing intervals.
///
/// Cancelled intervals never conflict. Intervals tagged with the caller's
/// exclusion key never conflict (re-checking a slot while editing the
/// booking that occupies it). Everything else conflicts iff it strictly
/// overlaps the candidate, so back-to-back bookings are allowed.
pub fn is_resource_free(
    candidate: TimeInterval,
    existing: &[TaggedInterval],
    exclude: Option<&ExclusionKey>,
) -> bool {
    !existing
        .iter()
        .filter(|tagged| !tagged.cancelled)
        .filter(|tagged| match (&tagged.exclusion_key, exclude) {
            (Some(key), Some(excluded)) => key != excluded,
            _ => true,
        })
        .any(|tagged| tagged.interval.overlaps(&candidate))
}
