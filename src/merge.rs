//! Merging interval sets into minimal disjoint form.
//!
//! Both availability paths reduce to this: a bay's existing bookings and a
//! day's schedule rows arrive unordered and possibly overlapping, and
//! everything downstream wants the minimal sorted set of disjoint
//! intervals with the same union.

use crate::interval::TimeInterval;

/// Collapse possibly-overlapping or touching intervals into a minimal
/// sorted disjoint set.
///
/// Touching intervals (`next.start == current.end`) merge into one run:
/// two back-to-back shifts cover the span between them with no gap. This
/// is deliberately looser than the strict overlap test used for conflict
/// checks (see [`TimeInterval::overlaps`]).
///
/// O(n log n) for the sort, O(n) for the fold. Empty input yields empty
/// output; callers that need to distinguish "no intervals at all" do so
/// before merging.
pub fn merge_intervals(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();

    let mut merged = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if next.start() <= current.end() {
            current = current.extend_to(next.end());
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}
