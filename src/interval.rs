//! Half-open time intervals in the facility's local timezone.
//!
//! Every timestamp reaching the engine has already been normalized to the
//! one configured timezone, so intervals carry plain naive datetimes and
//! all interval arithmetic is timezone-free.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A half-open time range `[start, end)`.
///
/// Invariant: `start < end`. Zero-length and inverted ranges are rejected
/// at construction, and deserialization goes through the same validation.
/// The derived ordering is lexicographic by `(start, end)`, which is what
/// the merge pass sorts by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "IntervalRepr")]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Unvalidated wire shape of [`TimeInterval`]. Deserialization funnels
/// through [`TimeInterval::new`] so the invariant holds for intervals
/// built from request payloads too.
#[derive(Deserialize)]
struct IntervalRepr {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<IntervalRepr> for TimeInterval {
    type Error = EngineError;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        TimeInterval::new(repr.start, repr.end)
    }
}

impl TimeInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if start >= end {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(TimeInterval { start, end })
    }

    /// Build an interval from a date plus two times of day, as schedule
    /// rows are stored.
    pub fn from_times(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> EngineResult<Self> {
        Self::new(date.and_time(start), date.and_time(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Strict half-open overlap: shared endpoints do not count, so
    /// back-to-back bookings never conflict.
    ///
    /// Note the asymmetry with merging: the merge pass in [`crate::merge`]
    /// treats touching intervals as one covered run. Both behaviors are
    /// intentional and relied on by their respective callers.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The portion of this interval inside `[window_start, window_end)`,
    /// or `None` if nothing of positive length remains.
    pub fn clip(&self, window_start: NaiveDateTime, window_end: NaiveDateTime) -> Option<Self> {
        let start = self.start.max(window_start);
        let end = self.end.min(window_end);
        (start < end).then_some(TimeInterval { start, end })
    }

    /// Extend the end of this interval, never shrinking it. Used by the
    /// merge pass, which grows a running interval; the invariant holds
    /// because the end only moves forward.
    pub(crate) fn extend_to(&self, end: NaiveDateTime) -> Self {
        TimeInterval {
            start: self.start,
            end: self.end.max(end),
        }
    }
}
