//! Availability and coverage engine for the teesheet booking platform.
//!
//! Bays are bookable physical resources tracked through external
//! calendars; staff schedules are rows of start/end times per day. This
//! crate answers the two questions the platform's route handlers ask:
//!
//! - can a proposed time window be booked on each bay, given the bay's
//!   existing calendar events ([`ResourceResolver::check_availability`])?
//! - which parts of the business day does a staff roster leave uncovered
//!   ([`analyze_coverage`])?
//!
//! Both reduce to the same primitives: half-open [`TimeInterval`]s,
//! merging overlapping sets ([`merge_intervals`]), and set differences
//! against a bounded window. All arithmetic happens in one configured
//! facility timezone; the resolver is the only async, fallible boundary.

pub mod config;
pub mod conflict;
pub mod coverage;
pub mod error;
pub mod event;
pub mod interval;
pub mod merge;
pub mod resolver;

pub use config::{BusinessHours, EngineConfig, ResourceConfig};
pub use conflict::{is_resource_free, ExclusionKey, ResourceAvailability, TaggedInterval};
pub use coverage::{analyze_coverage, CoverageGap, DayCoverage};
pub use error::{EngineError, EngineResult};
pub use event::{EventStatus, RawEvent};
pub use interval::TimeInterval;
pub use merge::merge_intervals;
pub use resolver::{extract_exclusion_key, EventSource, ResourceResolver};
