//! Provider-neutral raw calendar events.
//!
//! External sources (the bay calendars) deliver events in this shape; the
//! resolver normalizes them into engine intervals. Timestamps are UTC
//! instants as the source reports them, before localization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event as delivered by an external source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    pub summary: String,
    /// Free-text metadata; the booking platform embeds its exclusion
    /// marker here.
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}
