//! Resource resolution: from logical bays to availability verdicts.
//!
//! Maps each configured resource to its external calendar, fetches raw
//! events for all resources concurrently (each fetch under its own
//! timeout), normalizes them into engine intervals, and runs the conflict
//! decision per resource.
//!
//! A resource whose events could not be fetched is reported unavailable.
//! Booking into a bay whose true state is unknown is the unsafe
//! direction, so fetch failures are never coerced into "available".

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::{EngineConfig, ResourceConfig};
use crate::conflict::{is_resource_free, ExclusionKey, ResourceAvailability, TaggedInterval};
use crate::error::{EngineError, EngineResult};
use crate::event::{EventStatus, RawEvent};
use crate::interval::TimeInterval;

/// Marker the booking platform embeds in event descriptions to link an
/// event back to its booking.
const BOOKING_ID_MARKER: &str = "Booking ID:";

/// A source of raw calendar events for one external calendar.
///
/// Implemented by the hosting service's calendar client; tests use an
/// in-memory fake. Fetch failures surface as `Err`, never as an empty
/// event list: the resolver treats the two very differently.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> EngineResult<Vec<RawEvent>>;
}

/// Extract a booking exclusion key from free-text event metadata.
///
/// The platform writes a line like `Booking ID: BK-1234` somewhere in the
/// description; the token after the marker (alphanumerics, `-`, `_`)
/// identifies the booking. Returns `None` when no usable marker exists.
pub fn extract_exclusion_key(text: &str) -> Option<ExclusionKey> {
    let after_marker = text.split(BOOKING_ID_MARKER).nth(1)?;
    let token: String = after_marker
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if token.is_empty() {
        None
    } else {
        Some(ExclusionKey::new(token))
    }
}

/// Fetches and normalizes events per resource, then aggregates conflict
/// decisions across the caller's resource list.
pub struct ResourceResolver {
    source: Arc<dyn EventSource>,
    config: EngineConfig,
}

impl ResourceResolver {
    pub fn new(source: Arc<dyn EventSource>, config: EngineConfig) -> Self {
        ResourceResolver { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check whether `candidate` can be booked on each of `resources`.
    ///
    /// Fetches run concurrently; overall latency tracks the slowest
    /// single resource, not the sum. The output preserves the input
    /// resource order, and one resource's failure never short-circuits
    /// the others: it is reported unavailable and its siblings report
    /// their true computed state.
    pub async fn check_availability(
        &self,
        candidate: TimeInterval,
        resources: &[ResourceConfig],
        exclude: Option<&ExclusionKey>,
    ) -> Vec<ResourceAvailability> {
        let (time_min, time_max) = self.fetch_window(candidate.start().date());

        let checks = resources.iter().map(|resource| async move {
            let is_available = match self
                .fetch_resource_intervals(resource, time_min, time_max)
                .await
            {
                Ok(existing) => is_resource_free(candidate, &existing, exclude),
                Err(err) => {
                    warn!(
                        resource = %resource.name,
                        error = %err,
                        "event fetch failed, reporting resource unavailable"
                    );
                    false
                }
            };

            ResourceAvailability {
                resource_name: resource.name.clone(),
                api_label: resource.api_label.clone(),
                is_available,
            }
        });

        join_all(checks).await
    }

    /// Fetch one resource's events and normalize them into tagged
    /// intervals, under the configured per-resource timeout.
    async fn fetch_resource_intervals(
        &self,
        resource: &ResourceConfig,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> EngineResult<Vec<TaggedInterval>> {
        let events = timeout(
            self.config.fetch_timeout(),
            self.source
                .fetch_events(&resource.calendar_id, time_min, time_max),
        )
        .await
        .map_err(|_| EngineError::FetchTimeout(self.config.fetch_timeout_secs))??;

        debug!(resource = %resource.name, count = events.len(), "fetched events");

        Ok(events
            .iter()
            .filter_map(|event| self.normalize_event(event))
            .collect())
    }

    /// Localize a raw event into the facility timezone and tag it.
    /// Inverted or zero-length events are dropped: they cannot conflict
    /// with anything under the half-open overlap rule.
    fn normalize_event(&self, event: &RawEvent) -> Option<TaggedInterval> {
        let start = self.to_local(event.start);
        let end = self.to_local(event.end);

        let interval = match TimeInterval::new(start, end) {
            Ok(interval) => interval,
            Err(_) => {
                debug!(event = %event.id, "skipping event with non-positive duration");
                return None;
            }
        };

        Some(TaggedInterval {
            interval,
            exclusion_key: event
                .description
                .as_deref()
                .and_then(extract_exclusion_key),
            cancelled: event.status == EventStatus::Cancelled,
        })
    }

    fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.config.timezone).naive_local()
    }

    /// UTC bounds of the facility-local day containing the candidate.
    fn fetch_window(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let day_start = date.and_hms_opt(0, 0, 0).unwrap();
        let day_end = day_start + Duration::days(1);
        (self.local_to_utc(day_start), self.local_to_utc(day_end))
    }

    fn local_to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.config.timezone.from_local_datetime(&local).earliest() {
            Some(instant) => instant.with_timezone(&Utc),
            // Nonexistent local time (DST transition): treat as UTC. The
            // supported facility zones have no DST.
            None => Utc.from_utc_datetime(&local),
        }
    }
}
