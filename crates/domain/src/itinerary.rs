use crate::shared::entity::{Entity, ID};

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// An `Itinerary` is a planned trip owned by a `User`. Timestamps are UTC
/// millis. `reminder_sent` is owned by the reminder sweep: it flips from
/// false to true at most once per trip start date, and only after the
/// owner was notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub destination: String,
    pub start_ts: i64,
    pub end_ts: i64,
    pub reminder_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl Itinerary {
    /// Whether this itinerary qualifies for a reminder in the given
    /// timespan. This is the same predicate the store queries use, kept
    /// here so every implementation selects identically.
    pub fn needs_reminder(&self, from: i64, until: i64) -> bool {
        !self.reminder_sent && self.start_ts >= from && self.start_ts <= until
    }

    /// Whole days between `now` and the trip start, rounded up. A trip
    /// starting later today counts as 0 days away.
    pub fn days_until_start(&self, now: i64) -> i64 {
        let millis_left = self.start_ts - now;
        if millis_left <= 0 {
            return 0;
        }
        (millis_left + DAY_MILLIS - 1) / DAY_MILLIS
    }
}

impl Entity for Itinerary {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
