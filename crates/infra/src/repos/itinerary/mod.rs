mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryItineraryRepo;
pub use postgres::PostgresItineraryRepo;
use tripline_domain::{Itinerary, ID};

#[async_trait::async_trait]
pub trait IItineraryRepo: Send + Sync {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()>;
    async fn save(&self, itinerary: &Itinerary) -> anyhow::Result<()>;
    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary>;
    /// All itineraries of the given user, ordered by trip start
    async fn find_by_user(&self, user_id: &ID) -> Vec<Itinerary>;
    /// Itineraries with a trip start in `[from, until]` that have not been
    /// notified yet, ordered by trip start and capped at `limit` rows.
    /// Failures here abort the whole sweep, so they are propagated instead
    /// of swallowed.
    async fn find_due_for_reminder(
        &self,
        from: i64,
        until: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Itinerary>>;
    /// Flips the reminder flag for one itinerary. Callers must only invoke
    /// this after the owner notification was confirmed.
    async fn mark_reminder_sent(&self, itinerary_id: &ID) -> anyhow::Result<()>;
    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}
