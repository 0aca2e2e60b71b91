use super::IItineraryRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use tripline_domain::{Itinerary, ID};

pub struct InMemoryItineraryRepo {
    itineraries: std::sync::Mutex<Vec<Itinerary>>,
}

impl InMemoryItineraryRepo {
    pub fn new() -> Self {
        Self {
            itineraries: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IItineraryRepo for InMemoryItineraryRepo {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        insert(itinerary, &self.itineraries);
        Ok(())
    }

    async fn save(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        save(itinerary, &self.itineraries);
        Ok(())
    }

    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
        find(itinerary_id, &self.itineraries)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Itinerary> {
        let mut itineraries = find_by(&self.itineraries, |i| i.user_id == *user_id);
        itineraries.sort_by_key(|i| i.start_ts);
        itineraries
    }

    async fn find_due_for_reminder(
        &self,
        from: i64,
        until: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Itinerary>> {
        let mut due = find_by(&self.itineraries, |i| i.needs_reminder(from, until));
        due.sort_by_key(|i| i.start_ts);
        due.truncate(limit as usize);
        Ok(due)
    }

    async fn mark_reminder_sent(&self, itinerary_id: &ID) -> anyhow::Result<()> {
        update_many(
            &self.itineraries,
            |i| i.id == *itinerary_id,
            |i| i.reminder_sent = true,
        );
        Ok(())
    }

    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
        delete(itinerary_id, &self.itineraries)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.itineraries, |i| i.user_id == *user_id))
    }
}
