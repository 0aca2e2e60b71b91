use serde::{Deserialize, Serialize};
use tripline_domain::{Itinerary, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDTO {
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

impl ItineraryDTO {
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            id: itinerary.id,
            user_id: itinerary.user_id,
            title: itinerary.title,
            destination: itinerary.destination,
            start_ts: itinerary.start_ts,
            end_ts: itinerary.end_ts,
            reminder_sent: itinerary.reminder_sent,
            created: itinerary.created,
            updated: itinerary.updated,
        }
    }
}
