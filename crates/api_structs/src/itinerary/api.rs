use crate::dtos::ItineraryDTO;
use serde::{Deserialize, Serialize};
use tripline_domain::{Itinerary, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub itinerary: ItineraryDTO,
}

impl ItineraryResponse {
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            itinerary: ItineraryDTO::new(itinerary),
        }
    }
}

pub mod create_itinerary {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub destination: String,
        pub start_ts: i64,
        pub end_ts: i64,
    }

    pub type APIResponse = ItineraryResponse;
}

pub mod get_itinerary {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub itinerary_id: ID,
    }

    pub type APIResponse = ItineraryResponse;
}

pub mod get_user_itineraries {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub itineraries: Vec<ItineraryDTO>,
    }

    impl APIResponse {
        pub fn new(itineraries: Vec<Itinerary>) -> Self {
            Self {
                itineraries: itineraries.into_iter().map(ItineraryDTO::new).collect(),
            }
        }
    }
}

pub mod update_itinerary {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub itinerary_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        pub destination: Option<String>,
        pub start_ts: Option<i64>,
        pub end_ts: Option<i64>,
    }

    pub type APIResponse = ItineraryResponse;
}

pub mod delete_itinerary {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub itinerary_id: ID,
    }

    pub type APIResponse = ItineraryResponse;
}
