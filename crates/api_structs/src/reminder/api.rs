use serde::{Deserialize, Serialize};

pub mod send_itinerary_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub secret: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
    }

    impl APIResponse {
        pub fn new(processed: usize) -> Self {
            Self {
                success: true,
                message: format!("Processed {} upcoming itineraries.", processed),
            }
        }
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIErrorResponse {
        pub success: bool,
        pub error: String,
    }

    impl APIErrorResponse {
        pub fn new() -> Self {
            Self {
                success: false,
                error: "Failed to process itinerary reminders.".into(),
            }
        }
    }
}
