mod itinerary;
mod post;
mod shared;
mod user;

use itinerary::{InMemoryItineraryRepo, PostgresItineraryRepo};
use post::{InMemoryPostRepo, PostgresPostRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use itinerary::IItineraryRepo;
pub use post::IPostRepo;
pub use shared::repo::DeleteResult;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub itineraries: Arc<dyn IItineraryRepo>,
    pub posts: Arc<dyn IPostRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            itineraries: Arc::new(PostgresItineraryRepo::new(pool.clone())),
            posts: Arc::new(PostgresPostRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            itineraries: Arc::new(InMemoryItineraryRepo::new()),
            posts: Arc::new(InMemoryPostRepo::new()),
        }
    }
}
