mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
pub use inmemory::InMemoryPostRepo;
pub use postgres::PostgresPostRepo;
use tripline_domain::{Post, ID};

#[async_trait::async_trait]
pub trait IPostRepo: Send + Sync {
    async fn insert(&self, post: &Post) -> anyhow::Result<()>;
    async fn save(&self, post: &Post) -> anyhow::Result<()>;
    async fn find(&self, post_id: &ID) -> Option<Post>;
    /// All posts of the given user, newest first
    async fn find_by_user(&self, user_id: &ID) -> Vec<Post>;
    async fn delete(&self, post_id: &ID) -> Option<Post>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult>;
}
