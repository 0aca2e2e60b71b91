use super::IPostRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use tripline_domain::{Post, ID};

pub struct InMemoryPostRepo {
    posts: std::sync::Mutex<Vec<Post>>,
}

impl InMemoryPostRepo {
    pub fn new() -> Self {
        Self {
            posts: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IPostRepo for InMemoryPostRepo {
    async fn insert(&self, post: &Post) -> anyhow::Result<()> {
        insert(post, &self.posts);
        Ok(())
    }

    async fn save(&self, post: &Post) -> anyhow::Result<()> {
        save(post, &self.posts);
        Ok(())
    }

    async fn find(&self, post_id: &ID) -> Option<Post> {
        find(post_id, &self.posts)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Post> {
        let mut posts = find_by(&self.posts, |p| p.user_id == *user_id);
        posts.sort_by_key(|p| std::cmp::Reverse(p.created));
        posts
    }

    async fn delete(&self, post_id: &ID) -> Option<Post> {
        delete(post_id, &self.posts)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.posts, |p| p.user_id == *user_id))
    }
}
