use serde::{Deserialize, Serialize};
use tripline_domain::{Post, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub body: String,
    pub created: i64,
    pub updated: i64,
}

impl PostDTO {
    pub fn new(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            body: post.body,
            created: post.created,
            updated: post.updated,
        }
    }
}
