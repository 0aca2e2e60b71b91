use crate::shared::entity::{Entity, ID};

/// A travel blog entry written by a `User`.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub body: String,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Post {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
