use crate::dtos::PostDTO;
use serde::{Deserialize, Serialize};
use tripline_domain::{Post, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post: PostDTO,
}

impl PostResponse {
    pub fn new(post: Post) -> Self {
        Self {
            post: PostDTO::new(post),
        }
    }
}

pub mod create_post {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub body: String,
    }

    pub type APIResponse = PostResponse;
}

pub mod get_post {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub post_id: ID,
    }

    pub type APIResponse = PostResponse;
}

pub mod get_user_posts {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub posts: Vec<PostDTO>,
    }

    impl APIResponse {
        pub fn new(posts: Vec<Post>) -> Self {
            Self {
                posts: posts.into_iter().map(PostDTO::new).collect(),
            }
        }
    }
}

pub mod update_post {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub post_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: Option<String>,
        pub body: Option<String>,
    }

    pub type APIResponse = PostResponse;
}

pub mod delete_post {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub post_id: ID,
    }

    pub type APIResponse = PostResponse;
}
