use super::IPostRepo;
use crate::repos::shared::repo::DeleteResult;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use tripline_domain::{Post, ID};

pub struct PostgresPostRepo {
    pool: PgPool,
}

impl PostgresPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRaw {
    post_uid: Uuid,
    user_uid: Uuid,
    title: String,
    body: String,
    created: i64,
    updated: i64,
}

impl Into<Post> for PostRaw {
    fn into(self) -> Post {
        Post {
            id: self.post_uid.into(),
            user_id: self.user_uid.into(),
            title: self.title,
            body: self.body,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IPostRepo for PostgresPostRepo {
    async fn insert(&self, post: &Post) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts(post_uid, user_uid, title, body, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.inner_ref())
        .bind(post.user_id.inner_ref())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.created)
        .bind(post.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, post: &Post) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = $2,
            body = $3,
            updated = $4
            WHERE post_uid = $1
            "#,
        )
        .bind(post.id.inner_ref())
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, post_id: &ID) -> Option<Post> {
        let post: PostRaw = sqlx::query_as(
            r#"
            SELECT * FROM posts AS p
            WHERE p.post_uid = $1
            "#,
        )
        .bind(post_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Find post with id: {} failed. DB returned error: {:?}", post_id, e);
            e
        })
        .ok()??;

        Some(post.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Post> {
        let posts: Vec<PostRaw> = sqlx::query_as(
            r#"
            SELECT * FROM posts AS p
            WHERE p.user_uid = $1
            ORDER BY p.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find posts for user: {} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });

        posts.into_iter().map(|p| p.into()).collect()
    }

    async fn delete(&self, post_id: &ID) -> Option<Post> {
        let post: PostRaw = sqlx::query_as(
            r#"
            DELETE FROM posts AS p
            WHERE p.post_uid = $1
            RETURNING *
            "#,
        )
        .bind(post_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Delete post with id: {} failed. DB returned error: {:?}", post_id, e);
            e
        })
        .ok()??;

        Some(post.into())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM posts AS p
            WHERE p.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
