use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use tripline_domain::{User, ID};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    full_name: String,
    created: i64,
    updated: i64,
}

impl Into<User> for UserRaw {
    fn into(self) -> User {
        User {
            id: self.user_uid.into(),
            email: self.email,
            full_name: self.full_name,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email, full_name, created, updated)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2,
            full_name = $3,
            updated = $4
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let user: UserRaw = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Find user with id: {} failed. DB returned error: {:?}", user_id, e);
            e
        })
        .ok()??;

        Some(user.into())
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let user: UserRaw = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Find user with email: {} failed. DB returned error: {:?}", email, e);
            e
        })
        .ok()??;

        Some(user.into())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        let user: UserRaw = sqlx::query_as(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Delete user with id: {} failed. DB returned error: {:?}", user_id, e);
            e
        })
        .ok()??;

        Some(user.into())
    }
}
