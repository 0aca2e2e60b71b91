use super::IItineraryRepo;
use crate::repos::shared::repo::DeleteResult;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use tripline_domain::{Itinerary, ID};

pub struct PostgresItineraryRepo {
    pool: PgPool,
}

impl PostgresItineraryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ItineraryRaw {
    itinerary_uid: Uuid,
    user_uid: Uuid,
    title: String,
    destination: String,
    start_ts: i64,
    end_ts: i64,
    reminder_sent: bool,
    created: i64,
    updated: i64,
}

impl Into<Itinerary> for ItineraryRaw {
    fn into(self) -> Itinerary {
        Itinerary {
            id: self.itinerary_uid.into(),
            user_id: self.user_uid.into(),
            title: self.title,
            destination: self.destination,
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            reminder_sent: self.reminder_sent,
            created: self.created,
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IItineraryRepo for PostgresItineraryRepo {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO itineraries
            (itinerary_uid, user_uid, title, destination, start_ts, end_ts, reminder_sent, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(itinerary.id.inner_ref())
        .bind(itinerary.user_id.inner_ref())
        .bind(&itinerary.title)
        .bind(&itinerary.destination)
        .bind(itinerary.start_ts)
        .bind(itinerary.end_ts)
        .bind(itinerary.reminder_sent)
        .bind(itinerary.created)
        .bind(itinerary.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE itineraries
            SET title = $2,
            destination = $3,
            start_ts = $4,
            end_ts = $5,
            reminder_sent = $6,
            updated = $7
            WHERE itinerary_uid = $1
            "#,
        )
        .bind(itinerary.id.inner_ref())
        .bind(&itinerary.title)
        .bind(&itinerary.destination)
        .bind(itinerary.start_ts)
        .bind(itinerary.end_ts)
        .bind(itinerary.reminder_sent)
        .bind(itinerary.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
        let itinerary: ItineraryRaw = sqlx::query_as(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.itinerary_uid = $1
            "#,
        )
        .bind(itinerary_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find itinerary with id: {} failed. DB returned error: {:?}",
                itinerary_id, e
            );
            e
        })
        .ok()??;

        Some(itinerary.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Itinerary> {
        let itineraries: Vec<ItineraryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.user_uid = $1
            ORDER BY i.start_ts ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Find itineraries for user: {} failed. DB returned error: {:?}",
                user_id, e
            );
            Vec::new()
        });

        itineraries.into_iter().map(|i| i.into()).collect()
    }

    async fn find_due_for_reminder(
        &self,
        from: i64,
        until: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Itinerary>> {
        let itineraries: Vec<ItineraryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.start_ts >= $1 AND i.start_ts <= $2
            AND i.reminder_sent = FALSE
            ORDER BY i.start_ts ASC
            LIMIT $3
            "#,
        )
        .bind(from)
        .bind(until)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(itineraries.into_iter().map(|i| i.into()).collect())
    }

    async fn mark_reminder_sent(&self, itinerary_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE itineraries
            SET reminder_sent = TRUE
            WHERE itinerary_uid = $1
            "#,
        )
        .bind(itinerary_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
        let itinerary: ItineraryRaw = sqlx::query_as(
            r#"
            DELETE FROM itineraries AS i
            WHERE i.itinerary_uid = $1
            RETURNING *
            "#,
        )
        .bind(itinerary_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete itinerary with id: {} failed. DB returned error: {:?}",
                itinerary_id, e
            );
            e
        })
        .ok()??;

        Some(itinerary.into())
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM itineraries AS i
            WHERE i.user_uid = $1
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
