use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::news::{CreateNewsRequest, News, UpdateNewsRequest};

pub struct NewsRepo;

impl NewsRepo {
    pub async fn list(
        pool: &PgPool,
        church_id: Uuid,
        published_only: bool,
    ) -> Result<Vec<News>, sqlx::Error> {
        sqlx::query_as::<_, News>(
            "SELECT * FROM news WHERE church_id = $1 AND (NOT $2 OR published)
             ORDER BY created_at DESC",
        )
        .bind(church_id)
        .bind(published_only)
        .fetch_all(pool)
        .await
    }

    pub async fn get(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<Option<News>, sqlx::Error> {
        sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        church_id: Uuid,
        created_by: Uuid,
        req: &CreateNewsRequest,
    ) -> Result<News, sqlx::Error> {
        sqlx::query_as::<_, News>(
            "INSERT INTO news (id, church_id, kind, title, body, event_date, published, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(req.kind)
        .bind(&req.title)
        .bind(&req.body)
        .bind(req.event_date)
        .bind(req.published)
        .bind(created_by)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
        req: &UpdateNewsRequest,
    ) -> Result<News, sqlx::Error> {
        sqlx::query_as::<_, News>(
            "UPDATE news
             SET title = COALESCE($1, title),
                 body = COALESCE($2, body),
                 event_date = COALESCE($3, event_date),
                 published = COALESCE($4, published),
                 updated_at = now()
             WHERE id = $5 AND church_id = $6 RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.body)
        .bind(req.event_date)
        .bind(req.published)
        .bind(id)
        .bind(church_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
