use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::church::{Church, CreateChurchRequest, UpdateChurchRequest};

pub struct ChurchRepo;

impl ChurchRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Church>, sqlx::Error> {
        sqlx::query_as::<_, Church>("SELECT * FROM churches ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Church>, sqlx::Error> {
        sqlx::query_as::<_, Church>("SELECT * FROM churches WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, req: &CreateChurchRequest) -> Result<Church, sqlx::Error> {
        sqlx::query_as::<_, Church>(
            "INSERT INTO churches (id, name, place) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.place)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateChurchRequest,
    ) -> Result<Church, sqlx::Error> {
        sqlx::query_as::<_, Church>(
            "UPDATE churches
             SET name = COALESCE($1, name), place = COALESCE($2, place), updated_at = now()
             WHERE id = $3 RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.place)
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM churches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
