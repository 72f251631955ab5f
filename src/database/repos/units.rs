use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::unit::{CreateUnitRequest, Unit, UpdateUnitRequest};

pub struct UnitRepo;

impl UnitRepo {
    pub async fn list(pool: &PgPool, church_id: Uuid) -> Result<Vec<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            "SELECT * FROM units WHERE church_id = $1 ORDER BY unit_number",
        )
        .bind(church_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<Option<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateUnitRequest,
    ) -> Result<Unit, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            "INSERT INTO units (id, church_id, name, unit_number)
             VALUES ($1, $2, $3,
                     COALESCE($4, (SELECT COALESCE(MAX(unit_number), 0) + 1
                                   FROM units WHERE church_id = $2)))
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(&req.name)
        .bind(req.unit_number)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
        req: &UpdateUnitRequest,
    ) -> Result<Unit, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            "UPDATE units SET name = COALESCE($1, name), updated_at = now()
             WHERE id = $2 AND church_id = $3 RETURNING *",
        )
        .bind(&req.name)
        .bind(id)
        .bind(church_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
