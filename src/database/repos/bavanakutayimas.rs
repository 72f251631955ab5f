use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::bavanakutayima::{
    Bavanakutayima, CreateBavanakutayimaRequest, UpdateBavanakutayimaRequest,
};

pub struct BavanakutayimaRepo;

impl BavanakutayimaRepo {
    pub async fn list(
        pool: &PgPool,
        church_id: Uuid,
        unit_id: Option<Uuid>,
    ) -> Result<Vec<Bavanakutayima>, sqlx::Error> {
        sqlx::query_as::<_, Bavanakutayima>(
            "SELECT * FROM bavanakutayimas
             WHERE church_id = $1 AND ($2::uuid IS NULL OR unit_id = $2)
             ORDER BY kutayima_number",
        )
        .bind(church_id)
        .bind(unit_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Bavanakutayima>, sqlx::Error> {
        sqlx::query_as::<_, Bavanakutayima>(
            "SELECT * FROM bavanakutayimas WHERE id = $1 AND church_id = $2",
        )
        .bind(id)
        .bind(church_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateBavanakutayimaRequest,
    ) -> Result<Bavanakutayima, sqlx::Error> {
        sqlx::query_as::<_, Bavanakutayima>(
            "INSERT INTO bavanakutayimas (id, church_id, unit_id, name, kutayima_number)
             VALUES ($1, $2, $3, $4,
                     COALESCE($5, (SELECT COALESCE(MAX(kutayima_number), 0) + 1
                                   FROM bavanakutayimas WHERE unit_id = $3)))
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(req.unit_id)
        .bind(&req.name)
        .bind(req.kutayima_number)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
        req: &UpdateBavanakutayimaRequest,
    ) -> Result<Bavanakutayima, sqlx::Error> {
        sqlx::query_as::<_, Bavanakutayima>(
            "UPDATE bavanakutayimas SET name = COALESCE($1, name), updated_at = now()
             WHERE id = $2 AND church_id = $3 RETURNING *",
        )
        .bind(&req.name)
        .bind(id)
        .bind(church_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bavanakutayimas WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
