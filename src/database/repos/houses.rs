use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::house::{self, CreateHouseRequest, House, UpdateHouseRequest};
use crate::filter::{capped_limit, HierarchyParams, ScopedWhere};
use crate::ledger::PopulationEntry;

pub struct HouseRepo;

impl HouseRepo {
    pub async fn list(
        pool: &PgPool,
        church_id: Uuid,
        params: &HierarchyParams,
    ) -> Result<Vec<House>, sqlx::Error> {
        let mut scope = ScopedWhere::new(0);
        scope
            .eq("church_id", church_id)
            .and_then(|s| s.eq_opt("unit_id", params.unit_id))
            .and_then(|s| s.eq_opt("bavanakutayima_id", params.bavanakutayima_id))
            .and_then(|s| s.eq_opt("id", params.house_id))
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        let (clause, binds) = scope.build();

        let sql = format!(
            "SELECT * FROM houses WHERE {} ORDER BY hierarchical_number LIMIT {}",
            clause,
            capped_limit(params.limit)
        );
        let mut query = sqlx::query_as::<_, House>(&sql);
        for bind in binds {
            query = query.bind(bind);
        }
        query.fetch_all(pool).await
    }

    pub async fn get(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<Option<House>, sqlx::Error> {
        sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a house, deriving its hierarchical number from the parent
    /// unit/kutayima numbers and a per-kutayima sequence.
    pub async fn create(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateHouseRequest,
    ) -> Result<House, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (unit_number,): (i32,) =
            sqlx::query_as("SELECT unit_number FROM units WHERE id = $1 AND church_id = $2")
                .bind(req.unit_id)
                .bind(church_id)
                .fetch_one(&mut *tx)
                .await?;

        let (kutayima_number,): (i32,) = sqlx::query_as(
            "SELECT kutayima_number FROM bavanakutayimas WHERE id = $1 AND church_id = $2",
        )
        .bind(req.bavanakutayima_id)
        .bind(church_id)
        .fetch_one(&mut *tx)
        .await?;

        let (seq,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) + 1 FROM houses WHERE bavanakutayima_id = $1")
                .bind(req.bavanakutayima_id)
                .fetch_one(&mut *tx)
                .await?;

        let house = sqlx::query_as::<_, House>(
            "INSERT INTO houses (id, church_id, unit_id, bavanakutayima_id, family_name, hierarchical_number)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(req.unit_id)
        .bind(req.bavanakutayima_id)
        .bind(&req.family_name)
        .bind(house::hierarchical_number(unit_number, kutayima_number, seq))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(house)
    }

    pub async fn update(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
        req: &UpdateHouseRequest,
    ) -> Result<House, sqlx::Error> {
        sqlx::query_as::<_, House>(
            "UPDATE houses SET family_name = COALESCE($1, family_name), updated_at = now()
             WHERE id = $2 AND church_id = $3 RETURNING *",
        )
        .bind(&req.family_name)
        .bind(id)
        .bind(church_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM houses WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Every house of the church, as the sweep's target population.
    pub async fn population(
        conn: &mut PgConnection,
        church_id: Uuid,
    ) -> Result<Vec<PopulationEntry>, sqlx::Error> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, family_name FROM houses WHERE church_id = $1")
                .bind(church_id)
                .fetch_all(conn)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| PopulationEntry { id, name })
            .collect())
    }
}
