use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::member::{self, CreateMemberRequest, Member, UpdateMemberRequest};
use crate::filter::{capped_limit, HierarchyParams, ScopedWhere};
use crate::ledger::PopulationEntry;

pub struct MemberRepo;

impl MemberRepo {
    pub async fn list(
        pool: &PgPool,
        church_id: Uuid,
        params: &HierarchyParams,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let mut scope = ScopedWhere::new(0);
        scope
            .eq("church_id", church_id)
            .and_then(|s| s.eq_opt("unit_id", params.unit_id))
            .and_then(|s| s.eq_opt("bavanakutayima_id", params.bavanakutayima_id))
            .and_then(|s| s.eq_opt("house_id", params.house_id))
            .and_then(|s| s.eq_opt("id", params.member_id))
            .map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
        let (clause, binds) = scope.build();

        let sql = format!(
            "SELECT * FROM members WHERE {} ORDER BY hierarchical_number LIMIT {}",
            clause,
            capped_limit(params.limit)
        );
        let mut query = sqlx::query_as::<_, Member>(&sql);
        for bind in binds {
            query = query.bind(bind);
        }
        query.fetch_all(pool).await
    }

    pub async fn get(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<Option<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Member>, sqlx::Error> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a member under a house, inheriting the house's hierarchy
    /// references and extending its hierarchical number.
    pub async fn create(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateMemberRequest,
    ) -> Result<Member, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (unit_id, bavanakutayima_id, house_number): (Uuid, Uuid, String) = sqlx::query_as(
            "SELECT unit_id, bavanakutayima_id, hierarchical_number
             FROM houses WHERE id = $1 AND church_id = $2",
        )
        .bind(req.house_id)
        .bind(church_id)
        .fetch_one(&mut *tx)
        .await?;

        let (seq,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) + 1 FROM members WHERE house_id = $1")
                .bind(req.house_id)
                .fetch_one(&mut *tx)
                .await?;

        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO members (id, church_id, unit_id, bavanakutayima_id, house_id,
                                  name, phone, email, hierarchical_number)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(unit_id)
        .bind(bavanakutayima_id)
        .bind(req.house_id)
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.email)
        .bind(member::hierarchical_number(&house_number, seq))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(member)
    }

    pub async fn update(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
        req: &UpdateMemberRequest,
    ) -> Result<Member, sqlx::Error> {
        sqlx::query_as::<_, Member>(
            "UPDATE members
             SET name = COALESCE($1, name),
                 phone = COALESCE($2, phone),
                 email = COALESCE($3, email),
                 is_active = COALESCE($4, is_active),
                 updated_at = now()
             WHERE id = $5 AND church_id = $6 RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.email)
        .bind(req.is_active)
        .bind(id)
        .bind(church_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, church_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Every active member of the church, as the sweep's target population.
    pub async fn population(
        conn: &mut PgConnection,
        church_id: Uuid,
    ) -> Result<Vec<PopulationEntry>, sqlx::Error> {
        let rows: Vec<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM members WHERE church_id = $1 AND is_active")
                .bind(church_id)
                .fetch_all(conn)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| PopulationEntry { id, name })
            .collect())
    }
}
