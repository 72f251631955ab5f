use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::contribution::{
    Campaign, Contribution, CreateCampaignRequest, CreateStothrakazhchaRequest, EventKind,
    EventRow, EventStatus, StothrakazhchaWeek,
};
use crate::database::models::types::PayerRef;

/// Kind-parameterized access to contribution events and their contributor
/// logs. The kind picks the table set; the SQL shape is shared.
pub struct EventRepo;

const EVENT_ROW_COLUMNS: &str = "id, church_id, amount_type, contribution_mode, fixed_amount, \
     minimum_amount, status, due_date, total_collected, total_contributors, dues_processed";

impl EventRepo {
    pub async fn create_campaign(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateCampaignRequest,
    ) -> Result<Campaign, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            "INSERT INTO campaigns (id, church_id, name, description, amount_type,
                                    contribution_mode, fixed_amount, minimum_amount, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.amount_type)
        .bind(req.contribution_mode)
        .bind(req.fixed_amount)
        .bind(req.minimum_amount)
        .bind(req.due_date)
        .fetch_one(pool)
        .await
    }

    pub async fn create_week(
        pool: &PgPool,
        church_id: Uuid,
        req: &CreateStothrakazhchaRequest,
    ) -> Result<StothrakazhchaWeek, sqlx::Error> {
        sqlx::query_as::<_, StothrakazhchaWeek>(
            "INSERT INTO stothrakazhcha_weeks (id, church_id, week_number, year, amount_type,
                                               contribution_mode, fixed_amount, minimum_amount, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(req.week_number)
        .bind(req.year)
        .bind(req.amount_type)
        .bind(req.contribution_mode)
        .bind(req.fixed_amount)
        .bind(req.minimum_amount)
        .bind(req.due_date)
        .fetch_one(pool)
        .await
    }

    pub async fn list_campaigns(pool: &PgPool, church_id: Uuid) -> Result<Vec<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE church_id = $1 ORDER BY created_at DESC",
        )
        .bind(church_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_weeks(
        pool: &PgPool,
        church_id: Uuid,
    ) -> Result<Vec<StothrakazhchaWeek>, sqlx::Error> {
        sqlx::query_as::<_, StothrakazhchaWeek>(
            "SELECT * FROM stothrakazhcha_weeks WHERE church_id = $1
             ORDER BY year DESC, week_number DESC",
        )
        .bind(church_id)
        .fetch_all(pool)
        .await
    }

    pub async fn get_campaign(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1 AND church_id = $2")
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn get_week(
        pool: &PgPool,
        church_id: Uuid,
        id: Uuid,
    ) -> Result<Option<StothrakazhchaWeek>, sqlx::Error> {
        sqlx::query_as::<_, StothrakazhchaWeek>(
            "SELECT * FROM stothrakazhcha_weeks WHERE id = $1 AND church_id = $2",
        )
        .bind(id)
        .bind(church_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn set_status(
        pool: &PgPool,
        kind: EventKind,
        church_id: Uuid,
        id: Uuid,
        status: EventStatus,
    ) -> Result<u64, sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET status = $1, updated_at = now() WHERE id = $2 AND church_id = $3",
            kind.events_table()
        );
        let result = sqlx::query(&sql)
            .bind(status)
            .bind(id)
            .bind(church_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Lock the event row for the duration of the surrounding transaction.
    /// Contribution appends serialize on this lock.
    pub async fn lock_event(
        conn: &mut PgConnection,
        kind: EventKind,
        id: Uuid,
    ) -> Result<Option<EventRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {}, {} AS label FROM {} WHERE id = $1 FOR UPDATE",
            EVENT_ROW_COLUMNS,
            kind.label_sql(),
            kind.events_table()
        );
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn insert_contribution(
        conn: &mut PgConnection,
        kind: EventKind,
        church_id: Uuid,
        event_id: Uuid,
        payer: PayerRef,
        amount: Decimal,
        recorded_by: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "INSERT INTO {} (id, church_id, event_id, contributor_id, contributor_type, amount, recorded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            kind.contributions_table()
        );
        sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(church_id)
            .bind(event_id)
            .bind(payer.id)
            .bind(payer.payer_type)
            .bind(amount)
            .bind(recorded_by)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn distinct_contributors(
        conn: &mut PgConnection,
        kind: EventKind,
        event_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "SELECT COUNT(DISTINCT contributor_id) FROM {} WHERE event_id = $1",
            kind.contributions_table()
        );
        let (count,): (i64,) = sqlx::query_as(&sql).bind(event_id).fetch_one(conn).await?;
        Ok(count)
    }

    pub async fn bump_aggregates(
        conn: &mut PgConnection,
        kind: EventKind,
        event_id: Uuid,
        amount: Decimal,
        total_contributors: i64,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET total_collected = total_collected + $1,
                           total_contributors = $2,
                           updated_at = now()
             WHERE id = $3",
            kind.events_table()
        );
        sqlx::query(&sql)
            .bind(amount)
            .bind(total_contributors as i32)
            .bind(event_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Events whose due date has passed and whose dues are still unprocessed.
    pub async fn candidates_for_processing(
        pool: &PgPool,
        kind: EventKind,
        church_id: Uuid,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let sql = format!(
            "SELECT id FROM {} WHERE church_id = $1 AND due_date IS NOT NULL
             AND due_date <= $2 AND NOT dues_processed ORDER BY due_date",
            kind.events_table()
        );
        let rows: Vec<(Uuid,)> = sqlx::query_as(&sql)
            .bind(church_id)
            .bind(as_of)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Flip the dues_processed flag, returning the claimed row. The
    /// `WHERE NOT dues_processed` guard makes concurrent sweeps safe: only
    /// one transaction observes the row, the rest get None.
    pub async fn claim_for_processing(
        conn: &mut PgConnection,
        kind: EventKind,
        id: Uuid,
    ) -> Result<Option<EventRow>, sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET dues_processed = true, dues_processed_at = now(),
                           status = 'processed', updated_at = now()
             WHERE id = $1 AND NOT dues_processed
             RETURNING {}, {} AS label",
            kind.events_table(),
            EVENT_ROW_COLUMNS,
            kind.label_sql()
        );
        sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn log_sum(
        conn: &mut PgConnection,
        kind: EventKind,
        event_id: Uuid,
    ) -> Result<Decimal, sqlx::Error> {
        let sql = format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {} WHERE event_id = $1",
            kind.contributions_table()
        );
        let (sum,): (Decimal,) = sqlx::query_as(&sql).bind(event_id).fetch_one(conn).await?;
        Ok(sum)
    }

    /// Cumulative contribution per payer for one event.
    pub async fn sums_by_payer(
        conn: &mut PgConnection,
        kind: EventKind,
        event_id: Uuid,
    ) -> Result<Vec<(Uuid, Decimal)>, sqlx::Error> {
        let sql = format!(
            "SELECT contributor_id, SUM(amount) FROM {} WHERE event_id = $1 GROUP BY contributor_id",
            kind.contributions_table()
        );
        sqlx::query_as(&sql).bind(event_id).fetch_all(conn).await
    }

    pub async fn list_contributions(
        pool: &PgPool,
        kind: EventKind,
        event_id: Uuid,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM {} WHERE event_id = $1 ORDER BY contributed_at DESC",
            kind.contributions_table()
        );
        sqlx::query_as::<_, Contribution>(&sql)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
