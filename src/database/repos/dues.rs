use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::contribution::EventKind;
use crate::database::models::due::{DueRecord, OutstandingDue};
use crate::database::models::types::PayerType;
use crate::filter::{capped_limit, HierarchyParams, ScopedWhere};
use crate::ledger::DueSeed;

pub struct DueRepo;

impl DueRepo {
    /// Insert a due record for an under-contributed payer. The unique
    /// (event_id, due_for_id) constraint backs up the dues_processed guard:
    /// a lost race inserts nothing and reports zero rows.
    pub async fn insert_if_absent(
        conn: &mut PgConnection,
        kind: EventKind,
        church_id: Uuid,
        event_id: Uuid,
        payer_type: PayerType,
        seed: &DueSeed,
    ) -> Result<u64, sqlx::Error> {
        let sql = format!(
            "INSERT INTO {} (id, church_id, event_id, due_for_id, due_for_type, due_for_name,
                             amount, paid_amount, balance, is_paid)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             ON CONFLICT (event_id, due_for_id) DO NOTHING",
            kind.dues_table()
        );
        let result = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(church_id)
            .bind(event_id)
            .bind(seed.payer_id)
            .bind(payer_type)
            .bind(&seed.payer_name)
            .bind(seed.amount)
            .bind(seed.paid_amount)
            .bind(seed.balance)
            .bind(seed.balance <= rust_decimal::Decimal::ZERO)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Lock a due record for payment application.
    pub async fn lock(
        conn: &mut PgConnection,
        kind: EventKind,
        id: Uuid,
    ) -> Result<Option<DueRecord>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} WHERE id = $1 FOR UPDATE", kind.dues_table());
        sqlx::query_as::<_, DueRecord>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn get(
        pool: &PgPool,
        kind: EventKind,
        church_id: Uuid,
        id: Uuid,
    ) -> Result<Option<DueRecord>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND church_id = $2",
            kind.dues_table()
        );
        sqlx::query_as::<_, DueRecord>(&sql)
            .bind(id)
            .bind(church_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist the outcome of a payment application.
    pub async fn store_payment(
        conn: &mut PgConnection,
        kind: EventKind,
        due: &DueRecord,
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET paid_amount = $1, balance = $2, is_paid = $3, updated_at = now()
             WHERE id = $4",
            kind.dues_table()
        );
        sqlx::query(&sql)
            .bind(due.paid_amount)
            .bind(due.balance)
            .bind(due.is_paid)
            .bind(due.id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Whether a payer still owes anything, across both due tables. Deleting
    /// such a payer would leave dangling ledger rows.
    pub async fn payer_has_open_dues(pool: &PgPool, payer_id: Uuid) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM campaign_dues WHERE due_for_id = $1 AND NOT is_paid)
                 OR EXISTS (SELECT 1 FROM stothrakazhcha_dues WHERE due_for_id = $1 AND NOT is_paid)",
        )
        .bind(payer_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Outstanding dues of one kind, scoped by the hierarchy filter. Member
    /// and house dues resolve their hierarchy position through their payer
    /// rows, so the filter applies uniformly to both.
    pub async fn list_outstanding(
        pool: &PgPool,
        kind: EventKind,
        church_id: Uuid,
        params: &HierarchyParams,
    ) -> Result<Vec<OutstandingDue>, sqlx::Error> {
        let mut scope = ScopedWhere::new(0);
        scope.raw("NOT d.is_paid");
        scope.expr_eq("d.church_id", church_id);
        scope.expr_eq_opt("COALESCE(m.unit_id, h.unit_id)", params.unit_id);
        scope.expr_eq_opt(
            "COALESCE(m.bavanakutayima_id, h.bavanakutayima_id)",
            params.bavanakutayima_id,
        );
        scope.expr_eq_opt("COALESCE(m.house_id, h.id)", params.house_id);
        if let Some(member_id) = params.member_id {
            scope.raw("d.due_for_type = 'member'");
            scope.expr_eq("d.due_for_id", member_id);
        }
        let (clause, binds) = scope.build();

        let sql = format!(
            "SELECT d.id,
                    d.due_for_name AS name,
                    d.due_for_type AS payer_type,
                    {label} AS campaign_name,
                    d.amount AS due_amount,
                    d.paid_amount,
                    d.balance AS remaining_amount,
                    COALESCE(m.hierarchical_number, h.hierarchical_number, '') AS hierarchical_number
             FROM {dues} d
             JOIN {events} e ON e.id = d.event_id
             LEFT JOIN members m ON d.due_for_type = 'member' AND m.id = d.due_for_id
             LEFT JOIN houses h ON d.due_for_type = 'house' AND h.id = d.due_for_id
             WHERE {clause}
             ORDER BY d.created_at DESC
             LIMIT {limit}",
            label = kind.qualified_label_sql("e"),
            dues = kind.dues_table(),
            events = kind.events_table(),
            clause = clause,
            limit = capped_limit(params.limit),
        );

        let mut query = sqlx::query_as::<_, OutstandingDue>(&sql);
        for bind in binds {
            query = query.bind(bind);
        }
        query.fetch_all(pool).await
    }
}
