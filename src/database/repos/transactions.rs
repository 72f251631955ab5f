use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::database::models::contribution::EventKind;
use crate::database::models::transaction::{Transaction, TransactionCategory};
use crate::database::models::types::{PayerRef, PaymentMethod};

pub struct TransactionRepo;

impl TransactionRepo {
    /// Audit entry for a recorded contribution.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_contribution(
        conn: &mut PgConnection,
        church_id: Uuid,
        kind: EventKind,
        event_id: Uuid,
        payer: PayerRef,
        amount: Decimal,
        payment_method: PaymentMethod,
        recorded_by: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO transactions (id, church_id, category, event_kind, event_id,
                                       payer_id, payer_type, amount, payment_method, recorded_by)
             VALUES ($1, $2, 'contribution', $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(kind.as_str())
        .bind(event_id)
        .bind(payer.id)
        .bind(payer.payer_type)
        .bind(amount)
        .bind(payment_method)
        .bind(recorded_by)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Audit entry for a due payment.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_due_payment(
        conn: &mut PgConnection,
        church_id: Uuid,
        due_type: EventKind,
        due_id: Uuid,
        event_id: Uuid,
        payer: PayerRef,
        amount: Decimal,
        payment_method: PaymentMethod,
        recorded_by: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO transactions (id, church_id, category, event_kind, event_id,
                                       due_type, due_id, payer_id, payer_type, amount,
                                       payment_method, recorded_by)
             VALUES ($1, $2, 'due_payment', $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(Uuid::new_v4())
        .bind(church_id)
        .bind(due_type.as_str())
        .bind(event_id)
        .bind(due_type.as_str())
        .bind(due_id)
        .bind(payer.id)
        .bind(payer.payer_type)
        .bind(amount)
        .bind(payment_method)
        .bind(recorded_by)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn list(
        pool: &PgPool,
        church_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE church_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(church_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn list_category(
        pool: &PgPool,
        church_id: Uuid,
        category: TransactionCategory,
        limit: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE church_id = $1 AND category = $2
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(church_id)
        .bind(category)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
