use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{EventKind, EventSummary, PayerRef, PaymentMethod};
use crate::database::repos::{EventRepo, TransactionRepo};
use crate::error::ApiError;
use crate::ledger;

/// Record a contribution against an active event.
///
/// The event row is locked for the whole transaction, serializing appends per
/// event so the running total and the distinct-contributor count stay
/// consistent with the log.
pub async fn contribute(
    kind: EventKind,
    event_id: Uuid,
    church_id: Uuid,
    payer: PayerRef,
    amount: Decimal,
    payment_method: PaymentMethod,
    recorded_by: Option<Uuid>,
) -> Result<EventSummary, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let event = EventRepo::lock_event(&mut *tx, kind, event_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contribution event not found"))?;

    if event.church_id != church_id {
        return Err(ApiError::forbidden("Event belongs to another church"));
    }

    ledger::ensure_active(event.status)?;
    ledger::policy(&event).validate_amount(amount)?;

    let total_contributors =
        append_to_log(&mut tx, kind, church_id, event_id, payer, amount, recorded_by).await?;

    TransactionRepo::insert_contribution(
        &mut *tx,
        church_id,
        kind,
        event_id,
        payer,
        amount,
        payment_method,
        recorded_by,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        event = %event.label,
        payer = %payer.id,
        %amount,
        "contribution recorded"
    );

    Ok(EventSummary {
        event_id,
        total_collected: event.total_collected + amount,
        total_contributors: total_contributors as i32,
    })
}

/// Append one entry to an event's contributor log and refresh its aggregates.
/// Callers must hold the event row lock. Returns the distinct payer count.
pub(crate) async fn append_to_log(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    kind: EventKind,
    church_id: Uuid,
    event_id: Uuid,
    payer: PayerRef,
    amount: Decimal,
    recorded_by: Option<Uuid>,
) -> Result<i64, sqlx::Error> {
    EventRepo::insert_contribution(&mut **tx, kind, church_id, event_id, payer, amount, recorded_by)
        .await?;
    let total_contributors = EventRepo::distinct_contributors(&mut **tx, kind, event_id).await?;
    EventRepo::bump_aggregates(&mut **tx, kind, event_id, amount, total_contributors).await?;
    Ok(total_contributors)
}
