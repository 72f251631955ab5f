use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::{
    DueRecord, EventKind, OutstandingDue, PayerRef, PayerType, PaymentMethod,
};
use crate::database::repos::{DueRepo, EventRepo, HouseRepo, MemberRepo, TransactionRepo};
use crate::error::ApiError;
use crate::filter::HierarchyParams;
use crate::ledger;

/// Outcome of a processing sweep. Partial success is expected: one event
/// failing its integrity check must not abort the rest.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReport {
    pub total_members_processed: u64,
    pub total_houses_processed: u64,
    pub events_processed: u64,
    pub events_failed: u64,
}

/// Sweep every event of the kind whose due date has passed and whose dues are
/// still unprocessed, creating due records for under-contributed payers.
///
/// Each event is its own transaction, claimed with a conditional update on
/// the dues_processed flag. Re-invoking after processing is a no-op reported
/// as a zero-delta result.
pub async fn process_dues(
    kind: EventKind,
    church_id: Uuid,
    as_of: DateTime<Utc>,
) -> Result<ProcessReport, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let candidates = EventRepo::candidates_for_processing(&pool, kind, church_id, as_of).await?;

    let mut report = ProcessReport::default();
    for event_id in candidates {
        match process_one(&pool, kind, event_id).await {
            Ok(Some((members, houses))) => {
                report.total_members_processed += members;
                report.total_houses_processed += houses;
                report.events_processed += 1;
            }
            // Claimed by a concurrent sweep between candidate listing and here
            Ok(None) => {}
            Err(e) => {
                tracing::error!(kind = kind.as_str(), %event_id, error = %e, "due processing failed for event");
                report.events_failed += 1;
            }
        }
    }

    tracing::info!(
        kind = kind.as_str(),
        members = report.total_members_processed,
        houses = report.total_houses_processed,
        failed = report.events_failed,
        "due processing sweep complete"
    );

    Ok(report)
}

async fn process_one(
    pool: &sqlx::PgPool,
    kind: EventKind,
    event_id: Uuid,
) -> Result<Option<(u64, u64)>, ApiError> {
    let mut tx = pool.begin().await?;

    let Some(event) = EventRepo::claim_for_processing(&mut *tx, kind, event_id).await? else {
        return Ok(None);
    };

    // The flag flip rolls back with the rest of the transaction on failure,
    // leaving the event eligible for a later sweep.
    let log_sum = EventRepo::log_sum(&mut *tx, kind, event_id).await?;
    ledger::verify_aggregate(event.total_collected, log_sum)?;

    let assessed = ledger::assessed_amount(&event, config::config().dues.default_assessment)?;
    let payer_type = ledger::target_payer_type(event.amount_type);

    let population = match payer_type {
        PayerType::Member => MemberRepo::population(&mut *tx, event.church_id).await?,
        PayerType::House => HouseRepo::population(&mut *tx, event.church_id).await?,
    };

    let contributed: HashMap<Uuid, Decimal> = EventRepo::sums_by_payer(&mut *tx, kind, event_id)
        .await?
        .into_iter()
        .collect();

    let mut inserted = 0u64;
    for seed in ledger::shortfalls(&population, &contributed, assessed) {
        inserted +=
            DueRepo::insert_if_absent(&mut *tx, kind, event.church_id, event_id, payer_type, &seed)
                .await?;
    }

    tx.commit().await?;

    Ok(Some(match payer_type {
        PayerType::Member => (inserted, 0),
        PayerType::House => (0, inserted),
    }))
}

/// Apply a payment against a due record under a row lock. Over-payment is
/// rejected; the update and its audit transaction commit atomically.
pub async fn pay_due(
    due_type: EventKind,
    due_id: Uuid,
    church_id: Uuid,
    amount: Decimal,
    payment_method: PaymentMethod,
    recorded_by: Option<Uuid>,
) -> Result<DueRecord, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut tx = pool.begin().await?;

    let mut due = DueRepo::lock(&mut *tx, due_type, due_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Due record not found"))?;

    if due.church_id != church_id {
        return Err(ApiError::forbidden("Due belongs to another church"));
    }

    ledger::apply_payment(&mut due, amount)?;
    DueRepo::store_payment(&mut *tx, due_type, &due).await?;

    // A settled shortfall is still money collected: the payment lands in the
    // event's contributor log and running total, under the event lock.
    let payer = PayerRef { id: due.due_for_id, payer_type: due.due_for_type };
    if EventRepo::lock_event(&mut *tx, due_type, due.event_id).await?.is_none() {
        tracing::error!(due = %due.id, event = %due.event_id, "due references a missing event");
        return Err(ApiError::internal_server_error("Due references a missing event"));
    }
    crate::services::contributions::append_to_log(
        &mut tx,
        due_type,
        church_id,
        due.event_id,
        payer,
        amount,
        recorded_by,
    )
    .await?;

    TransactionRepo::insert_due_payment(
        &mut *tx,
        church_id,
        due_type,
        due.id,
        due.event_id,
        payer,
        amount,
        payment_method,
        recorded_by,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(due = %due.id, %amount, paid = due.is_paid, "due payment applied");
    Ok(due)
}

/// Outstanding dues across one or both due tables, hierarchy-scoped.
pub async fn list_outstanding(
    due_type: Option<EventKind>,
    church_id: Uuid,
    params: &HierarchyParams,
) -> Result<Vec<OutstandingDue>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let mut dues = match due_type {
        Some(kind) => DueRepo::list_outstanding(&pool, kind, church_id, params).await?,
        None => {
            let mut all =
                DueRepo::list_outstanding(&pool, EventKind::Campaign, church_id, params).await?;
            all.extend(
                DueRepo::list_outstanding(&pool, EventKind::Stothrakazhcha, church_id, params)
                    .await?,
            );
            all
        }
    };
    dues.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dues)
}
