use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::types::{PayerType, PaymentMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "transaction_category", rename_all = "snake_case")]
pub enum TransactionCategory {
    Contribution,
    DuePayment,
}

/// Append-only audit row written alongside every contribution and due payment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub church_id: Uuid,
    pub category: TransactionCategory,
    pub event_kind: Option<String>,
    pub event_id: Option<Uuid>,
    pub due_type: Option<String>,
    pub due_id: Option<Uuid>,
    pub payer_id: Uuid,
    pub payer_type: PayerType,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub recorded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
