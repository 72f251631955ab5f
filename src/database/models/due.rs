use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::types::PayerType;

/// Outstanding balance a payer owes against an under-fulfilled contribution
/// event. Created by the processing sweep, mutated by payments, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DueRecord {
    pub id: Uuid,
    pub church_id: Uuid,
    pub event_id: Uuid,
    pub due_for_id: Uuid,
    pub due_for_type: PayerType,
    /// Name snapshot taken at processing time.
    pub due_for_name: String,
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of the outstanding-dues listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OutstandingDue {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub payer_type: PayerType,
    #[serde(rename = "campaignName")]
    pub campaign_name: String,
    #[serde(rename = "dueAmount")]
    pub due_amount: Decimal,
    #[serde(rename = "paidAmount")]
    pub paid_amount: Decimal,
    #[serde(rename = "remainingAmount")]
    pub remaining_amount: Decimal,
    #[serde(rename = "hierarchicalNumber")]
    pub hierarchical_number: String,
}
