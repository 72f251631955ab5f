use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::types::PayerType;

/// Who the collection drive assesses: each member, each house, or nobody in
/// particular (flexible drives assess at the minimum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "amount_type", rename_all = "snake_case")]
pub enum AmountType {
    PerMember,
    PerHouse,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "contribution_mode", rename_all = "snake_case")]
pub enum ContributionMode {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "event_status", rename_all = "snake_case")]
pub enum EventStatus {
    Active,
    Closed,
    Processed,
}

/// The two concrete contribution event kinds. Each kind keeps its own event,
/// contribution-log and due tables; this tag is the dispatch key between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Campaign,
    Stothrakazhcha,
}

impl EventKind {
    pub fn events_table(&self) -> &'static str {
        match self {
            EventKind::Campaign => "campaigns",
            EventKind::Stothrakazhcha => "stothrakazhcha_weeks",
        }
    }

    pub fn contributions_table(&self) -> &'static str {
        match self {
            EventKind::Campaign => "campaign_contributions",
            EventKind::Stothrakazhcha => "stothrakazhcha_contributions",
        }
    }

    pub fn dues_table(&self) -> &'static str {
        match self {
            EventKind::Campaign => "campaign_dues",
            EventKind::Stothrakazhcha => "stothrakazhcha_dues",
        }
    }

    /// SQL expression producing a display label for an event row.
    pub fn label_sql(&self) -> &'static str {
        match self {
            EventKind::Campaign => "name",
            EventKind::Stothrakazhcha => "('Stothrakazhcha ' || week_number || '/' || year)",
        }
    }

    /// Label expression qualified for use in joins.
    pub fn qualified_label_sql(&self, alias: &str) -> String {
        match self {
            EventKind::Campaign => format!("{}.name", alias),
            EventKind::Stothrakazhcha => format!(
                "('Stothrakazhcha ' || {a}.week_number || '/' || {a}.year)",
                a = alias
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Campaign => "campaign",
            EventKind::Stothrakazhcha => "stothrakazhcha",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "campaign" => Ok(EventKind::Campaign),
            "stothrakazhcha" => Ok(EventKind::Stothrakazhcha),
            other => Err(format!("unknown due type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub church_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount_type: AmountType,
    pub contribution_mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
    pub status: EventStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub total_collected: Decimal,
    pub total_contributors: i32,
    pub dues_processed: bool,
    pub dues_processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StothrakazhchaWeek {
    pub id: Uuid,
    pub church_id: Uuid,
    pub week_number: i32,
    pub year: i32,
    pub amount_type: AmountType,
    pub contribution_mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
    pub status: EventStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub total_collected: Decimal,
    pub total_contributors: i32,
    pub dues_processed: bool,
    pub dues_processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind-independent view of an event, fetched with a label expression so the
/// ledger code never branches on the concrete kind.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub church_id: Uuid,
    pub amount_type: AmountType,
    pub contribution_mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
    pub status: EventStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub total_collected: Decimal,
    pub total_contributors: i32,
    pub dues_processed: bool,
    pub label: String,
}

/// One row of an event's append-only contributor log.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contribution {
    pub id: Uuid,
    pub church_id: Uuid,
    pub event_id: Uuid,
    pub contributor_id: Uuid,
    pub contributor_type: PayerType,
    pub amount: Decimal,
    pub contributed_at: DateTime<Utc>,
    pub recorded_by: Option<Uuid>,
}

/// Aggregate snapshot returned after recording a contribution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub event_id: Uuid,
    pub total_collected: Decimal,
    pub total_contributors: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub description: Option<String>,
    pub amount_type: AmountType,
    pub contribution_mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStothrakazhchaRequest {
    pub week_number: i32,
    pub year: i32,
    pub amount_type: AmountType,
    pub contribution_mode: ContributionMode,
    pub fixed_amount: Option<Decimal>,
    pub minimum_amount: Option<Decimal>,
    pub due_date: Option<DateTime<Utc>>,
}
