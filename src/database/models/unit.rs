use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Unit {
    pub id: Uuid,
    pub church_id: Uuid,
    pub name: String,
    pub unit_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitRequest {
    pub name: String,
    /// Assigned from the church's next free number when omitted.
    pub unit_number: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUnitRequest {
    pub name: Option<String>,
}
