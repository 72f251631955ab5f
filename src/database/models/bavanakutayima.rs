use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Prayer-group-level unit between Unit and House in the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bavanakutayima {
    pub id: Uuid,
    pub church_id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub kutayima_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBavanakutayimaRequest {
    pub unit_id: Uuid,
    pub name: String,
    pub kutayima_number: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBavanakutayimaRequest {
    pub name: Option<String>,
}
