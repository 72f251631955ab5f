use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Church {
    pub id: Uuid,
    pub name: String,
    pub place: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChurchRequest {
    pub name: String,
    pub place: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChurchRequest {
    pub name: Option<String>,
    pub place: Option<String>,
}
