use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::Role;

/// Auth principal. One table serves all five role namespaces; the role column
/// plus the optional scope references replace the per-role collections of the
/// original design.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub church_id: Option<Uuid>,
    pub role: Role,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_salt: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub unit_id: Option<Uuid>,
    pub bavanakutayima_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub role: Role,
    pub username: String,
    pub password: String,
    pub unit_id: Option<Uuid>,
    pub bavanakutayima_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
}
