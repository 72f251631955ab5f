use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: Uuid,
    pub church_id: Uuid,
    pub unit_id: Uuid,
    pub bavanakutayima_id: Uuid,
    pub house_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hierarchical_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub house_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Member display number: the house number plus a per-house sequence.
pub fn hierarchical_number(house_number: &str, member_seq: i64) -> String {
    format!("{}/{}", house_number, member_seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchical_number_extends_house_number() {
        assert_eq!(hierarchical_number("2-5-14", 3), "2-5-14/3");
    }
}
