use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct House {
    pub id: Uuid,
    pub church_id: Uuid,
    pub unit_id: Uuid,
    pub bavanakutayima_id: Uuid,
    pub family_name: String,
    pub hierarchical_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHouseRequest {
    pub unit_id: Uuid,
    pub bavanakutayima_id: Uuid,
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHouseRequest {
    pub family_name: Option<String>,
}

/// Display identifier encoding the house's position in the org hierarchy,
/// assigned once at creation.
pub fn hierarchical_number(unit_number: i32, kutayima_number: i32, house_seq: i64) -> String {
    format!("{}-{}-{}", unit_number, kutayima_number, house_seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchical_number_encodes_position() {
        assert_eq!(hierarchical_number(2, 5, 14), "2-5-14");
    }
}
