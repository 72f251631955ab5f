use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "news_kind", rename_all = "snake_case")]
pub enum NewsKind {
    News,
    Event,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: Uuid,
    pub church_id: Uuid,
    pub kind: NewsKind,
    pub title: String,
    pub body: String,
    pub event_date: Option<DateTime<Utc>>,
    pub published: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub kind: NewsKind,
    pub title: String,
    pub body: String,
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub published: Option<bool>,
}
