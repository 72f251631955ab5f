use axum::{extract::Query, response::Json, Extension};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::models::contribution::EventKind;
use crate::database::models::PaymentMethod;
use crate::error::ApiError;
use crate::filter::HierarchyParams;
use crate::middleware::AuthUser;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct DuesQuery {
    #[serde(rename = "dueType")]
    pub due_type: Option<String>,
    #[serde(rename = "unitId")]
    pub unit_id: Option<Uuid>,
    #[serde(rename = "bavanakutayimaId")]
    pub bavanakutayima_id: Option<Uuid>,
    #[serde(rename = "houseId")]
    pub house_id: Option<Uuid>,
    #[serde(rename = "memberId")]
    pub member_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayDueRequest {
    pub due_id: Uuid,
    pub due_type: EventKind,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub as_of: Option<DateTime<Utc>>,
}

/// GET /api/dues?dueType&unitId&bavanakutayimaId&houseId&memberId
///
/// Outstanding dues, hierarchy-scoped server-side. Members only ever see
/// their own.
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<DuesQuery>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;

    let due_type = match query.due_type.as_deref() {
        Some(s) => Some(s.parse::<EventKind>().map_err(ApiError::bad_request)?),
        None => None,
    };

    let params = HierarchyParams {
        unit_id: query.unit_id,
        bavanakutayima_id: query.bavanakutayima_id,
        house_id: query.house_id,
        member_id: query.member_id,
        limit: query.limit,
    }
    .scoped_to(&auth);

    let dues = services::list_outstanding(due_type, church_id, &params).await?;
    Ok(Json(json!({ "success": true, "data": dues })))
}

/// POST /api/dues/pay {dueId, dueType, amount, paymentMethod}
///
/// dueType dispatches between the campaign and stothrakazhcha due tables.
pub async fn pay(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<PayDueRequest>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;

    if auth.role == Role::Member {
        // Members settle their own dues only
        let pool = crate::database::manager::DatabaseManager::pool().await?;
        let due = crate::database::repos::DueRepo::get(&pool, req.due_type, church_id, req.due_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Due record not found"))?;
        let own = auth.member_id == Some(due.due_for_id) || auth.house_id == Some(due.due_for_id);
        if !own {
            return Err(ApiError::forbidden("This due belongs to someone else"));
        }
    }

    let due = services::pay_due(
        req.due_type,
        req.due_id,
        church_id,
        req.amount,
        req.payment_method,
        Some(auth.user_id),
    )
    .await?;
    Ok(Json(json!({ "success": true, "data": due })))
}

/// POST /api/campaign-dues/process
pub async fn process_campaign(
    Extension(auth): Extension<AuthUser>,
    body: Option<Json<ProcessRequest>>,
) -> Result<Json<Value>, ApiError> {
    process(auth, EventKind::Campaign, body).await
}

/// POST /api/stothrakazhcha-dues/process
pub async fn process_stothrakazhcha(
    Extension(auth): Extension<AuthUser>,
    body: Option<Json<ProcessRequest>>,
) -> Result<Json<Value>, ApiError> {
    process(auth, EventKind::Stothrakazhcha, body).await
}

async fn process(
    auth: AuthUser,
    kind: EventKind,
    body: Option<Json<ProcessRequest>>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let as_of = body.and_then(|Json(b)| b.as_of).unwrap_or_else(Utc::now);
    let report = services::process_dues(kind, church_id, as_of).await?;
    Ok(Json(json!({ "success": true, "data": report })))
}
