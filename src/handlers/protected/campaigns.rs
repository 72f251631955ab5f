use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::contribution::{CreateCampaignRequest, EventKind, EventStatus};
use crate::database::models::PaymentMethod;
use crate::database::repos::EventRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services;

use super::resolve_payer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeRequest {
    pub amount: Decimal,
    pub member_id: Option<Uuid>,
    pub house_id: Option<Uuid>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// GET /api/campaigns
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let campaigns = EventRepo::list_campaigns(&pool, church_id).await?;
    Ok(Json(json!({ "success": true, "data": campaigns })))
}

/// GET /api/campaigns/:id - campaign with its contributor log
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let campaign = EventRepo::get_campaign(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Campaign not found"))?;
    let contributors = EventRepo::list_contributions(&pool, EventKind::Campaign, id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "campaign": campaign, "contributors": contributors }
    })))
}

/// POST /api/campaigns
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let campaign = EventRepo::create_campaign(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": campaign }))))
}

/// PUT /api/campaigns/:id/close - stop accepting contributions
pub async fn close(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let updated =
        EventRepo::set_status(&pool, EventKind::Campaign, church_id, id, EventStatus::Closed)
            .await?;
    if updated == 0 {
        return Err(ApiError::not_found("Campaign not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "closed": true } })))
}

/// POST /api/campaigns/:id/contribute - record a contribution
pub async fn contribute(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ContributeRequest>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let payer = resolve_payer(&auth, req.member_id, req.house_id)?;
    let summary = services::contribute(
        EventKind::Campaign,
        id,
        church_id,
        payer,
        req.amount,
        req.payment_method,
        Some(auth.user_id),
    )
    .await?;
    Ok(Json(json!({ "success": true, "data": summary })))
}
