use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::contribution::{
    CreateStothrakazhchaRequest, EventKind, EventStatus,
};
use crate::database::models::PaymentMethod;
use crate::database::repos::EventRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services;

use super::resolve_payer;

/// Weekly contributions are self-service: the payer comes from the caller's
/// session. Admins recording on someone's behalf pass memberId explicitly.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeRequest {
    pub amount: Decimal,
    pub member_id: Option<Uuid>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// GET /api/stothrakazhcha
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let weeks = EventRepo::list_weeks(&pool, church_id).await?;
    Ok(Json(json!({ "success": true, "data": weeks })))
}

/// GET /api/stothrakazhcha/:id - week with its contributor log
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let week = EventRepo::get_week(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stothrakazhcha week not found"))?;
    let contributors = EventRepo::list_contributions(&pool, EventKind::Stothrakazhcha, id).await?;
    Ok(Json(json!({
        "success": true,
        "data": { "week": week, "contributors": contributors }
    })))
}

/// POST /api/stothrakazhcha
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateStothrakazhchaRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let week = EventRepo::create_week(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": week }))))
}

/// PUT /api/stothrakazhcha/:id/close
pub async fn close(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let updated = EventRepo::set_status(
        &pool,
        EventKind::Stothrakazhcha,
        church_id,
        id,
        EventStatus::Closed,
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::not_found("Stothrakazhcha week not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "closed": true } })))
}

/// POST /api/stothrakazhcha/:id/contribute
pub async fn contribute(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<ContributeRequest>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let payer = resolve_payer(&auth, req.member_id, None)?;
    let summary = services::contribute(
        EventKind::Stothrakazhcha,
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
