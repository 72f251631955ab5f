use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::bavanakutayima::{
    CreateBavanakutayimaRequest, UpdateBavanakutayimaRequest,
};
use crate::database::repos::BavanakutayimaRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "unitId")]
    pub unit_id: Option<Uuid>,
}

/// GET /api/bavanakutayimas?unitId=
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let unit_id = auth.unit_id.or(query.unit_id);
    let pool = DatabaseManager::pool().await?;
    let kutayimas = BavanakutayimaRepo::list(&pool, church_id, unit_id).await?;
    Ok(Json(json!({ "success": true, "data": kutayimas })))
}

/// GET /api/bavanakutayimas/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let kutayima = BavanakutayimaRepo::get(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Bavanakutayima not found"))?;
    Ok(Json(json!({ "success": true, "data": kutayima })))
}

/// POST /api/bavanakutayimas
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateBavanakutayimaRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let kutayima = BavanakutayimaRepo::create(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": kutayima }))))
}

/// PUT /api/bavanakutayimas/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBavanakutayimaRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let kutayima = BavanakutayimaRepo::update(&pool, church_id, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": kutayima })))
}

/// DELETE /api/bavanakutayimas/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let deleted = BavanakutayimaRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Bavanakutayima not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
