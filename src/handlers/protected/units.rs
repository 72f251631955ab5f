use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::unit::{CreateUnitRequest, UpdateUnitRequest};
use crate::database::repos::UnitRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/units
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let units = UnitRepo::list(&pool, church_id).await?;
    Ok(Json(json!({ "success": true, "data": units })))
}

/// GET /api/units/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let unit = UnitRepo::get(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Unit not found"))?;
    Ok(Json(json!({ "success": true, "data": unit })))
}

/// POST /api/units
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateUnitRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let unit = UnitRepo::create(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": unit }))))
}

/// PUT /api/units/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUnitRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let unit = UnitRepo::update(&pool, church_id, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": unit })))
}

/// DELETE /api/units/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let deleted = UnitRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Unit not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
