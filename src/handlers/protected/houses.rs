use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::house::{CreateHouseRequest, UpdateHouseRequest};
use crate::database::repos::HouseRepo;
use crate::error::ApiError;
use crate::filter::HierarchyParams;
use crate::middleware::AuthUser;

/// GET /api/houses?unitId&bavanakutayimaId&houseId
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<HierarchyParams>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let params = params.scoped_to(&auth);
    let pool = DatabaseManager::pool().await?;
    let houses = HouseRepo::list(&pool, church_id, &params).await?;
    Ok(Json(json!({ "success": true, "data": houses })))
}

/// GET /api/houses/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let house = HouseRepo::get(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("House not found"))?;
    Ok(Json(json!({ "success": true, "data": house })))
}

/// POST /api/houses
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateHouseRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let house = HouseRepo::create(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": house }))))
}

/// PUT /api/houses/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHouseRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let house = HouseRepo::update(&pool, church_id, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": house })))
}

/// DELETE /api/houses/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    if crate::database::repos::DueRepo::payer_has_open_dues(&pool, id).await? {
        return Err(ApiError::conflict("House still has outstanding dues"));
    }
    let deleted = HouseRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("House not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
