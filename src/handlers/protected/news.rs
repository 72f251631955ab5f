use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::news::{CreateNewsRequest, UpdateNewsRequest};
use crate::database::repos::NewsRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/news - members see published items only
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let published_only = auth.role == Role::Member;
    let items = NewsRepo::list(&pool, church_id, published_only).await?;
    Ok(Json(json!({ "success": true, "data": items })))
}

/// GET /api/news/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let item = NewsRepo::get(&pool, church_id, id)
        .await?
        .filter(|n| n.published || auth.role != Role::Member)
        .ok_or_else(|| ApiError::not_found("News item not found"))?;
    Ok(Json(json!({ "success": true, "data": item })))
}

/// POST /api/news
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let item = NewsRepo::create(&pool, church_id, auth.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": item }))))
}

/// PUT /api/news/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNewsRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let item = NewsRepo::update(&pool, church_id, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": item })))
}

/// DELETE /api/news/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let deleted = NewsRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("News item not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
