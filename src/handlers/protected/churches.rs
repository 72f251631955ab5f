use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::church::{CreateChurchRequest, UpdateChurchRequest};
use crate::database::repos::ChurchRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/churches - super admins see every church, everyone else their own
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let churches = match auth.role {
        Role::SuperAdmin => ChurchRepo::list(&pool).await?,
        _ => {
            let church_id = auth.require_church()?;
            ChurchRepo::get(&pool, church_id).await?.into_iter().collect()
        }
    };
    Ok(Json(json!({ "success": true, "data": churches })))
}

/// GET /api/churches/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if auth.role != Role::SuperAdmin && auth.church_id != Some(id) {
        return Err(ApiError::forbidden("Cannot access another church"));
    }
    let pool = DatabaseManager::pool().await?;
    let church = ChurchRepo::get(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Church not found"))?;
    Ok(Json(json!({ "success": true, "data": church })))
}

/// POST /api/churches
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateChurchRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::SuperAdmin)?;
    let pool = DatabaseManager::pool().await?;
    let church = ChurchRepo::create(&pool, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": church }))))
}

/// PUT /api/churches/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateChurchRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::SuperAdmin)?;
    let pool = DatabaseManager::pool().await?;
    let church = ChurchRepo::update(&pool, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": church })))
}

/// DELETE /api/churches/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::SuperAdmin)?;
    let pool = DatabaseManager::pool().await?;
    let deleted = ChurchRepo::delete(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Church not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
