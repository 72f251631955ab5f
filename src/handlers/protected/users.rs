use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::manager::DatabaseManager;
use crate::database::models::user::CreateUserRequest;
use crate::database::repos::UserRepo;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/users - admin accounts of the caller's church
pub async fn list(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let users = UserRepo::list(&pool, church_id).await?;
    Ok(Json(json!({ "success": true, "data": users })))
}

/// POST /api/users - create an admin or member login within the church
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;

    if req.role == Role::SuperAdmin {
        return Err(ApiError::forbidden("Super admin accounts cannot be created here"));
    }
    if req.role == Role::Member && req.member_id.is_none() {
        return Err(ApiError::validation_error("Member logins require a memberId"));
    }
    if req.role == Role::UnitAdmin && req.unit_id.is_none() {
        return Err(ApiError::validation_error("Unit admin logins require a unitId"));
    }
    if req.role == Role::KutayimaAdmin && req.bavanakutayima_id.is_none() {
        return Err(ApiError::validation_error(
            "Kutayima admin logins require a bavanakutayimaId",
        ));
    }

    let pool = DatabaseManager::pool().await?;
    let user = UserRepo::create(&pool, Some(church_id), &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": user }))))
}

/// DELETE /api/users/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let deleted = UserRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("User not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
