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
use crate::database::models::member::{CreateMemberRequest, UpdateMemberRequest};
use crate::database::repos::MemberRepo;
use crate::error::ApiError;
use crate::filter::HierarchyParams;
use crate::middleware::AuthUser;

/// GET /api/members?unitId&bavanakutayimaId&houseId&memberId
pub async fn list(
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<HierarchyParams>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    let params = params.scoped_to(&auth);
    let pool = DatabaseManager::pool().await?;
    let members = MemberRepo::list(&pool, church_id, &params).await?;
    Ok(Json(json!({ "success": true, "data": members })))
}

/// GET /api/members/:id
pub async fn get(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let church_id = auth.require_church()?;
    if auth.role == Role::Member && auth.member_id != Some(id) {
        return Err(ApiError::forbidden("Members can only view their own record"));
    }
    let pool = DatabaseManager::pool().await?;
    let member = MemberRepo::get(&pool, church_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Member not found"))?;
    Ok(Json(json!({ "success": true, "data": member })))
}

/// POST /api/members
pub async fn create(
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let member = MemberRepo::create(&pool, church_id, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "data": member }))))
}

/// PUT /api/members/:id
pub async fn update(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    let member = MemberRepo::update(&pool, church_id, id, &req).await?;
    Ok(Json(json!({ "success": true, "data": member })))
}

/// DELETE /api/members/:id
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_role(Role::ChurchAdmin)?;
    let church_id = auth.require_church()?;
    let pool = DatabaseManager::pool().await?;
    if crate::database::repos::DueRepo::payer_has_open_dues(&pool, id).await? {
        return Err(ApiError::conflict("Member still has outstanding dues"));
    }
    let deleted = MemberRepo::delete(&pool, church_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Member not found"));
    }
    Ok(Json(json!({ "success": true, "data": { "deleted": deleted } })))
}
