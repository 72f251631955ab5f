use axum::{extract::Path, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, Claims, Role, TokenType};
use crate::database::manager::DatabaseManager;
use crate::database::models::user::User;
use crate::database::repos::{MemberRepo, UserRepo};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: String,
}

/// POST /auth/login/:role - Authenticate a user of the given role and receive
/// an access/refresh token pair.
///
/// One parameterized endpoint serves all five role dashboards; the role in
/// the path picks the namespace the username is resolved in.
pub async fn login(
    Path(role): Path<String>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let role: Role = role.parse().map_err(ApiError::bad_request)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserRepo::find_by_username_role(&pool, &payload.username, role)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !auth::verify_password(&payload.password, &user.password_salt, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = claims_for(&user).await?;
    let pair = auth::issue_token_pair(&claims)?;

    tracing::info!(user = %user.username, role = %role, "login");

    Ok(Json(json!({
        "success": true,
        "data": {
            "access_token": pair.access_token,
            "refresh_token": pair.refresh_token,
            "token_type": "Bearer",
            "expires_in": pair.expires_in,
            "user": {
                "id": user.id,
                "username": user.username,
                "role": user.role,
                "church_id": user.church_id,
            }
        }
    })))
}

/// POST /auth/refresh/:role - Exchange a refresh token for a fresh pair.
///
/// The token must carry token_type=refresh and the role in the path; the user
/// is re-fetched so revoked accounts stop refreshing immediately.
pub async fn refresh(
    Path(role): Path<String>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<Value>, ApiError> {
    let role: Role = role.parse().map_err(ApiError::bad_request)?;

    let claims = auth::validate_token(&payload.refresh_token, TokenType::Refresh)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    if claims.role != role {
        return Err(ApiError::unauthorized("Token was issued for another role"));
    }

    let pool = DatabaseManager::pool().await?;
    let user = UserRepo::find_by_id(&pool, claims.sub)
        .await?
        .filter(|u| u.role == role)
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    let claims = claims_for(&user).await?;
    let pair = auth::issue_token_pair(&claims)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "access_token": pair.access_token,
            "refresh_token": pair.refresh_token,
            "token_type": "Bearer",
            "expires_in": pair.expires_in,
        }
    })))
}

/// Build a claims template from the user row, pulling hierarchy scope from
/// the linked member record when there is one.
async fn claims_for(user: &User) -> Result<Claims, ApiError> {
    let mut claims = Claims {
        sub: user.id,
        role: user.role,
        token_type: TokenType::Access,
        church_id: user.church_id,
        unit_id: user.unit_id,
        bavanakutayima_id: user.bavanakutayima_id,
        house_id: None,
        member_id: user.member_id,
        exp: 0,
        iat: 0,
    };

    if let Some(member_id) = user.member_id {
        let pool = DatabaseManager::pool().await?;
        if let Some(member) = MemberRepo::get_by_id(&pool, member_id).await? {
            claims.unit_id = Some(member.unit_id);
            claims.bavanakutayima_id = Some(member.bavanakutayima_id);
            claims.house_id = Some(member.house_id);
        }
    }

    Ok(claims)
}
