use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/auth/whoami - echo the caller's resolved auth context
pub async fn whoami(Extension(auth): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({
        "success": true,
        "data": {
            "user_id": auth.user_id,
            "role": auth.role,
            "church_id": auth.church_id,
            "unit_id": auth.unit_id,
            "bavanakutayima_id": auth.bavanakutayima_id,
            "house_id": auth.house_id,
            "member_id": auth.member_id,
        }
    })))
}
