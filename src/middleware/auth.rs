use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{validate_token, Claims, Role, TokenType};
use crate::error::ApiError;

/// Authenticated user context extracted from the access JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub church_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub bavanakutayima_id: Option<Uuid>,
    pub house_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            church_id: claims.church_id,
            unit_id: claims.unit_id,
            bavanakutayima_id: claims.bavanakutayima_id,
            house_id: claims.house_id,
            member_id: claims.member_id,
        }
    }
}

impl AuthUser {
    /// Church scope of the caller. Every non-super role carries one.
    pub fn require_church(&self) -> Result<Uuid, ApiError> {
        self.church_id
            .ok_or_else(|| ApiError::forbidden("This operation requires a church scope"))
    }

    /// Require the caller's role to be at least as wide as `role`.
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role.rank() <= role.rank() {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!(
                "Requires {} access",
                role.as_str()
            )))
        }
    }

    /// Require one of the listed roles exactly.
    pub fn require_one_of(&self, roles: &[Role]) -> Result<(), ApiError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::forbidden("Insufficient role for this operation"))
        }
    }
}

/// JWT authentication middleware that validates access tokens and injects the
/// caller context into request extensions.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_token(&token, TokenType::Access)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(role: Role, church: Option<Uuid>) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role,
            church_id: church,
            unit_id: None,
            bavanakutayima_id: None,
            house_id: None,
            member_id: None,
        }
    }

    #[test]
    fn role_rank_gates_widen_downwards() {
        let admin = auth_user(Role::ChurchAdmin, Some(Uuid::new_v4()));
        assert!(admin.require_role(Role::ChurchAdmin).is_ok());
        assert!(admin.require_role(Role::KutayimaAdmin).is_ok());
        assert!(admin.require_role(Role::SuperAdmin).is_err());

        let member = auth_user(Role::Member, Some(Uuid::new_v4()));
        assert!(member.require_role(Role::KutayimaAdmin).is_err());
    }

    #[test]
    fn super_admin_has_no_church_scope() {
        let root = auth_user(Role::SuperAdmin, None);
        assert!(root.require_church().is_err());
    }
}
