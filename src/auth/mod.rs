use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;

/// Dashboard roles, ordered from widest to narrowest scope. One claims shape
/// and one login/refresh surface serves all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ChurchAdmin,
    UnitAdmin,
    KutayimaAdmin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ChurchAdmin => "church_admin",
            Role::UnitAdmin => "unit_admin",
            Role::KutayimaAdmin => "kutayima_admin",
            Role::Member => "member",
        }
    }

    /// Lower rank means wider authority.
    pub fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 0,
            Role::ChurchAdmin => 1,
            Role::UnitAdmin => 2,
            Role::KutayimaAdmin => 3,
            Role::Member => 4,
        }
    }

    pub fn is_admin(&self) -> bool {
        !matches!(self, Role::Member)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "church_admin" => Ok(Role::ChurchAdmin),
            "unit_admin" => Ok(Role::UnitAdmin),
            "kutayima_admin" => Ok(Role::KutayimaAdmin),
            "member" => Ok(Role::Member),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub token_type: TokenType,
    pub church_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub bavanakutayima_id: Option<Uuid>,
    pub house_id: Option<Uuid>,
    pub member_id: Option<Uuid>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn with_expiry(mut self, hours: u64) -> Self {
        let now = Utc::now();
        self.iat = now.timestamp();
        self.exp = (now + Duration::hours(hours as i64)).timestamp();
        self
    }
}

/// Access/refresh pair handed out by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "invalid token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Issue an access/refresh token pair for the given claims template. The
/// template's token_type and expiry fields are overwritten per token.
pub fn issue_token_pair(template: &Claims) -> Result<TokenPair, JwtError> {
    let security = &config::config().security;

    let access = Claims {
        token_type: TokenType::Access,
        ..template.clone()
    }
    .with_expiry(security.access_expiry_hours);

    let refresh = Claims {
        token_type: TokenType::Refresh,
        ..template.clone()
    }
    .with_expiry(security.refresh_expiry_hours);

    Ok(TokenPair {
        access_token: encode_with_secret(&access, &security.jwt_secret)?,
        refresh_token: encode_with_secret(&refresh, &security.jwt_secret)?,
        expires_in: access.exp - access.iat,
    })
}

/// Validate a token of the expected type and return its claims.
pub fn validate_token(token: &str, expected: TokenType) -> Result<Claims, JwtError> {
    let claims = decode_with_secret(token, &config::config().security.jwt_secret)?;
    if claims.token_type != expected {
        return Err(JwtError::InvalidToken("wrong token type".to_string()));
    }
    Ok(claims)
}

pub fn encode_with_secret(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;
    Ok(token_data.claims)
}

/// Salted SHA-256 digest, stored hex-encoded alongside its salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

pub fn generate_salt() -> String {
    // Uuid v4 gives 122 random bits, enough for a per-user salt
    Uuid::new_v4().simple().to_string()
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            role: Role::ChurchAdmin,
            token_type: TokenType::Access,
            church_id: Some(Uuid::new_v4()),
            unit_id: None,
            bavanakutayima_id: None,
            house_id: None,
            member_id: None,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let claims = template().with_expiry(1);
        let token = encode_with_secret(&claims, "test-secret").unwrap();
        let decoded = decode_with_secret(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.role, Role::ChurchAdmin);
        assert_eq!(decoded.church_id, claims.church_id);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = template().with_expiry(1);
        let token = encode_with_secret(&claims, "test-secret").unwrap();
        assert!(decode_with_secret(&token, "other-secret").is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let claims = template().with_expiry(1);
        assert!(matches!(
            encode_with_secret(&claims, ""),
            Err(JwtError::InvalidSecret)
        ));
    }

    #[test]
    fn role_parsing_roundtrip() {
        for role in [
            Role::SuperAdmin,
            Role::ChurchAdmin,
            Role::UnitAdmin,
            Role::KutayimaAdmin,
            Role::Member,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("pope".parse::<Role>().is_err());
    }

    #[test]
    fn password_hash_verifies_with_same_salt_only() {
        let salt = generate_salt();
        let hash = hash_password("secret123", &salt);
        assert!(verify_password("secret123", &salt, &hash));
        assert!(!verify_password("secret124", &salt, &hash));
        assert!(!verify_password("secret123", &generate_salt(), &hash));
    }
}
