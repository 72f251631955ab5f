use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub dues: DuesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Hard cap applied to client-supplied list limits.
    pub max_limit: i64,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub access_expiry_hours: u64,
    pub refresh_expiry_hours: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuesConfig {
    /// Assessed amount for flexible events that carry no minimum_amount.
    pub default_assessment: Decimal,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Filter overrides
        if let Ok(v) = env::var("FILTER_MAX_LIMIT") {
            self.filter.max_limit = v.parse().unwrap_or(self.filter.max_limit);
        }
        if let Ok(v) = env::var("FILTER_DEBUG_LOGGING") {
            self.filter.debug_logging = v.parse().unwrap_or(self.filter.debug_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_ACCESS_EXPIRY_HOURS") {
            self.security.access_expiry_hours = v.parse().unwrap_or(self.security.access_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_REFRESH_EXPIRY_HOURS") {
            self.security.refresh_expiry_hours = v.parse().unwrap_or(self.security.refresh_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Dues overrides
        if let Ok(v) = env::var("DUES_DEFAULT_ASSESSMENT") {
            self.dues.default_assessment =
                Decimal::from_str(&v).unwrap_or(self.dues.default_assessment);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig { max_limit: 1000, debug_logging: true },
            database: DatabaseConfig { max_connections: 10, connection_timeout: 30 },
            security: SecurityConfig {
                jwt_secret: "parish-dev-secret".to_string(),
                access_expiry_hours: 24,
                refresh_expiry_hours: 24 * 7,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            dues: DuesConfig { default_assessment: Decimal::new(100, 0) },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            filter: FilterConfig { max_limit: 500, debug_logging: false },
            database: DatabaseConfig { max_connections: 20, connection_timeout: 10 },
            security: SecurityConfig {
                jwt_secret: String::new(),
                access_expiry_hours: 12,
                refresh_expiry_hours: 24 * 7,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            dues: DuesConfig { default_assessment: Decimal::new(100, 0) },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            filter: FilterConfig { max_limit: 100, debug_logging: false },
            database: DatabaseConfig { max_connections: 50, connection_timeout: 5 },
            security: SecurityConfig {
                jwt_secret: String::new(),
                access_expiry_hours: 4,
                refresh_expiry_hours: 24 * 7,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            dues: DuesConfig { default_assessment: Decimal::new(100, 0) },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.filter.max_limit, 1000);
        assert!(!config.security.jwt_secret.is_empty());
        assert_eq!(config.dues.default_assessment, Decimal::new(100, 0));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.filter.max_limit, 100);
        // Production refuses to mint tokens until JWT_SECRET is provided
        assert!(config.security.jwt_secret.is_empty());
    }
}
