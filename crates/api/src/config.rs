use gamesapi_core::pagination::DEFAULT_LIMIT;
use gamesapi_core::throttle::{ThrottleRate, SCOPE_ANON, SCOPE_GAME_CATEGORIES, SCOPE_USER};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base used for hyperlinks when a request carries no `Host` header.
    pub public_url: String,
    /// Page size used when a list request has no `limit` (default: `5`).
    pub page_size: i64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Request rates per throttle scope.
    pub throttle: ThrottleConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_URL`           | `http://localhost:3000`    |
    /// | `PAGE_SIZE`            | `5`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_url =
            std::env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        let page_size: i64 = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_LIMIT.to_string())
            .parse()
            .expect("PAGE_SIZE must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_url,
            page_size,
            jwt: JwtConfig::from_env(),
            throttle: ThrottleConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rates for the default anon/user scopes and the named scopes.
///
/// `None` disables throttling for that scope.
#[derive(Debug, Clone, Default)]
pub struct ThrottleConfig {
    pub anon: Option<ThrottleRate>,
    pub user: Option<ThrottleRate>,
    pub game_categories: Option<ThrottleRate>,
}

impl ThrottleConfig {
    /// Load throttle rates from the environment.
    ///
    /// | Env Var                         | Default     |
    /// |---------------------------------|-------------|
    /// | `THROTTLE_RATE_ANON`            | `300/hour`  |
    /// | `THROTTLE_RATE_USER`            | `1000/hour` |
    /// | `THROTTLE_RATE_GAME_CATEGORIES` | `300/hour`  |
    ///
    /// Set a variable to `off` to disable that scope.
    pub fn from_env() -> Self {
        Self {
            anon: rate_from_env("THROTTLE_RATE_ANON", "300/hour"),
            user: rate_from_env("THROTTLE_RATE_USER", "1000/hour"),
            game_categories: rate_from_env("THROTTLE_RATE_GAME_CATEGORIES", "300/hour"),
        }
    }

    /// Rate for a scope name, `None` if unknown or disabled.
    pub fn rate_for_scope(&self, scope: &str) -> Option<ThrottleRate> {
        match scope {
            SCOPE_ANON => self.anon,
            SCOPE_USER => self.user,
            SCOPE_GAME_CATEGORIES => self.game_categories,
            _ => None,
        }
    }
}

fn rate_from_env(var: &str, default: &str) -> Option<ThrottleRate> {
    let value = std::env::var(var).unwrap_or_else(|_| default.to_string());
    ThrottleRate::parse_optional(&value).unwrap_or_else(|e| panic!("{var}: {e}"))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn parse_origins_drops_blanks() {
        assert_eq!(
            parse_origins("http://a.test, ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn rate_for_scope_maps_names() {
        let config = ThrottleConfig {
            anon: Some(ThrottleRate::new(1, Duration::from_secs(1))),
            user: None,
            game_categories: Some(ThrottleRate::new(3, Duration::from_secs(60))),
        };
        assert_eq!(config.rate_for_scope(SCOPE_ANON).unwrap().num_requests, 1);
        assert!(config.rate_for_scope(SCOPE_USER).is_none());
        assert_eq!(
            config
                .rate_for_scope(SCOPE_GAME_CATEGORIES)
                .unwrap()
                .num_requests,
            3
        );
        assert!(config.rate_for_scope("players").is_none());
    }

    #[test]
    fn default_config_disables_everything() {
        let config = ThrottleConfig::default();
        assert!(config.anon.is_none());
        assert!(config.user.is_none());
        assert!(config.game_categories.is_none());
    }
}
