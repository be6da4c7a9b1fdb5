//! Token-signing configuration.
//!
//! No endpoint enforces authentication yet; the values are loaded and kept
//! on the application config so token issuance can be wired in without a
//! config change. Follows the same `FromEnv` pattern as [`ServerConfig`].
//!
//! [`ServerConfig`]: crate::server::ServerConfig

use crate::{env_or_default, ConfigError, FromEnv};

/// Secret-key / token configuration.
///
/// Environment variables:
/// - `SECRET_KEY` (default: a placeholder that must be changed in production)
/// - `TOKEN_ALGORITHM` (default: `HS256`)
/// - `ACCESS_TOKEN_EXPIRE_MINUTES` (default: `30`)
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret_key: String,
    pub algorithm: String,
    pub access_token_expire_minutes: u64,
}

impl FromEnv for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret_key = env_or_default(
            "SECRET_KEY",
            "your-secret-key-change-this-in-production",
        );
        let algorithm = env_or_default("TOKEN_ALGORITHM", "HS256");
        let access_token_expire_minutes = env_or_default("ACCESS_TOKEN_EXPIRE_MINUTES", "30")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            secret_key,
            algorithm,
            access_token_expire_minutes,
        })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "your-secret-key-change-this-in-production".to_string(),
            algorithm: "HS256".to_string(),
            access_token_expire_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        temp_env::with_vars(
            [
                ("SECRET_KEY", None::<&str>),
                ("TOKEN_ALGORITHM", None),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", None),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.algorithm, "HS256");
                assert_eq!(config.access_token_expire_minutes, 30);
            },
        );
    }

    #[test]
    fn test_auth_config_custom_values() {
        temp_env::with_vars(
            [
                ("SECRET_KEY", Some("another-secret")),
                ("TOKEN_ALGORITHM", Some("HS512")),
                ("ACCESS_TOKEN_EXPIRE_MINUTES", Some("120")),
            ],
            || {
                let config = AuthConfig::from_env().unwrap();
                assert_eq!(config.secret_key, "another-secret");
                assert_eq!(config.algorithm, "HS512");
                assert_eq!(config.access_token_expire_minutes, 120);
            },
        );
    }

    #[test]
    fn test_auth_config_invalid_expiry() {
        temp_env::with_var("ACCESS_TOKEN_EXPIRE_MINUTES", Some("soon"), || {
            let result = AuthConfig::from_env();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
        });
    }
}
