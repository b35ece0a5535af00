use std::fmt;

use crate::config::{SecretConfig, SecretType};

/// Custom error type for secret-related failures
#[derive(Debug)]
pub enum SecretError {
    Missing {
        secret_name: String,
    },
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

impl SecretError {
    pub fn missing(secret_name: &str) -> Self {
        Self::Missing {
            secret_name: secret_name.to_string(),
        }
    }

    pub fn invalid_length(secret_name: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            secret_name: secret_name.to_string(),
            expected,
            actual,
        }
    }
}

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { secret_name } => {
                write!(f, "Required secret '{}' is missing", secret_name)
            }
            Self::InvalidLength {
                secret_name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Secret '{}' must be at least {} characters, got {}",
                    secret_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SecretError {}

/// Centralized manager for application secrets.
///
/// Access and refresh tokens are signed with distinct secrets so a leaked
/// secret compromises only one token category.
pub struct SecretManager {
    access_token_secret: String,
    refresh_token_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Initialize the SecretManager by loading and validating all secrets
    ///
    /// # Errors
    /// Returns `SecretError` if any required secret is missing or fails validation
    pub fn init() -> Result<Self, SecretError> {
        let access_token_secret = Self::load_secret(&Self::access_token_config())?;
        let refresh_token_secret = Self::load_secret(&Self::refresh_token_config())?;
        let password_pepper = Self::load_secret(&Self::pepper_config())?;

        Ok(Self {
            access_token_secret,
            refresh_token_secret,
            password_pepper,
        })
    }

    fn access_token_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "ACCESS_TOKEN_SECRET".to_string(),
        })
        .required(true)
        .min_length(32)
    }

    fn refresh_token_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "REFRESH_TOKEN_SECRET".to_string(),
        })
        .required(true)
        .min_length(32)
    }

    fn pepper_config() -> SecretConfig {
        SecretConfig::new(SecretType::EnvVar {
            name: "PASSWORD_PEPPER".to_string(),
        })
        .required(true)
        .min_length(16)
    }

    /// Get the access-token signing secret
    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }

    /// Get the refresh-token signing secret
    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    /// Get the pepper for password hashing
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Load a secret based on its configuration
    pub(crate) fn load_secret(config: &SecretConfig) -> Result<String, SecretError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => match std::env::var(name) {
                Ok(v) => v,
                Err(_) if !config.required => return Ok(String::new()),
                Err(_) => return Err(SecretError::missing(name)),
            },
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                let name = match &config.secret_type {
                    SecretType::EnvVar { name } => name,
                };
                return Err(SecretError::invalid_length(name, min_len, value.len()));
            }
        }

        Ok(value)
    }

    /// Build a SecretManager from explicit values (test construction path)
    #[cfg(test)]
    pub fn for_tests(access: &str, refresh: &str, pepper: &str) -> Self {
        Self {
            access_token_secret: access.to_string(),
            refresh_token_secret: refresh.to_string(),
            password_pepper: pepper.to_string(),
        }
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("access_token_secret", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 3 }}")
    }
}
