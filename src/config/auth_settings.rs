use std::env;

const DEFAULT_ACCESS_TOKEN_MINUTES: i64 = 30;
const DEFAULT_REFRESH_TOKEN_DAYS: i64 = 14;

/// Non-secret authentication settings.
///
/// Token lifetimes are read from the environment with fixed defaults so a
/// bare deployment issues 30-minute access tokens and 14-day refresh tokens.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    /// Origin allowed for credentialed CORS requests
    pub frontend_origin: String,
    /// When true the refresh cookie carries the Secure attribute
    pub secure_cookies: bool,
}

impl AuthSettings {
    /// Load settings from environment variables, applying defaults
    pub fn from_env() -> Self {
        let access_token_minutes = env::var("ACCESS_TOKEN_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_MINUTES);

        let refresh_token_days = env::var("REFRESH_TOKEN_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_TOKEN_DAYS);

        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let secure_cookies = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            access_token_minutes,
            refresh_token_days,
            frontend_origin,
            secure_cookies,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_seconds(&self) -> i64 {
        self.access_token_minutes * 60
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_seconds(&self) -> i64 {
        self.refresh_token_days * 24 * 60 * 60
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            access_token_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
            refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
            frontend_origin: "http://localhost:5173".to_string(),
            secure_cookies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lifetimes_match_expected_policy() {
        let settings = AuthSettings::default();
        assert_eq!(settings.access_token_seconds(), 1800);
        assert_eq!(settings.refresh_token_seconds(), 14 * 24 * 60 * 60);
        assert!(!settings.secure_cookies);
    }
}
