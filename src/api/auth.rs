use std::sync::Arc;
use std::time::Duration;

use poem::web::cookie::{Cookie, CookieJar, SameSite};
use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::config::AuthSettings;
use crate::errors::AuthApiError;
use crate::services::{AuthGate, SessionManager};
use crate::types::dto::auth::{
    LoginRequest, LoginResponse, LogoutResponse, RefreshResponse, UserProfile,
};

/// Cookie carrying the refresh token; never exposed to response bodies
const REFRESH_COOKIE: &str = "refresh_token";

/// Authentication API endpoints
pub struct AuthApi {
    session_manager: Arc<SessionManager>,
    auth_gate: Arc<AuthGate>,
    settings: AuthSettings,
}

impl AuthApi {
    pub fn new(
        session_manager: Arc<SessionManager>,
        auth_gate: Arc<AuthGate>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            session_manager,
            auth_gate,
            settings,
        }
    }

    /// Install the refresh token as an httpOnly cookie.
    ///
    /// SameSite=None because the frontend runs on a different origin; the
    /// Secure attribute follows the deployment environment.
    fn set_refresh_cookie(&self, cookie_jar: &CookieJar, token: &str) {
        let mut cookie = Cookie::new_with_str(REFRESH_COOKIE, token);
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::None);
        cookie.set_path("/");
        cookie.set_secure(self.settings.secure_cookies);
        cookie.set_max_age(Duration::from_secs(
            self.settings.refresh_token_seconds() as u64
        ));
        cookie_jar.add(cookie);
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with login name and password to establish a session
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(
        &self,
        body: Json<LoginRequest>,
        cookie_jar: &CookieJar,
    ) -> Result<Json<LoginResponse>, AuthApiError> {
        let outcome = self
            .session_manager
            .login(&body.login, &body.password)
            .await?;

        self.set_refresh_cookie(cookie_jar, &outcome.refresh_token);

        Ok(Json(LoginResponse {
            user: UserProfile::from_parts(outcome.user, outcome.roles, outcome.permissions),
            access_token: outcome.access_token,
            token_type: "Bearer".to_string(),
            expires_in: outcome.expires_in,
        }))
    }

    /// Rotate the refresh token cookie and issue a new access token
    #[oai(
        path = "/refresh-token",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn refresh_token(
        &self,
        cookie_jar: &CookieJar,
    ) -> Result<Json<RefreshResponse>, AuthApiError> {
        let token = cookie_jar
            .get(REFRESH_COOKIE)
            .map(|c| c.value_str().to_string())
            .ok_or_else(|| {
                AuthApiError::from(crate::errors::AuthError::invalid_token(
                    "refresh",
                    "missing refresh token cookie",
                ))
            })?;

        let outcome = self.session_manager.refresh(&token).await?;

        self.set_refresh_cookie(cookie_jar, &outcome.refresh_token);

        Ok(Json(RefreshResponse {
            access_token: outcome.access_token,
            token_type: "Bearer".to_string(),
            expires_in: outcome.expires_in,
        }))
    }

    /// End the session and clear the refresh token cookie.
    ///
    /// Succeeds whether or not a valid cookie was presented.
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(&self, cookie_jar: &CookieJar) -> Result<Json<LogoutResponse>, AuthApiError> {
        let token = cookie_jar.get(REFRESH_COOKIE).map(|c| c.value_str().to_string());

        self.session_manager.logout(token.as_deref()).await;
        cookie_jar.remove(REFRESH_COOKIE);

        Ok(Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }))
    }

    /// Return the authenticated user's profile with fresh authorization state
    #[oai(path = "/me", method = "get", tag = "AuthTags::Authentication")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserProfile>, AuthApiError> {
        let claims = self.auth_gate.authenticate(&auth.0.token)?;

        let (user, roles, permissions) =
            self.session_manager.get_user_details(&claims.sub).await?;

        Ok(Json(UserProfile::from_parts(user, roles, permissions)))
    }
}
