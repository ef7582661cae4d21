//! Session middleware.
//!
//! Every request passes through here. The middleware reads the session
//! cookies, validates the access token against the identity service, and
//! transparently refreshes an expired session, rewriting the cookies on
//! the response so the browser carries the extended session.
//!
//! Access policy is fail-closed:
//! - no valid session on a protected path → 303 redirect to the login path
//! - identity service unreachable on a protected path → 503
//! - public paths always pass through, as anonymous if need be
//!
//! On success the `AuthenticatedUser` is attached to the request
//! extensions, where the `RequireAuth`/`OptionalAuth` extractors find it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, SessionTokens};
use crate::ports::SessionValidator;

use super::super::dto::ErrorResponse;

/// Path prefixes that require an authenticated session.
pub const PROTECTED_PATH_PREFIXES: [&str; 5] = [
    "/list-item",
    "/my-rentals",
    "/my-listings",
    "/requests",
    "/profile",
];

/// Refresh cookies outlive the access token by a month.
const REFRESH_COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;

/// Returns true if the path falls under a protected prefix.
///
/// Matching is segment-aware: `/requests/abc` is protected, `/requestsx`
/// is not.
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PATH_PREFIXES.iter().any(|prefix| {
        path == *prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Session cookie settings, shared by the middleware and the auth
/// endpoints that set and clear cookies.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    pub access_name: String,
    pub refresh_name: String,
    pub secure: bool,
}

impl SessionCookies {
    /// Builds cookie settings from the auth configuration.
    pub fn from_config(config: &AuthConfig, secure: bool) -> Self {
        Self {
            access_name: config.access_cookie.clone(),
            refresh_name: config.refresh_cookie.clone(),
            secure,
        }
    }

    fn attributes(&self) -> String {
        if self.secure {
            "; Path=/; HttpOnly; SameSite=Lax; Secure".to_string()
        } else {
            "; Path=/; HttpOnly; SameSite=Lax".to_string()
        }
    }

    /// `Set-Cookie` values carrying a token pair.
    pub fn set_values(&self, tokens: &SessionTokens) -> Vec<String> {
        let access_max_age = tokens
            .expires_in
            .map(|secs| format!("; Max-Age={}", secs))
            .unwrap_or_default();
        vec![
            format!(
                "{}={}{}{}",
                self.access_name,
                tokens.access_token,
                self.attributes(),
                access_max_age
            ),
            format!(
                "{}={}{}; Max-Age={}",
                self.refresh_name,
                tokens.refresh_token,
                self.attributes(),
                REFRESH_COOKIE_MAX_AGE_SECS
            ),
        ]
    }

    /// `Set-Cookie` values that expire both session cookies.
    pub fn clear_values(&self) -> Vec<String> {
        vec![
            format!("{}={}; Max-Age=0", self.access_name, self.attributes()),
            format!("{}={}; Max-Age=0", self.refresh_name, self.attributes()),
        ]
    }

    /// Appends `Set-Cookie` headers to a response.
    pub fn apply(&self, response: &mut Response, values: &[String]) {
        for value in values {
            if let Ok(header_value) = HeaderValue::from_str(value) {
                response.headers_mut().append(header::SET_COOKIE, header_value);
            }
        }
    }
}

/// State for the session middleware, built once at startup.
#[derive(Clone)]
pub struct SessionContext {
    pub validator: Arc<dyn SessionValidator>,
    pub login_path: String,
    pub cookies: SessionCookies,
}

impl SessionContext {
    /// Builds the middleware state from configuration and the validator.
    pub fn new(config: &AuthConfig, validator: Arc<dyn SessionValidator>, secure: bool) -> Self {
        Self {
            validator,
            login_path: config.login_path.clone(),
            cookies: SessionCookies::from_config(config, secure),
        }
    }
}

/// A resolved session: the user, plus fresh tokens if a refresh happened.
type ResolvedSession = Option<(AuthenticatedUser, Option<SessionTokens>)>;

/// The middleware itself.
pub async fn session_middleware(
    State(ctx): State<SessionContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let (access, refresh) = session_cookies_from_request(&ctx, &request);

    match resolve_session(&ctx, access.as_deref(), refresh.as_deref()).await {
        Ok(Some((user, refreshed))) => {
            request.extensions_mut().insert(user);
            let mut response = next.run(request).await;
            if let Some(tokens) = refreshed {
                ctx.cookies.apply(&mut response, &ctx.cookies.set_values(&tokens));
            }
            response
        }
        Ok(None) => {
            if is_protected_path(&path) {
                Redirect::to(&ctx.login_path).into_response()
            } else {
                next.run(request).await
            }
        }
        Err(e) => {
            // The identity service could not answer. Protected paths fail
            // closed; public paths proceed anonymously.
            tracing::error!("Session validation failed: {}", e);
            if is_protected_path(&path) {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse::unavailable(
                        "Authentication service unavailable",
                    )),
                )
                    .into_response()
            } else {
                next.run(request).await
            }
        }
    }
}

/// Pulls the access and refresh tokens out of the Cookie header.
fn session_cookies_from_request(
    ctx: &SessionContext,
    request: &Request,
) -> (Option<String>, Option<String>) {
    let headers = request.headers();
    (
        cookie_value(headers, &ctx.cookies.access_name),
        cookie_value(headers, &ctx.cookies.refresh_name),
    )
}

/// Reads one cookie's value from a header map.
pub fn cookie_value(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(raw) = header_value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let Some((pair_name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            if pair_name == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Resolves the session from the token cookies.
///
/// `Ok(None)` means "no usable session" (fail closed via redirect on
/// protected paths); `Err` means the identity service could not answer.
async fn resolve_session(
    ctx: &SessionContext,
    access: Option<&str>,
    refresh: Option<&str>,
) -> Result<ResolvedSession, AuthError> {
    let Some(access) = access else {
        // No access token. A refresh token alone can still revive the
        // session, e.g. after the short-lived cookie expired.
        return match refresh {
            Some(refresh) => refresh_session(ctx, refresh).await,
            None => Ok(None),
        };
    };

    match ctx.validator.validate(access).await {
        Ok(user) => Ok(Some((user, None))),
        Err(AuthError::TokenExpired) => match refresh {
            Some(refresh) => refresh_session(ctx, refresh).await,
            None => Ok(None),
        },
        Err(e) if e.is_unauthenticated() => Ok(None),
        Err(e) => Err(e),
    }
}

async fn refresh_session(
    ctx: &SessionContext,
    refresh: &str,
) -> Result<ResolvedSession, AuthError> {
    let tokens = match ctx.validator.refresh(refresh).await {
        Ok(tokens) => tokens,
        Err(e) if e.is_unauthenticated() => return Ok(None),
        Err(e) => return Err(e),
    };

    match ctx.validator.validate(&tokens.access_token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Session refreshed");
            Ok(Some((user, Some(tokens))))
        }
        Err(e) if e.is_unauthenticated() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use secrecy::Secret;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            identity_url: "https://identity.example.com".to_string(),
            publishable_key: Secret::new("pk_test_xxx".to_string()),
            login_path: "/auth/login".to_string(),
            access_cookie: "burrow-access-token".to_string(),
            refresh_cookie: "burrow-refresh-token".to_string(),
            http_timeout_secs: 10,
        }
    }

    fn context(validator: MockSessionValidator) -> SessionContext {
        SessionContext::new(&auth_config(), Arc::new(validator), false)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Protected path matching
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn protected_prefixes_match_exact_and_subpaths() {
        assert!(is_protected_path("/my-listings"));
        assert!(is_protected_path("/requests/123"));
        assert!(is_protected_path("/list-item"));
        assert!(is_protected_path("/profile"));
        assert!(is_protected_path("/my-rentals/abc/def"));
    }

    #[test]
    fn public_paths_are_not_protected() {
        assert!(!is_protected_path("/"));
        assert!(!is_protected_path("/items/123"));
        assert!(!is_protected_path("/auth/login"));
        assert!(!is_protected_path("/health"));
    }

    #[test]
    fn prefix_matching_is_segment_aware() {
        assert!(!is_protected_path("/requestsx"));
        assert!(!is_protected_path("/profiles"));
        assert!(!is_protected_path("/my-listings-archive"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Session resolution
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_access_token_resolves_user() {
        let ctx = context(MockSessionValidator::new().with_test_user("good", "user-1"));

        let resolved = resolve_session(&ctx, Some("good"), None).await.unwrap();
        let (user, refreshed) = resolved.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert!(refreshed.is_none());
    }

    #[tokio::test]
    async fn no_cookies_resolves_anonymous() {
        let ctx = context(MockSessionValidator::new());
        let resolved = resolve_session(&ctx, None, None).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn invalid_token_resolves_anonymous() {
        let ctx = context(MockSessionValidator::new());
        let resolved = resolve_session(&ctx, Some("bogus"), None).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn expired_token_with_refresh_yields_new_tokens() {
        let validator = MockSessionValidator::new()
            .with_expired_token("stale")
            .with_test_user("fresh", "user-1")
            .with_refresh(
                "refresh-1",
                SessionTokens {
                    access_token: "fresh".to_string(),
                    refresh_token: "refresh-2".to_string(),
                    expires_in: Some(3600),
                },
            );
        let ctx = context(validator);

        let resolved = resolve_session(&ctx, Some("stale"), Some("refresh-1"))
            .await
            .unwrap();
        let (user, refreshed) = resolved.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        let tokens = refreshed.unwrap();
        assert_eq!(tokens.access_token, "fresh");
        assert_eq!(tokens.refresh_token, "refresh-2");
    }

    #[tokio::test]
    async fn expired_token_without_refresh_resolves_anonymous() {
        let ctx = context(MockSessionValidator::new().with_expired_token("stale"));
        let resolved = resolve_session(&ctx, Some("stale"), None).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn dead_refresh_token_resolves_anonymous() {
        let ctx = context(MockSessionValidator::new().with_expired_token("stale"));
        let resolved = resolve_session(&ctx, Some("stale"), Some("revoked"))
            .await
            .unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn service_outage_is_an_error_not_anonymous() {
        let ctx = context(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("down")),
        );
        let result = resolve_session(&ctx, Some("anything"), None).await;
        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Cookie formatting
    // ════════════════════════════════════════════════════════════════════════════

    fn cookies(secure: bool) -> SessionCookies {
        SessionCookies {
            access_name: "burrow-access-token".to_string(),
            refresh_name: "burrow-refresh-token".to_string(),
            secure,
        }
    }

    #[test]
    fn set_values_carry_tokens_and_attributes() {
        let values = cookies(false).set_values(&SessionTokens {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_in: Some(3600),
        });

        assert_eq!(values.len(), 2);
        assert!(values[0].starts_with("burrow-access-token=at;"));
        assert!(values[0].contains("HttpOnly"));
        assert!(values[0].contains("SameSite=Lax"));
        assert!(values[0].contains("Max-Age=3600"));
        assert!(values[1].starts_with("burrow-refresh-token=rt;"));
    }

    #[test]
    fn secure_flag_appears_only_when_enabled() {
        let tokens = SessionTokens {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_in: None,
        };
        assert!(!cookies(false).set_values(&tokens)[0].contains("Secure"));
        assert!(cookies(true).set_values(&tokens)[0].contains("Secure"));
    }

    #[test]
    fn clear_values_expire_both_cookies() {
        let values = cookies(false).clear_values();
        assert!(values.iter().all(|v| v.contains("Max-Age=0")));
        assert_eq!(values.len(), 2);
    }
}
