use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use subtle::ConstantTimeEq;
use crate::routes::{ApiError, AppState};
use crate::services::AuthError;

/// Cookie holding the access token set at sign-in
pub const ACCESS_TOKEN_COOKIE: &str = "supabase_token";
/// Cookie holding the refresh token set at sign-in
pub const REFRESH_TOKEN_COOKIE: &str = "supabase_refresh_token";

const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Signed-in user, resolved from a verified access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: Option<String>,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;

    let token = access_token(req).ok_or(AuthError::MissingToken)?;
    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::debug!("Rejected access token on {}: {}", req.path(), e);
        e
    })?;

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Access token from `Authorization: Bearer` or the session cookie
pub fn access_token(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    from_header.or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Admin writes require the shared secret header when a secret is configured
pub fn require_admin(req: &HttpRequest, state: &AppState) -> Result<(), ApiError> {
    let Some(expected) = state.admin_secret.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    let provided = req
        .headers()
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    if secret_matches(provided, expected) {
        Ok(())
    } else {
        tracing::warn!("Rejected admin request on {} {}", req.method(), req.path());
        Err(ApiError::Unauthorized("Unauthorized".to_string()))
    }
}

/// Constant time in the secret's contents; only the length can leak.
fn secret_matches(provided: Option<&str>, expected: &str) -> bool {
    provided.map_or(false, |p| bool::from(p.as_bytes().ct_eq(expected.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test::TestRequest};

    #[test]
    fn test_access_token_prefers_header() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer header-token"))
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "cookie-token"))
            .to_http_request();

        assert_eq!(access_token(&req).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_access_token_from_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "cookie-token"))
            .to_http_request();

        assert_eq!(access_token(&req).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_missing_access_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();

        assert_eq!(access_token(&req), None);
    }

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches(Some("s3cret"), "s3cret"));
        assert!(!secret_matches(Some("s3creT"), "s3cret"));
        assert!(!secret_matches(Some("s3cret-longer"), "s3cret"));
        assert!(!secret_matches(Some(""), "s3cret"));
        assert!(!secret_matches(None, "s3cret"));
    }
}
