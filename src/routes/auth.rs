use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    web, HttpRequest, HttpResponse, HttpResponseBuilder,
};
use validator::Validate;
use crate::models::{AuthResponse, AuthSession, LoginRequest, SignupRequest};
use crate::routes::extract::access_token;
use crate::routes::{ApiError, AppState, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

const ACCESS_TOKEN_MAX_AGE_DAYS: i64 = 7;
const REFRESH_TOKEN_MAX_AGE_DAYS: i64 = 30;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/auth/signup", web::post().to(signup))
        .route("/auth/login", web::post().to(login))
        .route("/auth/logout", web::post().to(logout));
}

fn session_cookie(name: &'static str, value: String, max_age_days: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(max_age_days))
        .finish()
}

fn set_session_cookies(builder: &mut HttpResponseBuilder, session: &AuthSession, secure: bool) {
    builder.cookie(session_cookie(
        ACCESS_TOKEN_COOKIE,
        session.access_token.clone(),
        ACCESS_TOKEN_MAX_AGE_DAYS,
        secure,
    ));

    if let Some(refresh_token) = &session.refresh_token {
        builder.cookie(session_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token.clone(),
            REFRESH_TOKEN_MAX_AGE_DAYS,
            secure,
        ));
    }
}

/// Register an account
///
/// POST /api/auth/signup
///
/// When the project requires email confirmation no session comes back, and
/// the response carries a message instead of cookies.
async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let result = state
        .backend
        .sign_up(&req.email, &req.password, &req.name)
        .await?;

    let mut builder = HttpResponse::Ok();
    let message = match &result.session {
        Some(session) => {
            set_session_cookies(&mut builder, session, state.secure_cookies);
            None
        }
        None => Some("Check your email to confirm your account".to_string()),
    };

    tracing::info!(
        "Registered account {} (session issued: {})",
        req.email,
        result.session.is_some()
    );

    Ok(builder.json(AuthResponse {
        success: true,
        user: result.user,
        message,
    }))
}

/// POST /api/auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let session = state.backend.sign_in(&req.email, &req.password).await.map_err(|e| {
        tracing::info!("Sign-in failed for {}: {}", req.email, e);
        e
    })?;

    let mut builder = HttpResponse::Ok();
    set_session_cookies(&mut builder, &session, state.secure_cookies);

    Ok(builder.json(AuthResponse {
        success: true,
        user: session.user,
        message: None,
    }))
}

/// POST /api/auth/logout
///
/// Cookies are cleared even when the backend refuses the sign-out.
async fn logout(state: web::Data<AppState>, http_req: HttpRequest) -> HttpResponse {
    if let Some(token) = access_token(&http_req) {
        if let Err(e) = state.backend.sign_out(&token).await {
            tracing::warn!("Backend sign-out failed, clearing cookies anyway: {}", e);
        }
    }

    let mut access = Cookie::build(ACCESS_TOKEN_COOKIE, "").path("/").finish();
    access.make_removal();
    let mut refresh = Cookie::build(REFRESH_TOKEN_COOKIE, "").path("/").finish();
    refresh.make_removal();

    HttpResponse::Ok().cookie(access).cookie(refresh).json(AuthResponse {
        success: true,
        user: None,
        message: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(ACCESS_TOKEN_COOKIE, "token".to_string(), ACCESS_TOKEN_MAX_AGE_DAYS, true);

        assert_eq!(cookie.name(), "supabase_token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
    }

    #[test]
    fn test_refresh_cookie_only_with_refresh_token() {
        let session = AuthSession {
            access_token: "access".to_string(),
            refresh_token: None,
            expires_in: Some(3600),
            user: None,
        };

        let mut builder = HttpResponse::Ok();
        set_session_cookies(&mut builder, &session, false);
        let response = builder.finish();

        let names: Vec<String> = response.cookies().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["supabase_token".to_string()]);
    }
}
