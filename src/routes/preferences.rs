use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::models::{PreferencesResponse, SavePreferencesRequest, UserPreferences};
use crate::routes::{ApiError, AppState, AuthenticatedUser};
use crate::services::preferences_or_none;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/preferences", web::get().to(get_preferences))
        .route("/preferences", web::put().to(save_preferences));
}

/// GET /api/preferences
///
/// `onboardingRequired` is true until the user has saved their answers once.
/// A lookup the backend refuses or fails reads as "nothing saved yet".
async fn get_preferences(state: web::Data<AppState>, user: AuthenticatedUser) -> HttpResponse {
    let preferences = preferences_or_none(&state.backend, &user.user_id).await;

    HttpResponse::Ok().json(PreferencesResponse {
        onboarding_required: preferences.is_none(),
        preferences,
    })
}

/// PUT /api/preferences
///
/// Replaces the stored answers wholesale.
async fn save_preferences(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<SavePreferencesRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let preferences = UserPreferences::from(req.into_inner());
    let saved = state
        .backend
        .save_preferences(&user.user_id, &preferences)
        .await
        .map_err(|e| {
            tracing::error!("Failed to save preferences for {}: {}", user.user_id, e);
            e
        })?;

    tracing::info!(
        "Saved preferences for user {} (style: {}, budget: {}, {} interests)",
        user.user_id,
        saved.travel_style,
        saved.budget_range,
        saved.interests.len()
    );

    Ok(HttpResponse::Ok().json(PreferencesResponse {
        preferences: Some(saved),
        onboarding_required: false,
    }))
}
