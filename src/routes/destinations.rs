use actix_web::{web, HttpResponse};
use crate::core::suggest;
use crate::models::{DataResponse, RecommendationsResponse, SuggestRequest, SuggestionsResponse};
use crate::routes::{ApiError, AppState, AuthenticatedUser};
use crate::services::personalized_destinations;

/// Configure destination and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/destinations", web::get().to(list_destinations))
        .route("/destinations/{id}", web::get().to(get_destination))
        .route("/recommendations", web::get().to(recommendations))
        .route("/recommendations", web::post().to(suggestions));
}

/// Listing cards, newest first
///
/// GET /api/destinations
async fn list_destinations(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let summaries = state.backend.list_destination_summaries().await.map_err(|e| {
        tracing::error!("Failed to fetch destination summaries: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(DataResponse { data: summaries }))
}

/// GET /api/destinations/{id}
async fn get_destination(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let destination = state.backend.get_destination(&id).await?;
    Ok(HttpResponse::Ok().json(DataResponse { data: destination }))
}

/// Destinations ranked for the signed-in user
///
/// GET /api/recommendations
///
/// Users without stored preferences get the catalogue in backend order with
/// `personalized: false`.
async fn recommendations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let ranking = personalized_destinations(&state.backend, &state.recommender, &user.user_id).await;
    Ok(HttpResponse::Ok().json(RecommendationsResponse::from(ranking)))
}

/// Ad-hoc suggestions from answers posted without an account
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "travel_style": "cultural",
///   "budget_range": "mid-range",
///   "interests": ["temples", "food"]
/// }
/// ```
async fn suggestions(
    state: web::Data<AppState>,
    req: web::Json<SuggestRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    let destinations = state.backend.list_destinations().await.map_err(|e| {
        tracing::error!("Failed to fetch destinations for suggestions: {}", e);
        e
    })?;

    let recommendations = suggest(
        req.travel_style.as_deref(),
        &req.interests,
        destinations,
        state.suggestion_limit,
    );

    tracing::info!(
        "Suggested {} destinations (style: {:?}, {} interests)",
        recommendations.len(),
        req.travel_style,
        req.interests.len()
    );

    Ok(HttpResponse::Ok().json(SuggestionsResponse { recommendations }))
}
