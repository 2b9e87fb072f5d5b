use crate::core::{Ranking, Recommender};
use crate::models::UserPreferences;
use crate::services::backend::BackendClient;

/// Look up a user's preferences, treating any failure as "none stored"
///
/// Denied reads, missing rows and transport errors all mean the user gets the
/// unpersonalized experience; the cause is only logged.
pub async fn preferences_or_none(backend: &BackendClient, user_id: &str) -> Option<UserPreferences> {
    match backend.get_preferences(user_id).await {
        Ok(Some(preferences)) => Some(preferences),
        Ok(None) => {
            tracing::debug!("No preferences stored for user {}", user_id);
            None
        }
        Err(e) => {
            tracing::warn!("Preference lookup failed for {}, serving unpersonalized list: {}", user_id, e);
            None
        }
    }
}

/// Personalized destination list for one user
///
/// An unreachable destination table yields an empty ranking rather than an error.
pub async fn personalized_destinations(
    backend: &BackendClient,
    recommender: &Recommender,
    user_id: &str,
) -> Ranking {
    let preferences = preferences_or_none(backend, user_id).await;

    let destinations = match backend.list_destinations().await {
        Ok(destinations) => destinations,
        Err(e) => {
            tracing::error!("Failed to fetch destinations for recommendations: {}", e);
            Vec::new()
        }
    };

    let ranking = recommender.rank(preferences.as_ref(), destinations);

    tracing::info!(
        "Ranked {} destinations for user {} (personalized: {})",
        ranking.len(),
        user_id,
        ranking.is_personalized()
    );

    ranking
}
