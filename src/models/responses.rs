use serde::{Deserialize, Serialize};
use crate::core::Ranking;
use crate::models::domain::{AuthUser, SuggestedDestination, UserPreferences};

/// Response for the personalized recommendations endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub personalized: bool,
    pub total: usize,
    pub destinations: Ranking,
}

impl From<Ranking> for RecommendationsResponse {
    fn from(ranking: Ranking) -> Self {
        Self {
            personalized: ranking.is_personalized(),
            total: ranking.len(),
            destinations: ranking,
        }
    }
}

/// Response for the anonymous recommendations endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub recommendations: Vec<SuggestedDestination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: Option<UserPreferences>,
    #[serde(rename = "onboardingRequired")]
    pub onboarding_required: bool,
}

/// Generic `{ "data": ... }` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: Option<AuthUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
