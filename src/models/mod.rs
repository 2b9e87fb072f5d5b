// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    Accommodation, AuthSession, AuthUser, Coordinates, Destination, DestinationSummary, ExchangeRate,
    PlaceToVisit, Post, PreferenceRecord, Restaurant, ScoredDestination, SuggestedDestination,
    Transportation, UserPreferences, WeatherReport,
};
pub use requests::{LoginRequest, NewDestinations, SavePreferencesRequest, SignupRequest, SuggestRequest};
pub use responses::{
    AuthResponse, DataResponse, ErrorResponse, HealthResponse, PreferencesResponse, RecommendationsResponse,
    SuggestionsResponse,
};
