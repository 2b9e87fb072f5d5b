use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::lenient;

/// Travel preferences captured during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub travel_style: String,
    #[serde(default)]
    pub budget_range: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub interests: Vec<String>,
}

impl UserPreferences {
    pub fn new(travel_style: &str, budget_range: &str, interests: &[&str]) -> Self {
        Self {
            travel_style: travel_style.to_string(),
            budget_range: budget_range.to_string(),
            interests: interests.iter().map(|i| i.to_string()).collect(),
        }
    }
}

/// Stored preference row, keyed by user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub preferences: UserPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Destination record as stored in the `destinations` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Destination {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[validate(length(min = 1, message = "name is required"))]
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub best_time: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub places_to_visit: Vec<PlaceToVisit>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub accommodations: Vec<Accommodation>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub restaurants: Vec<Restaurant>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub transportation: Option<Transportation>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub gallery: Vec<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub health_and_safety: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Destination {
    /// Rating used by threshold checks; absent counts as zero
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceToVisit {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
}

/// Accommodation option; `kind` is the budget tier tag ("Budget", "Mid-range", "Luxury")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cuisine: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transportation {
    #[serde(rename = "gettingThere", default, deserialize_with = "lenient::string")]
    pub getting_there: String,
    #[serde(rename = "gettingAround", default, deserialize_with = "lenient::string")]
    pub getting_around: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub costs: String,
}

/// Listing projection used by browse and admin index pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationSummary {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: Option<f64>,
}

/// Destination annotated with the requesting user's affinity score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDestination {
    #[serde(flatten)]
    pub destination: Destination,
    #[serde(rename = "personalScore")]
    pub personal_score: f64,
}

/// Destination annotated by the anonymous suggestion scorer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedDestination {
    #[serde(flatten)]
    pub destination: Destination,
    pub score: f64,
}

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "readTime", alias = "read_time", default)]
    pub read_time: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub temp: i64,
    pub description: String,
    pub humidity: i64,
    #[serde(rename = "windSpeed")]
    pub wind_speed: i64,
    pub icon: String,
}

/// USD to local currency rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub rate: f64,
    pub date: String,
}

/// Authenticated account as reported by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token pair issued by the auth backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}
