use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::{lenient, Destination, UserPreferences};

/// Onboarding answers; replaces any stored preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavePreferencesRequest {
    #[validate(length(min = 1, max = 64))]
    #[serde(alias = "travelStyle")]
    pub travel_style: String,
    #[validate(length(min = 1, max = 64))]
    #[serde(alias = "budgetRange")]
    pub budget_range: String,
    #[validate(length(max = 32))]
    #[serde(default)]
    pub interests: Vec<String>,
}

impl From<SavePreferencesRequest> for UserPreferences {
    fn from(req: SavePreferencesRequest) -> Self {
        Self {
            travel_style: req.travel_style,
            budget_range: req.budget_range,
            interests: req.interests,
        }
    }
}

/// Anonymous recommendation query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestRequest {
    #[serde(default, alias = "travelStyle")]
    pub travel_style: Option<String>,
    /// Accepted for parity with the onboarding form; not used in scoring
    #[serde(default, alias = "budgetRange")]
    pub budget_range: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Admin create body: a single destination or a batch
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NewDestinations {
    Many(Vec<Destination>),
    One(Box<Destination>),
}

impl NewDestinations {
    pub fn into_vec(self) -> Vec<Destination> {
        match self {
            NewDestinations::Many(items) => items,
            NewDestinations::One(item) => vec![*item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_preferences_validation() {
        let req = SavePreferencesRequest {
            travel_style: "".to_string(),
            budget_range: "budget".to_string(),
            interests: vec![],
        };
        assert!(req.validate().is_err());

        let req = SavePreferencesRequest {
            travel_style: "adventure".to_string(),
            budget_range: "budget".to_string(),
            interests: vec!["nature".to_string()],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_new_destinations_single_or_batch() {
        let one: NewDestinations = serde_json::from_str(r#"{"name": "Kampot", "location": "Kampot"}"#).unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: NewDestinations = serde_json::from_str(
            r#"[{"name": "Kampot", "location": "Kampot"}, {"name": "Kep", "location": "Kep"}]"#,
        )
        .unwrap();
        assert_eq!(many.into_vec().len(), 2);
    }

    #[test]
    fn test_suggest_request_tolerates_missing_interests() {
        let req: SuggestRequest = serde_json::from_str(r#"{"travel_style": "cultural"}"#).unwrap();
        assert!(req.interests.is_empty());
        assert_eq!(req.travel_style.as_deref(), Some("cultural"));
    }
}
