use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a scoring table is rejected at startup
#[derive(Debug, Error, PartialEq)]
pub enum RulesError {
    #[error("bonus for {0} must be a non-negative finite number, got {1}")]
    InvalidBonus(String, f64),

    #[error("minimum rating for style {0} must be finite, got {1}")]
    InvalidThreshold(String, f64),

    #[error("interest {0} has no keywords")]
    NoKeywords(String),

    #[error("interest {0} has an empty keyword")]
    EmptyKeyword(String),
}

/// Style bonus, granted when the user's travel style equals `style` and the
/// destination rating reaches `min_rating` (no threshold when unset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub style: String,
    #[serde(default)]
    pub min_rating: Option<f64>,
    pub bonus: f64,
}

impl StyleRule {
    fn new(style: &str, min_rating: Option<f64>, bonus: f64) -> Self {
        Self {
            style: style.to_string(),
            min_rating,
            bonus,
        }
    }

    #[inline]
    pub fn applies(&self, travel_style: &str, rating: f64) -> bool {
        self.style == travel_style && self.min_rating.map_or(true, |min| rating >= min)
    }
}

/// Maps a declared budget range to the accommodation tag it matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTier {
    pub budget_range: String,
    pub accommodation_type: String,
}

/// Substrings that count as evidence for an interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestKeywords {
    pub interest: String,
    pub keywords: Vec<String>,
}

impl InterestKeywords {
    fn new(interest: &str, keywords: &[&str]) -> Self {
        Self {
            interest: interest.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// `text` must already be lowercase
    #[inline]
    pub fn found_in(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| text.contains(keyword.to_lowercase().as_str()))
    }
}

/// Lookup tables driving the personal score
///
/// Defaults reproduce the product's tuned values:
///
/// | component | rule                                   | bonus |
/// |-----------|----------------------------------------|-------|
/// | style     | adventure, rating >= 4.5               | 30    |
/// | style     | luxury, rating >= 4.8                  | 30    |
/// | style     | cultural                               | 25    |
/// | style     | relaxation                             | 20    |
/// | budget    | any accommodation of the matching tier | 30    |
/// | interest  | per matched interest                   | 10    |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default = "default_styles")]
    pub styles: Vec<StyleRule>,
    #[serde(default = "default_budget_bonus")]
    pub budget_bonus: f64,
    #[serde(default = "default_budget_tiers")]
    pub budget_tiers: Vec<BudgetTier>,
    #[serde(default = "default_interest_bonus")]
    pub interest_bonus: f64,
    #[serde(default = "default_interests")]
    pub interests: Vec<InterestKeywords>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            styles: default_styles(),
            budget_bonus: default_budget_bonus(),
            budget_tiers: default_budget_tiers(),
            interest_bonus: default_interest_bonus(),
            interests: default_interests(),
        }
    }
}

fn default_styles() -> Vec<StyleRule> {
    vec![
        StyleRule::new("adventure", Some(4.5), 30.0),
        StyleRule::new("luxury", Some(4.8), 30.0),
        StyleRule::new("cultural", None, 25.0),
        StyleRule::new("relaxation", None, 20.0),
    ]
}

fn default_budget_bonus() -> f64 { 30.0 }

fn default_budget_tiers() -> Vec<BudgetTier> {
    [("budget", "Budget"), ("mid-range", "Mid-range"), ("luxury", "Luxury")]
        .iter()
        .map(|(range, tag)| BudgetTier {
            budget_range: range.to_string(),
            accommodation_type: tag.to_string(),
        })
        .collect()
}

fn default_interest_bonus() -> f64 { 10.0 }

fn default_interests() -> Vec<InterestKeywords> {
    vec![
        InterestKeywords::new("temples", &["temple"]),
        InterestKeywords::new("nature", &["nature", "park"]),
        InterestKeywords::new("food", &["food"]),
        InterestKeywords::new("beaches", &["beach"]),
        InterestKeywords::new("culture", &["culture"]),
    ]
}

impl ScoringRules {
    /// Reject tables that could produce a negative or non-finite score
    pub fn validate(&self) -> Result<(), RulesError> {
        for rule in &self.styles {
            check_bonus(&format!("style {}", rule.style), rule.bonus)?;
            if let Some(min) = rule.min_rating {
                if !min.is_finite() {
                    return Err(RulesError::InvalidThreshold(rule.style.clone(), min));
                }
            }
        }
        check_bonus("budget", self.budget_bonus)?;
        check_bonus("interests", self.interest_bonus)?;

        for entry in &self.interests {
            if entry.keywords.is_empty() {
                return Err(RulesError::NoKeywords(entry.interest.clone()));
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(RulesError::EmptyKeyword(entry.interest.clone()));
            }
        }
        Ok(())
    }

    /// Bonus of the first style rule that applies, or zero
    pub fn style_bonus(&self, travel_style: &str, rating: f64) -> f64 {
        self.styles
            .iter()
            .find(|rule| rule.applies(travel_style, rating))
            .map_or(0.0, |rule| rule.bonus)
    }

    /// Accommodation tag matching a declared budget range
    pub fn accommodation_type_for(&self, budget_range: &str) -> Option<&str> {
        self.budget_tiers
            .iter()
            .find(|tier| tier.budget_range == budget_range)
            .map(|tier| tier.accommodation_type.as_str())
    }

    pub fn keywords_for(&self, interest: &str) -> Option<&InterestKeywords> {
        self.interests.iter().find(|entry| entry.interest == interest)
    }
}

fn check_bonus(name: &str, bonus: f64) -> Result<(), RulesError> {
    if bonus.is_finite() && bonus >= 0.0 {
        Ok(())
    } else {
        Err(RulesError::InvalidBonus(name.to_string(), bonus))
    }
}
