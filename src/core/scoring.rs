use crate::core::rules::ScoringRules;
use crate::models::{Destination, UserPreferences};

/// Per-component contributions to a destination's personal score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub style: f64,
    pub budget: f64,
    pub interests: f64,
    pub matched_interests: Vec<String>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.style + self.budget + self.interests
    }
}

/// Calculate the personal score of a destination for the given preferences
///
/// score = style bonus + budget bonus + interest bonus * matched interests
///
/// No normalization is applied; with non-negative tables the result is >= 0.
pub fn calculate_personal_score(
    destination: &Destination,
    preferences: &UserPreferences,
    rules: &ScoringRules,
) -> f64 {
    score_breakdown(destination, preferences, rules).total()
}

pub fn score_breakdown(
    destination: &Destination,
    preferences: &UserPreferences,
    rules: &ScoringRules,
) -> ScoreBreakdown {
    let style = rules.style_bonus(&preferences.travel_style, destination.rating_or_zero());

    let budget = if offers_budget_tier(destination, preferences, rules) {
        rules.budget_bonus
    } else {
        0.0
    };

    let matched_interests = matched_interests(destination, preferences, rules);
    let interests = rules.interest_bonus * matched_interests.len() as f64;

    ScoreBreakdown {
        style,
        budget,
        interests,
        matched_interests,
    }
}

/// True when at least one accommodation carries the tag of the user's budget tier
#[inline]
fn offers_budget_tier(
    destination: &Destination,
    preferences: &UserPreferences,
    rules: &ScoringRules,
) -> bool {
    match rules.accommodation_type_for(&preferences.budget_range) {
        Some(tag) => destination.accommodations.iter().any(|acc| acc.kind == tag),
        None => false,
    }
}

/// Distinct user interests with a keyword present in the destination text
fn matched_interests(
    destination: &Destination,
    preferences: &UserPreferences,
    rules: &ScoringRules,
) -> Vec<String> {
    if preferences.interests.is_empty() {
        return Vec::new();
    }

    let text = searchable_text(destination);
    let mut matched: Vec<String> = Vec::new();

    for interest in &preferences.interests {
        if matched.contains(interest) {
            continue;
        }
        if let Some(entry) = rules.keywords_for(interest) {
            if entry.found_in(&text) {
                matched.push(interest.clone());
            }
        }
    }

    matched
}

/// Highlights, tips and description joined into one lowercase blob
pub fn searchable_text(destination: &Destination) -> String {
    destination
        .highlights
        .iter()
        .chain(destination.tips.iter())
        .map(String::as_str)
        .chain(std::iter::once(destination.description.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
