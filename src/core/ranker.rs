use serde::Serialize;
use crate::core::{rules::ScoringRules, scoring::calculate_personal_score};
use crate::models::{Destination, ScoredDestination, UserPreferences};

/// Outcome of ranking destinations for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Ranking {
    /// Scored and sorted by descending personal score
    Personalized(Vec<ScoredDestination>),
    /// No preferences available; input order untouched
    Unpersonalized(Vec<Destination>),
}

impl Ranking {
    pub fn is_personalized(&self) -> bool {
        matches!(self, Ranking::Personalized(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Ranking::Personalized(scored) => scored.len(),
            Ranking::Unpersonalized(destinations) => destinations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destination ids in ranked order
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Ranking::Personalized(scored) => scored.iter().map(|s| s.destination.id.as_str()).collect(),
            Ranking::Unpersonalized(destinations) => destinations.iter().map(|d| d.id.as_str()).collect(),
        }
    }
}

/// Ranks destinations against a user's travel preferences
///
/// Holds only the immutable scoring tables, so one instance is shared by every
/// request.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    rules: ScoringRules,
}

impl Recommender {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Rank destinations for a user
    ///
    /// Without preferences the destinations are returned as given.
    pub fn rank(
        &self,
        preferences: Option<&UserPreferences>,
        destinations: Vec<Destination>,
    ) -> Ranking {
        match preferences {
            Some(preferences) => Ranking::Personalized(self.score_and_sort(preferences, destinations)),
            None => Ranking::Unpersonalized(destinations),
        }
    }

    /// Score every destination and sort by descending score
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn score_and_sort(
        &self,
        preferences: &UserPreferences,
        destinations: Vec<Destination>,
    ) -> Vec<ScoredDestination> {
        let mut scored: Vec<ScoredDestination> = destinations
            .into_iter()
            .map(|destination| {
                let personal_score = calculate_personal_score(&destination, preferences, &self.rules);
                ScoredDestination {
                    destination,
                    personal_score,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.personal_score
                .partial_cmp(&a.personal_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }
}
