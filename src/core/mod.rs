// Core algorithm exports
pub mod ranker;
pub mod rules;
pub mod scoring;
pub mod suggest;

pub use ranker::{Ranking, Recommender};
pub use rules::{BudgetTier, InterestKeywords, RulesError, ScoringRules, StyleRule};
pub use scoring::{calculate_personal_score, score_breakdown, ScoreBreakdown};
pub use suggest::suggest;
