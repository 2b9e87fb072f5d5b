//! Travel Guide - backend for a content-driven Cambodia travel guide
//!
//! This library provides the destination catalogue API, onboarding preferences,
//! and the scoring that orders destinations for a traveler's style, budget
//! and interests.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_personal_score, suggest, Ranking, Recommender, ScoringRules};
pub use crate::models::{Destination, ScoredDestination, UserPreferences};
