// Unit tests for destination scoring

use travel_guide::core::{calculate_personal_score, score_breakdown, Ranking, Recommender, ScoringRules};
use travel_guide::models::{Accommodation, Destination, UserPreferences};

fn create_destination(id: &str, rating: f64) -> Destination {
    Destination {
        id: id.to_string(),
        name: format!("Destination {}", id),
        location: "Cambodia".to_string(),
        rating: Some(rating),
        ..Default::default()
    }
}

fn accommodation(kind: &str) -> Accommodation {
    Accommodation {
        name: format!("{} stay", kind),
        kind: kind.to_string(),
        price: "$".to_string(),
    }
}

fn mixed_catalogue() -> Vec<Destination> {
    let mut angkor = create_destination("angkor", 4.9);
    angkor.category = Some("cultural".to_string());
    angkor.highlights = vec!["Sunrise over the temple".to_string()];
    angkor.accommodations = vec![accommodation("Luxury"), accommodation("Budget")];

    let mut koh_rong = create_destination("koh-rong", 4.6);
    koh_rong.highlights = vec!["White sand beach".to_string()];
    koh_rong.tips = vec!["Try the seafood".to_string()];
    koh_rong.accommodations = vec![accommodation("Mid-range")];

    let mut kampot = create_destination("kampot", 4.2);
    kampot.description = Some("Pepper farms and Bokor national park".to_string());

    let mut kratie = create_destination("kratie", 4.0);
    kratie.description = Some("River dolphins".to_string());

    let mut phnom_penh = create_destination("phnom-penh", 4.5);
    phnom_penh.tips = vec!["Street food near the market".to_string(), "Culture at the museum".to_string()];

    vec![angkor, koh_rong, kampot, kratie, phnom_penh]
}

#[test]
fn test_ranking_is_permutation_of_input() {
    let recommender = Recommender::default();
    let prefs = UserPreferences::new("adventure", "mid-range", &["beaches", "food"]);
    let catalogue = mixed_catalogue();
    let mut input_ids: Vec<String> = catalogue.iter().map(|d| d.id.clone()).collect();

    let ranking = recommender.rank(Some(&prefs), catalogue);

    let mut output_ids: Vec<String> = ranking.ids().into_iter().map(String::from).collect();
    assert_eq!(output_ids.len(), input_ids.len());
    input_ids.sort();
    output_ids.sort();
    assert_eq!(input_ids, output_ids);
}

#[test]
fn test_absent_preferences_is_identity() {
    let recommender = Recommender::default();
    let catalogue = mixed_catalogue();
    let expected = catalogue.clone();

    let ranking = recommender.rank(None, catalogue);

    assert!(!ranking.is_personalized());
    assert_eq!(ranking, Ranking::Unpersonalized(expected));
}

#[test]
fn test_ranking_sorted_descending() {
    let recommender = Recommender::default();
    let prefs = UserPreferences::new("cultural", "luxury", &["temples", "culture", "food"]);

    let scored = recommender.score_and_sort(&prefs, mixed_catalogue());

    for pair in scored.windows(2) {
        assert!(pair[0].personal_score >= pair[1].personal_score);
    }
    assert_eq!(scored[0].destination.id, "angkor");
}

#[test]
fn test_equal_scores_keep_input_order() {
    let recommender = Recommender::default();
    let prefs = UserPreferences::new("relaxation", "budget", &[]);
    let catalogue: Vec<Destination> = ["d", "a", "c", "b"]
        .iter()
        .map(|id| create_destination(id, 4.0))
        .collect();

    let scored = recommender.score_and_sort(&prefs, catalogue);

    let ids: Vec<&str> = scored.iter().map(|s| s.destination.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "a", "c", "b"]);
    assert!(scored.iter().all(|s| s.personal_score == 20.0));
}

#[test]
fn test_adding_matching_keyword_never_lowers_score() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("adventure", "budget", &["nature", "beaches"]);
    let mut destination = create_destination("kep", 4.7);
    destination.description = Some("Crab market".to_string());

    let before = calculate_personal_score(&destination, &prefs, &rules);
    destination.highlights.push("Quiet beach at sunset".to_string());
    let after = calculate_personal_score(&destination, &prefs, &rules);

    assert!(after >= before);
    assert_eq!(after - before, 10.0);
}

#[test]
fn test_adventure_rating_threshold() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("adventure", "budget", &[]);

    let high = calculate_personal_score(&create_destination("high", 4.9), &prefs, &rules);
    let low = calculate_personal_score(&create_destination("low", 4.0), &prefs, &rules);

    assert!(high >= low);
    assert_eq!(high, 30.0);
    assert_eq!(low, 0.0);
}

#[test]
fn test_budget_bonus_applied_once() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("none", "budget", &[]);
    let mut destination = create_destination("siem-reap", 4.0);
    destination.accommodations = vec![
        accommodation("Budget"),
        accommodation("Budget"),
        accommodation("Budget"),
    ];

    let breakdown = score_breakdown(&destination, &prefs, &rules);

    assert_eq!(breakdown.budget, 30.0);
    assert_eq!(breakdown.total(), 30.0);
}

#[test]
fn test_cultural_luxury_temples_example() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("cultural", "luxury", &["temples"]);
    let mut destination = create_destination("angkor", 4.9);
    destination.description = Some("Largest temple complex in the world".to_string());
    destination.accommodations = vec![accommodation("Luxury")];

    let breakdown = score_breakdown(&destination, &prefs, &rules);

    assert_eq!(breakdown.style, 25.0);
    assert_eq!(breakdown.budget, 30.0);
    assert_eq!(breakdown.interests, 10.0);
    assert_eq!(calculate_personal_score(&destination, &prefs, &rules), 65.0);
}

#[test]
fn test_empty_interests_contribute_nothing() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("cultural", "budget", &[]);
    let mut destination = create_destination("wat", 4.0);
    destination.highlights = vec!["temple".to_string(), "food".to_string(), "beach".to_string()];

    let breakdown = score_breakdown(&destination, &prefs, &rules);

    assert_eq!(breakdown.interests, 0.0);
    assert!(breakdown.matched_interests.is_empty());
}

#[test]
fn test_no_accommodations_no_budget_bonus() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("luxury", "luxury", &[]);
    let destination = create_destination("remote", 5.0);

    let breakdown = score_breakdown(&destination, &prefs, &rules);

    assert_eq!(breakdown.budget, 0.0);
    assert_eq!(breakdown.style, 30.0);
}

#[test]
fn test_unknown_style_and_interest_score_zero() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("backpacking", "shoestring", &["nightlife"]);
    let mut destination = create_destination("sihanoukville", 4.9);
    destination.accommodations = vec![accommodation("Budget")];
    destination.highlights = vec!["nightlife".to_string()];

    assert_eq!(calculate_personal_score(&destination, &prefs, &rules), 0.0);
}

#[test]
fn test_missing_rating_treated_as_zero() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("adventure", "budget", &[]);
    let mut destination = create_destination("unrated", 0.0);
    destination.rating = None;

    assert_eq!(calculate_personal_score(&destination, &prefs, &rules), 0.0);
}

#[test]
fn test_null_price_keeps_budget_bonus() {
    let rules = ScoringRules::default();
    let prefs = UserPreferences::new("none", "budget", &[]);
    let destination: Destination = serde_json::from_str(
        r#"{
            "id": "battambang",
            "name": "Battambang",
            "location": "Battambang",
            "accommodations": [
                {"name": "Bamboo Inn", "type": "Budget", "price": "$10"},
                {"name": "Old Market Rooms", "type": "Budget", "price": null}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(destination.accommodations.len(), 2);
    assert_eq!(score_breakdown(&destination, &prefs, &rules).budget, 30.0);
}
