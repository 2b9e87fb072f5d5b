use crate::models::{Destination, SuggestedDestination};

const CATEGORY_BONUS: f64 = 3.0;
const LIST_HIT_BONUS: f64 = 1.0;

/// Score destinations against an ad-hoc preference body, without any stored profile
///
/// score = 3 if the travel style names the destination category
///       + 1 per (interest, list) pair where highlights, places or restaurants mention the interest
///       + rating / 5
///
/// Returns at most `limit` destinations, highest score first.
pub fn suggest(
    travel_style: Option<&str>,
    interests: &[String],
    destinations: Vec<Destination>,
    limit: usize,
) -> Vec<SuggestedDestination> {
    let style = travel_style.map(str::to_lowercase).filter(|s| !s.is_empty());
    let interests: Vec<String> = interests
        .iter()
        .map(|i| i.to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    let mut suggested: Vec<SuggestedDestination> = destinations
        .into_iter()
        .map(|destination| {
            let score = suggestion_score(&destination, style.as_deref(), &interests);
            SuggestedDestination { destination, score }
        })
        .collect();

    suggested.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggested.truncate(limit);
    suggested
}

/// `style` and `interests` must already be lowercase
fn suggestion_score(destination: &Destination, style: Option<&str>, interests: &[String]) -> f64 {
    let mut score = 0.0;

    let category = destination
        .category
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    if let Some(style) = style {
        if !category.is_empty() && style == category {
            score += CATEGORY_BONUS;
        }
    }

    let highlights: Vec<String> = destination.highlights.iter().map(|h| h.to_lowercase()).collect();
    let places: Vec<String> = destination
        .places_to_visit
        .iter()
        .map(|p| format!("{} {}", p.name, p.kind).to_lowercase())
        .collect();
    let restaurants: Vec<String> = destination
        .restaurants
        .iter()
        .map(|r| format!("{} {}", r.cuisine, r.name).to_lowercase())
        .collect();

    for interest in interests {
        for list in [&highlights, &places, &restaurants] {
            if list.iter().any(|entry| entry.contains(interest.as_str())) {
                score += LIST_HIT_BONUS;
            }
        }
    }

    if let Some(rating) = destination.rating {
        score += rating / 5.0;
    }

    score
}
