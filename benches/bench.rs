// Criterion benchmarks for Travel Guide scoring

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use travel_guide::core::{calculate_personal_score, suggest, Recommender, ScoringRules};
use travel_guide::models::{Accommodation, Destination, PlaceToVisit, Restaurant, UserPreferences};

const CATEGORIES: [&str; 4] = ["adventure", "cultural", "relaxation", "luxury"];
const TIERS: [&str; 3] = ["Budget", "Mid-range", "Luxury"];
const HIGHLIGHTS: [&str; 5] = [
    "Ancient temple ruins",
    "National park trekking",
    "Street food market",
    "Quiet beach coves",
    "Traditional culture shows",
];

fn create_destination(id: usize) -> Destination {
    Destination {
        id: id.to_string(),
        name: format!("Destination {}", id),
        location: "Cambodia".to_string(),
        category: Some(CATEGORIES[id % CATEGORIES.len()].to_string()),
        rating: Some(3.5 + (id % 16) as f64 * 0.1),
        description: Some("A stop on the way between the coast and the highlands".to_string()),
        highlights: vec![
            HIGHLIGHTS[id % HIGHLIGHTS.len()].to_string(),
            HIGHLIGHTS[(id + 2) % HIGHLIGHTS.len()].to_string(),
        ],
        tips: vec!["Carry cash for tuk-tuks".to_string()],
        places_to_visit: vec![PlaceToVisit {
            name: format!("Wat {}", id),
            description: "Hilltop pagoda".to_string(),
            kind: "temple".to_string(),
        }],
        accommodations: vec![Accommodation {
            name: format!("Guesthouse {}", id),
            kind: TIERS[id % TIERS.len()].to_string(),
            price: "$".to_string(),
        }],
        restaurants: vec![Restaurant {
            name: format!("Kitchen {}", id),
            cuisine: "Khmer".to_string(),
            price: "$".to_string(),
        }],
        ..Default::default()
    }
}

fn create_preferences() -> UserPreferences {
    UserPreferences::new("cultural", "mid-range", &["temples", "food", "nature"])
}

fn bench_personal_score(c: &mut Criterion) {
    let rules = ScoringRules::default();
    let preferences = create_preferences();
    let destination = create_destination(7);

    c.bench_function("personal_score", |b| {
        b.iter(|| calculate_personal_score(black_box(&destination), black_box(&preferences), black_box(&rules)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let recommender = Recommender::default();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("ranking");

    for count in [10, 50, 100, 500, 1000].iter() {
        let destinations: Vec<Destination> = (0..*count).map(create_destination).collect();

        group.bench_with_input(
            BenchmarkId::new("score_and_sort", count),
            count,
            |b, _| {
                b.iter(|| {
                    recommender.score_and_sort(
                        black_box(&preferences),
                        black_box(destinations.clone()),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_suggest(c: &mut Criterion) {
    let destinations: Vec<Destination> = (0..100).map(create_destination).collect();
    let interests = vec!["temple".to_string(), "khmer".to_string()];

    c.bench_function("suggest_100_destinations", |b| {
        b.iter(|| {
            suggest(
                black_box(Some("cultural")),
                black_box(&interests),
                black_box(destinations.clone()),
                black_box(20),
            )
        });
    });
}

criterion_group!(benches, bench_personal_score, bench_ranking, bench_suggest);

criterion_main!(benches);
