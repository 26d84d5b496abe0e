//! Property-based tests for normalization and scoring invariants.
//!
//! # Invariants tested
//!
//! - **Scale bounds:** every normalized score lands in `[0, 10]` under
//!   every strategy, however extreme the counts and populations.
//! - **Critical-mass ceiling:** below the per-class gate, the hybrid
//!   strategy never exceeds 4.0.
//! - **Zero counts:** population-based strategies score an absent amenity
//!   as exactly 0.
//! - **Score bounds and scale-invariance:** the weighted match score stays
//!   in `[0, 10]` and is unchanged by scaling the whole weight vector.

use geo::Coord;
use proptest::prelude::*;
use enclave_core::{
    AmenityClass, AmenityCounts, Area, Dimension, NormalizeStrategy, StaticAttributes,
    WeightProfile, match_score, normalize_batch,
};

fn build_area(name: &str, population: u32, counts: AmenityCounts) -> Area {
    let statics = StaticAttributes::new(5, 5, 5, 5).expect("valid statics");
    let mut area = Area::new(
        name,
        Coord {
            x: -118.25,
            y: 34.05,
        },
        1500,
        Some(population),
        statics,
    )
    .expect("valid area");
    area.counts = counts;
    area
}

fn strategy_strategy() -> impl Strategy<Value = NormalizeStrategy> {
    prop_oneof![
        Just(NormalizeStrategy::MinMax),
        Just(NormalizeStrategy::PerCapita),
        Just(NormalizeStrategy::CriticalMass),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalized_scores_stay_on_scale(
        counts in proptest::collection::vec((0_u32..100_000, 0_u32..100_000, 0_u32..100_000), 1..8),
        population in 1_u32..5_000_000,
        strategy in strategy_strategy(),
    ) {
        let mut areas: Vec<Area> = counts
            .iter()
            .enumerate()
            .map(|(i, &(nightlife, parks, transit))| {
                build_area(&format!("area-{i}"), population, AmenityCounts::new(nightlife, parks, transit))
            })
            .collect();
        normalize_batch(&mut areas, strategy).expect("population is always present");
        for area in &areas {
            for class in AmenityClass::ALL {
                let score = area.scores.get(class);
                prop_assert!(score.is_finite());
                prop_assert!((0.0..=10.0).contains(&score), "score {score} out of scale");
            }
        }
    }

    #[test]
    fn below_critical_mass_is_capped(
        population in 1_u32..5_000_000,
        nightlife in 0_u32..10,
        parks in 0_u32..4,
        transit in 0_u32..15,
    ) {
        let mut areas = vec![build_area("gated", population, AmenityCounts::new(nightlife, parks, transit))];
        normalize_batch(&mut areas, NormalizeStrategy::CriticalMass).expect("population present");
        let gated = areas.first().expect("one area");
        for class in AmenityClass::ALL {
            prop_assert!(gated.scores.get(class) <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn zero_counts_score_zero_per_capita(population in 1_u32..5_000_000) {
        let mut areas = vec![build_area("empty", population, AmenityCounts::ZERO)];
        normalize_batch(&mut areas, NormalizeStrategy::PerCapita).expect("population present");
        let empty = areas.first().expect("one area");
        for class in AmenityClass::ALL {
            prop_assert_eq!(empty.scores.get(class), 0.0);
        }
    }

    #[test]
    fn match_score_stays_on_scale(
        weights in proptest::array::uniform7(0_u8..=10),
        nightlife in 0_u32..200,
        population in 1_u32..1_000_000,
    ) {
        let mut areas = vec![build_area("scored", population, AmenityCounts::new(nightlife, 0, 0))];
        normalize_batch(&mut areas, NormalizeStrategy::CriticalMass).expect("population present");
        let area = areas.first().expect("one area");
        let profile = WeightProfile::from_values(weights).expect("weights within scale");
        let score = match_score(area, &profile);
        prop_assert!(score.is_finite());
        prop_assert!((0.0..=10.0).contains(&score), "score {score} out of scale");
    }

    #[test]
    fn scaled_weight_vectors_score_identically(
        base in proptest::array::uniform7(0_u8..=5),
        factor in 1_u8..=2,
        nightlife in 0_u32..200,
    ) {
        let mut areas = vec![build_area("scored", 25_000, AmenityCounts::new(nightlife, 3, 9))];
        normalize_batch(&mut areas, NormalizeStrategy::CriticalMass).expect("population present");
        let area = areas.first().expect("one area");

        let profile = WeightProfile::from_values(base).expect("weights within scale");
        let mut scaled_values = base;
        for value in &mut scaled_values {
            *value *= factor;
        }
        let scaled = WeightProfile::from_values(scaled_values).expect("weights within scale");

        let difference = match_score(area, &profile) - match_score(area, &scaled);
        prop_assert!(difference.abs() < 1e-9);
    }
}

#[test]
fn zero_weight_profile_scores_zero_for_any_area() {
    let mut areas = vec![build_area("anywhere", 10_000, AmenityCounts::new(50, 20, 80))];
    normalize_batch(&mut areas, NormalizeStrategy::CriticalMass).expect("population present");
    let area = areas.first().expect("one area");
    assert_eq!(match_score(area, &WeightProfile::zero()), 0.0);
    // Every individual dimension still reads a positive value.
    assert!(Dimension::ALL.iter().any(|&d| area.attribute(d) > 0.0));
}
