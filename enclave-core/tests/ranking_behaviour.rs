//! Behavioural tests for the normalize-then-rank flow.

use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use enclave_core::{
    Area, Dimension, NormalizeStrategy, StaticAttributes, WeightProfile, normalize_batch, rank,
};

const TOLERANCE: f64 = 1e-9;

fn area(name: &str, population: u32, nightlife: u32) -> Area {
    let statics = StaticAttributes::new(0, 0, 0, 0).expect("valid statics");
    let mut built = Area::new(
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
    built.counts.nightlife = nightlife;
    built
}

#[fixture]
fn areas() -> RefCell<Vec<Area>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn ranking() -> RefCell<Vec<(String, f64)>> {
    RefCell::new(Vec::new())
}

#[given("two areas where only the first has a critical mass of nightlife venues")]
fn given_two_areas(#[from(areas)] areas: &RefCell<Vec<Area>>) {
    *areas.borrow_mut() = vec![area("dense", 10_000, 20), area("sparse", 1_000, 2)];
}

fn normalize_and_rank(areas: &RefCell<Vec<Area>>, ranking: &RefCell<Vec<(String, f64)>>, profile: &WeightProfile) {
    let mut batch = areas.borrow_mut();
    normalize_batch(&mut batch, NormalizeStrategy::CriticalMass).expect("normalize");
    let ranked = rank(&batch, profile);
    *ranking.borrow_mut() = ranked
        .iter()
        .map(|entry| (entry.area.name.clone(), entry.match_score))
        .collect();
}

#[when("I normalize with the hybrid strategy and rank with a nightlife-only profile")]
fn when_rank_nightlife(
    #[from(areas)] areas: &RefCell<Vec<Area>>,
    #[from(ranking)] ranking: &RefCell<Vec<(String, f64)>>,
) {
    let profile = WeightProfile::zero().with_weight(Dimension::Nightlife, 10);
    normalize_and_rank(areas, ranking, &profile);
}

#[when("I normalize with the hybrid strategy and rank with an all-zero profile")]
fn when_rank_zero(
    #[from(areas)] areas: &RefCell<Vec<Area>>,
    #[from(ranking)] ranking: &RefCell<Vec<(String, f64)>>,
) {
    normalize_and_rank(areas, ranking, &WeightProfile::zero());
}

#[then("the first area scores 10 and leads the ranking")]
fn then_dense_leads(#[from(ranking)] ranking: &RefCell<Vec<(String, f64)>>) {
    let ranking = ranking.borrow();
    let leader = ranking.first().expect("non-empty ranking");
    assert_eq!(leader.0, "dense");
    assert!((leader.1 - 10.0).abs() < TOLERANCE, "got {}", leader.1);
}

#[then("the second area is capped at 0.8")]
fn then_sparse_capped(#[from(ranking)] ranking: &RefCell<Vec<(String, f64)>>) {
    let ranking = ranking.borrow();
    let runner_up = ranking.get(1).expect("two entries");
    assert_eq!(runner_up.0, "sparse");
    assert!((runner_up.1 - 0.8).abs() < TOLERANCE, "got {}", runner_up.1);
}

#[then("every area scores 0 and catalog order is preserved")]
fn then_catalog_order(#[from(ranking)] ranking: &RefCell<Vec<(String, f64)>>) {
    let ranking = ranking.borrow();
    let names: Vec<&str> = ranking.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["dense", "sparse"]);
    assert!(ranking.iter().all(|(_, score)| *score == 0.0));
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn critical_mass_ranking(areas: RefCell<Vec<Area>>, ranking: RefCell<Vec<(String, f64)>>) {
    let _ = (areas, ranking);
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn zero_profile_ranking(areas: RefCell<Vec<Area>>, ranking: RefCell<Vec<(String, f64)>>) {
    let _ = (areas, ranking);
}
