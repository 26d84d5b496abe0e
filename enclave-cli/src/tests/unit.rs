//! Focused unit tests covering rank CLI configuration and rendering.

use super::*;
use crate::rank::{RankArgs, RankConfig, parse_weights, render};
use rstest::rstest;
use std::time::Duration;

use enclave_core::{
    Area, Dimension, NormalizeStrategy, StaticAttributes, WeightProfile, rank as rank_areas,
};
use geo::Coord;

fn args() -> RankArgs {
    RankArgs::default()
}

#[rstest]
fn defaults_resolve_to_the_hybrid_balanced_setup() {
    let config = RankConfig::try_from(args()).expect("defaults must resolve");
    assert_eq!(config.strategy, NormalizeStrategy::CriticalMass);
    assert_eq!(config.profile, WeightProfile::balanced());
    assert_eq!(config.endpoint, enclave_data::DEFAULT_ENDPOINT);
    assert_eq!(config.timeout, Duration::from_secs(25));
    assert_eq!(config.top, 3);
}

#[rstest]
#[case("min-max", NormalizeStrategy::MinMax)]
#[case("per-capita", NormalizeStrategy::PerCapita)]
#[case("critical-mass", NormalizeStrategy::CriticalMass)]
fn strategy_flag_is_parsed(#[case] flag: &str, #[case] expected: NormalizeStrategy) {
    let config = RankConfig::try_from(RankArgs {
        strategy: Some(flag.to_owned()),
        ..args()
    })
    .expect("known strategy");
    assert_eq!(config.strategy, expected);
}

#[rstest]
fn unknown_strategy_is_rejected() {
    let err = RankConfig::try_from(RankArgs {
        strategy: Some("median".to_owned()),
        ..args()
    })
    .expect_err("unknown strategy must fail");
    match err {
        CliError::InvalidArgument { field, .. } => assert_eq!(field, ARG_STRATEGY),
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
fn preset_flag_resolves_its_weights() {
    let config = RankConfig::try_from(RankArgs {
        preset: Some("quiet-tech".to_owned()),
        ..args()
    })
    .expect("known preset");
    assert_eq!(config.profile.weight(Dimension::Quiet), 10);
    assert_eq!(config.profile.weight(Dimension::Nightlife), 0);
}

#[rstest]
fn preset_and_weights_conflict() {
    let err = RankConfig::try_from(RankArgs {
        preset: Some("quiet-tech".to_owned()),
        weights: Some("1,1,1,1,1,1,1".to_owned()),
        ..args()
    })
    .expect_err("conflicting profile sources must fail");
    assert!(matches!(err, CliError::ConflictingProfile));
}

#[rstest]
fn zero_timeout_is_rejected() {
    let err = RankConfig::try_from(RankArgs {
        timeout_secs: Some(0),
        ..args()
    })
    .expect_err("zero timeout must fail");
    match err {
        CliError::InvalidArgument { field, .. } => assert_eq!(field, ARG_TIMEOUT_SECS),
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
fn weight_lists_parse_in_canonical_order() {
    let profile = parse_weights("1, 2,3,4,5,6,7").expect("valid weight list");
    assert_eq!(profile.weight(Dimension::Safety), 1);
    assert_eq!(profile.weight(Dimension::Cost), 7);
}

#[rstest]
#[case("1,2,3")]
#[case("1,2,3,4,5,6,7,8")]
#[case("1,2,3,four,5,6,7")]
#[case("1,2,3,11,5,6,7")]
fn bad_weight_lists_are_rejected(#[case] list: &str) {
    assert!(parse_weights(list).is_err());
}

#[rstest]
fn render_lists_every_area_and_top_picks() {
    let statics = StaticAttributes::new(8, 6, 4, 2).expect("valid statics");
    let areas = vec![
        Area::new("Alpha", Coord { x: 0.0, y: 0.0 }, 1500, Some(1000), statics)
            .expect("valid area"),
        Area::new("Beta", Coord { x: 1.0, y: 1.0 }, 1500, Some(1000), statics)
            .expect("valid area"),
    ];
    let profile = WeightProfile::balanced();
    let ranked = rank_areas(&areas, &profile);
    let config = RankConfig {
        strategy: NormalizeStrategy::CriticalMass,
        profile,
        endpoint: enclave_data::DEFAULT_ENDPOINT.to_owned(),
        timeout: Duration::from_secs(25),
        top: 1,
    };

    let output = render(&ranked, &config);

    assert!(output.contains("Alpha"));
    assert!(output.contains("Beta"));
    assert!(output.contains("Top picks:"));
    assert!(output.contains('%'));
}
