mod common;

use common::trait_with;
use pfpforge::error::ForgeError;
use pfpforge::generator::pool::{build_pool, build_pools};
use rstest::rstest;

#[rstest]
#[case::exact_split(&[50.0, 30.0, 20.0], 10, vec![5, 3, 2], 0)]
#[case::pads_with_dominant(&[50.0, 40.0], 10, vec![6, 4], 1)]
#[case::single_full(&[100.0], 4, vec![4], 0)]
#[case::even_halves(&[50.0, 50.0], 4, vec![2, 2], 0)]
#[case::rounding_loss(&[33.3, 33.3, 33.4], 10, vec![3, 3, 4], 1)]
#[case::tie_goes_to_first(&[10.0, 45.0, 45.0], 10, vec![1, 5, 4], 1)]
#[case::all_zero(&[0.0, 0.0], 3, vec![3, 0], 3)]
fn test_pool_counts(
    #[case] rarities: &[f64],
    #[case] size: usize,
    #[case] expected: Vec<usize>,
    #[case] padded: usize,
) {
    let t = trait_with("T", rarities);
    let build = build_pool(&t, size).unwrap();
    assert_eq!(build.pool.len(), size);
    assert_eq!(build.pool.counts(rarities.len()), expected);
    assert_eq!(build.padded, padded);
    assert!(!build.overflow);
}

#[test]
fn test_pool_is_built_in_variant_order() {
    let build = build_pool(&trait_with("T", &[50.0, 40.0]), 10).unwrap();
    assert_eq!(build.pool.as_slice(), &[0, 0, 0, 0, 0, 1, 1, 1, 1, 0]);
    assert_eq!(build.pad_variant, Some(0));
}

#[test]
fn test_overflow_is_a_warning_by_default() {
    let traits = vec![trait_with("T", &[80.0, 40.0])];
    let builds = build_pools(&traits, 10, false).unwrap();
    assert!(builds[0].overflow);
    assert_eq!(builds[0].requested, 12);
    assert_eq!(builds[0].pool.len(), 10);
}

#[test]
fn test_overflow_is_fatal_in_strict_mode() {
    let traits = vec![trait_with("Ok", &[100.0]), trait_with("Over", &[80.0, 40.0])];
    let err = build_pools(&traits, 10, true).unwrap_err();
    assert!(matches!(
        err,
        ForgeError::PoolOverflow { ref trait_name, requested: 12, capacity: 10 } if trait_name == "Over"
    ));
}

#[test]
fn test_empty_trait_is_fatal() {
    let traits = vec![trait_with("Ok", &[100.0]), trait_with("Empty", &[])];
    match build_pools(&traits, 5, false) {
        Err(ForgeError::EmptyTrait { trait_name }) => assert_eq!(trait_name, "Empty"),
        other => panic!("expected EmptyTrait, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_pools_for_two_trait_scenario() {
    let traits = vec![trait_with("A", &[100.0]), trait_with("X", &[50.0, 50.0])];
    let builds = build_pools(&traits, 4, false).unwrap();
    assert_eq!(builds[0].pool.as_slice(), &[0, 0, 0, 0]);
    assert_eq!(builds[1].pool.counts(2), vec![2, 2]);
}
