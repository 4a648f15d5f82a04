mod common;

use common::{crossing_budgets, matrix, repeated_choice, strict_cycle};
use revpref_axioms::{
    build_relations, cyclical_monotonicity, expenditure_matrix, garp, garp_violation, harp,
    sarp, sarp_violation, smooth_garp, smooth_sarp, strong_sarp, strong_sarp_violation,
    Violation,
};

#[test]
fn crossing_budgets_end_to_end() {
    let (p, x) = crossing_budgets();
    let relations = build_relations(&p, &x).unwrap();
    assert_eq!(relations.expenditure, matrix(&[&[1.0, 2.0], &[2.0, 1.0]]));
    assert_eq!(
        relations.weak.to_rows(),
        vec![vec![true, false], vec![false, true]]
    );
    assert!(relations.strict.is_empty());

    assert!(garp(&p, &x).unwrap());
    assert!(sarp(&p, &x).unwrap());
    assert!(strong_sarp(&p, &x).unwrap());
    assert!(harp(&p, &x).unwrap());
    assert!(cyclical_monotonicity(&p, &x).unwrap());
    assert!(smooth_garp(&p, &x).unwrap());
    assert!(smooth_sarp(&p, &x).unwrap());
}

#[test]
fn strict_cycle_violates_garp() {
    let (p, x) = strict_cycle();
    assert_eq!(
        expenditure_matrix(&p, &x).unwrap(),
        matrix(&[&[1.0, 0.5, 2.0], &[2.0, 1.0, 0.5], &[0.5, 2.0, 1.0]])
    );
    assert!(!garp(&p, &x).unwrap());
    assert_eq!(
        garp_violation(&p, &x).unwrap(),
        Some(Violation::StrictReversal {
            preferred: 0,
            dispreferred: 2
        })
    );
}

#[test]
fn strict_cycle_violates_every_axiom() {
    let (p, x) = strict_cycle();
    assert_eq!(
        sarp_violation(&p, &x).unwrap(),
        Some(Violation::DistinctBundleCycle {
            first: 0,
            second: 2
        })
    );
    assert!(!strong_sarp(&p, &x).unwrap());
    assert!(!harp(&p, &x).unwrap());
    assert!(!cyclical_monotonicity(&p, &x).unwrap());
    assert!(!smooth_sarp(&p, &x).unwrap());
}

#[test]
fn repeated_choice_is_exempt_from_sarp() {
    let (p, x) = repeated_choice();
    let relations = build_relations(&p, &x).unwrap();
    assert_eq!(relations.weak.len(), 4);
    assert!(relations.strict.is_empty());

    assert!(garp(&p, &x).unwrap());
    assert!(sarp(&p, &x).unwrap());
    assert_eq!(
        strong_sarp_violation(&p, &x).unwrap(),
        Some(Violation::PriceNonUniqueness {
            first: 0,
            second: 1
        })
    );
}

#[test]
fn identical_observations_satisfy_strong_sarp() {
    let p = matrix(&[&[0.5, 0.5], &[0.5, 0.5]]);
    let x = matrix(&[&[1.0, 1.0], &[1.0, 1.0]]);
    assert!(strong_sarp(&p, &x).unwrap());
}

#[test]
fn single_observation_is_trivially_consistent() {
    let p = matrix(&[&[0.25, 0.25, 0.5]]);
    let x = matrix(&[&[1.0, 1.0, 1.0]]);
    assert!(garp(&p, &x).unwrap());
    assert!(sarp(&p, &x).unwrap());
    assert!(strong_sarp(&p, &x).unwrap());
    assert!(harp(&p, &x).unwrap());
    assert!(cyclical_monotonicity(&p, &x).unwrap());
    assert!(smooth_garp(&p, &x).unwrap());
    assert!(smooth_sarp(&p, &x).unwrap());
}

#[test]
fn mismatched_shapes_are_rejected() {
    let p = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let x = matrix(&[&[1.0, 2.0, 3.0], &[2.0, 1.0, 3.0]]);
    for result in [garp(&p, &x), sarp(&p, &x), harp(&p, &x), smooth_garp(&p, &x)] {
        assert_eq!(result.unwrap_err().code(), "shape-mismatch");
    }
}

#[test]
fn empty_panels_are_rejected() {
    let p = nalgebra::DMatrix::<f64>::zeros(0, 3);
    let x = nalgebra::DMatrix::<f64>::zeros(0, 3);
    assert_eq!(garp(&p, &x).unwrap_err().code(), "empty-dataset");
    assert_eq!(cyclical_monotonicity(&p, &x).unwrap_err().code(), "empty-dataset");
}

#[test]
fn non_finite_entries_are_rejected() {
    let p = matrix(&[&[f64::NAN, 1.0]]);
    let x = matrix(&[&[1.0, 1.0]]);
    let err = sarp(&p, &x).unwrap_err();
    assert_eq!(err.code(), "non-finite-entry");
    assert_eq!(err.info().context.get("matrix").map(String::as_str), Some("prices"));
}
