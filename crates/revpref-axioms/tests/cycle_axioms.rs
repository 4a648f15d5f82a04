mod common;

use common::{matrix, strict_cycle};
use revpref_axioms::{
    cyclical_monotonicity, cyclical_monotonicity_cycle, cyclical_monotonicity_search, garp, harp,
    harp_cycle, harp_search, log_expenditure, negative_cycle_search, no_negative_cycles,
    Violation,
};
use revpref_core::errors::RpError;
use revpref_graph::CycleSearch;

#[test]
fn no_negative_cycles_ignores_the_diagonal_baseline() {
    let m = matrix(&[&[5.0, 6.0], &[9.0, 8.0]]);
    assert!(no_negative_cycles(&m).unwrap());

    let m = matrix(&[&[5.0, 4.0], &[8.0, 8.0]]);
    assert!(!no_negative_cycles(&m).unwrap());
}

#[test]
fn zero_weight_cycles_are_consistent() {
    let m = matrix(&[&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]]);
    assert!(no_negative_cycles(&m).unwrap());
}

#[test]
fn non_square_weights_are_rejected() {
    let m = matrix(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]);
    let err = negative_cycle_search(&m, 0.0).unwrap_err();
    assert!(matches!(err, RpError::Dataset(_)));
    assert_eq!(err.code(), "shape-mismatch");
}

#[test]
fn strict_cycle_has_negative_expenditure_cycle() {
    let (p, x) = strict_cycle();
    let Some(Violation::NegativeCycle { cycle }) = cyclical_monotonicity_cycle(&p, &x).unwrap()
    else {
        panic!("expected a negative cycle witness");
    };
    let mut nodes = cycle.nodes.clone();
    nodes.sort_unstable();
    assert_eq!(nodes, vec![0, 1, 2]);
    assert!((cycle.weight + 1.5).abs() < 1e-12);
}

#[test]
fn strict_cycle_has_negative_log_cycle() {
    let (p, x) = strict_cycle();
    let witness = harp_cycle(&p, &x).unwrap();
    assert!(matches!(witness, Some(Violation::NegativeCycle { .. })));
    assert!(!harp(&p, &x).unwrap());
}

#[test]
fn quasilinear_but_not_homothetic() {
    let p = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let x = matrix(&[&[10.0, 0.5], &[12.0, 1.0]]);
    // e = [[10, 12], [0.5, 1]]: differences sum to 1.5, ratios multiply to 0.6.
    assert!(garp(&p, &x).unwrap());
    assert!(cyclical_monotonicity(&p, &x).unwrap());
    assert!(!harp(&p, &x).unwrap());
}

#[test]
fn homothetic_but_not_quasilinear() {
    let p = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let x = matrix(&[&[10.0, 2.0], &[6.0, 1.0]]);
    // e = [[10, 6], [2, 1]]: differences sum to -3, ratios multiply to 1.2.
    assert!(garp(&p, &x).unwrap());
    assert!(harp(&p, &x).unwrap());
    assert!(!cyclical_monotonicity(&p, &x).unwrap());
}

#[test]
fn zero_cross_expenditure_fails_harp() {
    // Both budgets are normalized, but bundle 1 is free at the prices of observation 0.
    let p = matrix(&[&[1.0, 0.0], &[0.5, 0.5]]);
    let x = matrix(&[&[1.0, 0.0], &[0.0, 2.0]]);
    // e = [[1, 0], [0.5, 1]]
    assert!(!harp(&p, &x).unwrap());
    assert_eq!(
        harp_cycle(&p, &x).unwrap(),
        Some(Violation::ZeroExpenditure {
            observation: 0,
            bundle: 1
        })
    );
    let search = harp_search(&p, &x, 0.0).unwrap();
    let cycle = search.cycle().expect("two-node cycle");
    assert_eq!(cycle.nodes, vec![0, 1]);
    assert_eq!(cycle.weight, f64::NEG_INFINITY);

    assert!(log_expenditure(&p, &x).is_err());
    assert!(!cyclical_monotonicity(&p, &x).unwrap());
}

#[test]
fn undefined_log_weights_are_errors() {
    // Own expenditure of zero.
    let p = matrix(&[&[1.0, -1.0]]);
    let x = matrix(&[&[1.0, 1.0]]);
    let err = harp(&p, &x).unwrap_err();
    assert!(matches!(err, RpError::Axiom(_)));
    assert_eq!(err.code(), "non-positive-expenditure");

    // Negative cross-expenditure.
    let p = matrix(&[&[1.0, -1.0], &[0.0, 1.0]]);
    let x = matrix(&[&[2.0, 1.0], &[0.0, 1.0]]);
    // e = [[1, -1], [1, 1]]
    let err = harp_cycle(&p, &x).unwrap_err();
    assert_eq!(err.code(), "non-positive-expenditure");
    assert_eq!(err.info().context["column"], "1");
}

#[test]
fn tolerance_absorbs_rounding_noise() {
    let p = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let x = matrix(&[&[1.0, 1.0 - 1e-13], &[1.0, 1.0]]);
    // e = [[1, 1], [1 - 1e-13, 1]]: a cycle of weight -1e-13.
    assert!(!cyclical_monotonicity(&p, &x).unwrap());
    let search = cyclical_monotonicity_search(&p, &x, 1e-9).unwrap();
    assert_eq!(search, CycleSearch::NoNegativeCycle);
}
