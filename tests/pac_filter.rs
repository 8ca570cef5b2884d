//! Scenario 3 (spec.md §8) and the PAC-filter correctness property.

use oblivrel::{CompareOp, PacFilter, PlaintextEngine, SecureRelation, Target};

#[test]
fn pac_filter_matches_scenario_3() {
    let engine = PlaintextEngine;
    let input = SecureRelation::from_parts(vec![vec![10, 20, 30, 40]], vec![true; 4]).unwrap();
    let out = PacFilter::new(0, Target::Const(15), CompareOp::Gt, 2).apply(&engine, &input).unwrap();
    assert_eq!(out.num_rows(), 2);
    assert_eq!(out.flags, vec![true, true]);
    assert_eq!(out.columns[0], vec![20, 30]);
}

#[test]
fn pac_filter_keeps_input_order_among_qualifying_rows() {
    let engine = PlaintextEngine;
    let input = SecureRelation::from_parts(vec![vec![5, 50, 6, 60, 7]], vec![true; 5]).unwrap();
    let out = PacFilter::new(0, Target::Const(10), CompareOp::Gt, 5).apply(&engine, &input).unwrap();
    assert_eq!(out.columns[0], vec![50, 60, 0, 0, 0]);
    assert_eq!(out.flags, vec![true, true, false, false, false]);
}

#[test]
fn pac_filter_truncation_size_caps_output_exactly() {
    let engine = PlaintextEngine;
    let input = SecureRelation::from_parts(vec![vec![1, 2, 3, 4, 5, 6]], vec![true; 6]).unwrap();
    let out = PacFilter::new(0, Target::Const(0), CompareOp::Gt, 4).apply(&engine, &input).unwrap();
    assert_eq!(out.num_rows(), 4);
    assert_eq!(out.columns[0], vec![1, 2, 3, 4]);
}
