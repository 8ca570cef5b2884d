//! Scenario 4 (spec.md §8) and the equi-join correctness invariant.

use oblivrel::{EquiJoin, PlaintextEngine, SecureRelation};

#[test]
fn equi_join_cross_matches_scenario_4() {
    let engine = PlaintextEngine;
    let left = SecureRelation::from_parts(vec![vec![1, 2]], vec![true, true]).unwrap();
    let right = SecureRelation::from_parts(vec![vec![2, 2, 3]], vec![true, true, true]).unwrap();
    let out = EquiJoin::new(0, 0).apply(&engine, &left, &right).unwrap();
    assert_eq!(out.num_rows(), 6);
    assert_eq!(out.flags, vec![false, false, false, true, true, false]);
}

#[test]
fn equi_join_output_width_is_sum_of_input_widths() {
    let engine = PlaintextEngine;
    let left = SecureRelation::from_parts(vec![vec![1], vec![9]], vec![true]).unwrap();
    let right = SecureRelation::from_parts(vec![vec![1], vec![8], vec![7]], vec![true]).unwrap();
    let out = EquiJoin::new(0, 0).apply(&engine, &left, &right).unwrap();
    assert_eq!(out.num_cols(), 5);
    assert_eq!(out.columns[0], vec![1]);
    assert_eq!(out.columns[1], vec![9]);
    assert_eq!(out.columns[2], vec![1]);
    assert_eq!(out.columns[3], vec![8]);
    assert_eq!(out.columns[4], vec![7]);
}

#[test]
fn equi_join_output_size_is_product_of_public_sizes_only() {
    let engine = PlaintextEngine;
    let left_live = SecureRelation::from_parts(vec![vec![1, 1, 1]], vec![true, true, true]).unwrap();
    let left_dead = SecureRelation::from_parts(vec![vec![1, 1, 1]], vec![false, false, false]).unwrap();
    let right = SecureRelation::from_parts(vec![vec![1, 1]], vec![true, true]).unwrap();
    let out_live = EquiJoin::new(0, 0).apply(&engine, &left_live, &right).unwrap();
    let out_dead = EquiJoin::new(0, 0).apply(&engine, &left_dead, &right).unwrap();
    assert_eq!(out_live.num_rows(), out_dead.num_rows(), "output shape ignores secret flag values");
}
