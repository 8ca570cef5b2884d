//! `SecureRelation`'s own sort/compact surface (spec.md §4.2), exercised
//! end to end rather than through `relation::primitives`'s lower-level
//! unit tests.

use oblivrel::{PlaintextEngine, SecureRelation};

#[test]
fn sort_by_column_orders_rows_and_carries_other_columns() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![3, 1, 2], vec![30, 10, 20]], vec![true, true, true]).unwrap();
    r.sort_by_column(&engine, 0).unwrap();
    assert_eq!(r.columns[0], vec![1, 2, 3]);
    assert_eq!(r.columns[1], vec![10, 20, 30]);
}

#[test]
fn sort_by_flag_puts_live_rows_first() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![1, 2, 3, 4]], vec![false, true, false, true]).unwrap();
    r.sort_by_flag(&engine);
    assert!(r.flags[..2].iter().all(|f| *f));
    assert!(r.flags[2..].iter().all(|f| !*f));
}

#[test]
fn sort_by_two_columns_breaks_ties_with_secondary() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![1, 1, 0, 0], vec![9, 2, 8, 1]], vec![true; 4]).unwrap();
    r.sort_by_two_columns(&engine, 0, 1).unwrap();
    assert_eq!(r.columns[0], vec![0, 0, 1, 1]);
    assert_eq!(r.columns[1], vec![1, 8, 2, 9]);
}

#[test]
fn sort_by_column_rejects_out_of_range_index() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![1, 2]], vec![true, true]).unwrap();
    assert!(r.sort_by_column(&engine, 4).is_err());
}
