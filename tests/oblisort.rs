//! The oblivious primitives directly (spec.md §4.1), grounded in
//! `original_source/util/oblisort.hpp`'s own test coverage — bitonic sort
//! over non-power-of-two sizes, and the oblivious flag-compaction network
//! that replaces Goldreich's leaky merge (spec §9).

use oblivrel::relation::primitives::{bitonic_sort, compact_by_flag, SortKey};
use oblivrel::{PlaintextEngine, SecureRelation};

#[test]
fn bitonic_sort_is_stable_on_ties() {
    let engine = PlaintextEngine;
    // column is the sort key; the second column lets us observe whether
    // ties kept their relative order.
    let mut r = SecureRelation::from_parts(vec![vec![1, 1, 0, 0], vec![100, 200, 300, 400]], vec![true; 4]).unwrap();
    bitonic_sort(&engine, &mut r, SortKey::Column(0), true);
    assert_eq!(r.columns[0], vec![0, 0, 1, 1]);
    assert_eq!(r.columns[1], vec![300, 400, 100, 200], "ties preserve original relative order");
}

#[test]
fn bitonic_sort_descending_by_flag_orders_live_first() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![1, 2, 3, 4]], vec![false, true, false, true]).unwrap();
    bitonic_sort(&engine, &mut r, SortKey::Flag, false);
    assert!(r.flags[..2].iter().all(|f| *f));
    assert!(r.flags[2..].iter().all(|f| !*f));
}

#[test]
fn bitonic_sort_handles_single_row() {
    let engine = PlaintextEngine;
    let mut r = SecureRelation::from_parts(vec![vec![42]], vec![true]).unwrap();
    bitonic_sort(&engine, &mut r, SortKey::Column(0), true);
    assert_eq!(r.columns[0], vec![42]);
}

#[test]
fn compact_by_flag_handles_arbitrary_sizes_without_padding() {
    let engine = PlaintextEngine;
    for n in [1usize, 2, 3, 5, 7, 9, 16] {
        let flags: Vec<bool> = (0..n).map(|i| i % 2 == 0).collect();
        let live_count = flags.iter().filter(|f| **f).count();
        let mut r = SecureRelation::from_parts(vec![(0..n as i64).collect()], flags).unwrap();
        compact_by_flag(&engine, &mut r);
        assert_eq!(r.num_rows(), n, "compaction never changes row count");
        assert_eq!(r.flags.iter().filter(|f| **f).count(), live_count);
        assert!(r.flags[..live_count].iter().all(|f| *f));
        assert!(r.flags[live_count..].iter().all(|f| !*f));
    }
}
