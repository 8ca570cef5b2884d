//! Scenarios 5 and 6 (spec.md §8): bucketed index join under `SMALLER_REL`,
//! and a chained pair of index joins stitched together by `rebuild_index`.

use oblivrel::config::RunConfig;
use oblivrel::ops::index_equi_join::CompactionMode;
use oblivrel::relation::bucket::Range;
use oblivrel::{IndexEquiJoin, PlaintextEngine, SecureRelation};

#[test]
fn smaller_rel_matches_scenario_5() {
    let engine = PlaintextEngine;
    let left = SecureRelation::from_parts(vec![vec![1, 1, 2, 2, 3, 3]], vec![true; 6]).unwrap();
    let right = SecureRelation::from_parts(vec![vec![1, 1, 2, 2, 3, 3]], vec![true; 6]).unwrap();
    let join = IndexEquiJoin::new(
        vec![Range::inclusive(0, 5)],
        vec![Range::inclusive(0, 5)],
        0,
        0,
        CompactionMode::SmallerRel,
    );
    let out = join.apply(&engine, &left, &right, &RunConfig::default()).unwrap();
    assert_eq!(out.num_rows(), 6);
    assert!(out.flags.iter().all(|f| *f));
}

#[test]
fn rebuild_index_lengths_match_scenario_6_smaller_rel_stage() {
    let index_l = vec![Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7), Range::inclusive(0, 7)];
    let index_r = vec![Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3), Range::inclusive(0, 3)];
    let join = IndexEquiJoin::new(index_l, index_r, 0, 0, CompactionMode::SmallerRel);
    let rebuilt = join.rebuild_index().unwrap();
    assert_eq!(rebuilt.len(), 8);
    assert!(rebuilt.iter().all(|range| range.len() == 4));
    let mut expected_start = 0;
    for range in &rebuilt {
        assert_eq!(range.start, expected_start, "ranges must be contiguous starting at 0");
        expected_start += range.len();
    }
}

#[test]
fn chained_index_join_via_rebuild_index_matches_scenario_6() {
    let engine = PlaintextEngine;
    let left = SecureRelation::from_parts(vec![vec![1, 1, 2, 2, 3, 3, 4, 4]], vec![true; 8]).unwrap();
    let mid = SecureRelation::from_parts(vec![vec![1, 1, 2, 2, 3, 3, 4, 4]], vec![true; 8]).unwrap();
    let right = SecureRelation::from_parts(vec![vec![0; 8]], vec![true; 8]).unwrap();

    let index_l = vec![Range::inclusive(0, 7)];
    let index_m = vec![Range::inclusive(0, 7)];
    let stage1 = IndexEquiJoin::new(index_l, index_m, 0, 0, CompactionMode::SmallerRel);
    let step1 = stage1.apply(&engine, &left, &mid, &RunConfig::default()).unwrap();
    let rebuilt = stage1.rebuild_index().unwrap();

    let index_r = vec![Range::inclusive(0, 7)];
    let stage2 = IndexEquiJoin::new(rebuilt.clone(), index_r, 0, 0, CompactionMode::Mf { mf_left: 2, mf_right: 3 });
    let step2 = stage2
        .apply(&engine, &step1, &right, &RunConfig::default())
        .expect("second stage accepts the rebuilt index without reindexing errors");

    assert!(step2.num_rows() > 0);
    assert_eq!(rebuilt[0].start, 0);
}
