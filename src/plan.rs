//! L5: the thin plan composer (spec §2, §4.8.1).
//!
//! This layer has almost no logic of its own — it exists to name the one
//! contract spec.md calls out explicitly: that `IndexEquiJoin::rebuild_index`
//! produces exactly the bucket list a *following* `IndexEquiJoin` needs, so
//! a chain of bucketed joins over the same bucket skeleton (the source's
//! Q5/Q6/Q8 queries) never has to recompute bucket boundaries by hand.

use crate::config::RunConfig;
use crate::error::Result;
use crate::ops::index_equi_join::IndexEquiJoin;
use crate::relation::bucket::BucketIndex;
use crate::relation::SecureRelation;
use crate::secure::Engine;

/// One stage of a chained index join: the join itself, plus the bucket
/// index this stage's *other* side (the relation not produced by the
/// previous stage) is partitioned under.
pub struct IndexJoinStage {
    pub join: IndexEquiJoin,
}

/// Runs a sequence of index-join stages left to right, feeding each
/// stage's `rebuild_index()` output in as the left-hand bucket list for
/// the next stage — the pattern spec §4.8.1 describes for chaining 2–4
/// index joins over a shared eight-bucket skeleton (e.g. the source's
/// Q5/Q6/Q8 queries).
///
/// `stages[0].join.index_left` is used as given; every later stage's
/// `index_left` is *overwritten* with the previous stage's rebuilt index
/// before that stage runs, so callers only need to supply each stage's
/// right-hand relation and bucket list up front.
pub fn run_chain<E>(
    engine: &E,
    mut stages: Vec<IndexJoinStage>,
    mut left: SecureRelation<E>,
    rights: &[SecureRelation<E>],
    config: &RunConfig,
) -> Result<SecureRelation<E>>
where
    E: Engine + Sync,
    E::Int: Send + Sync,
    E::Bit: Send + Sync,
{
    assert_eq!(stages.len(), rights.len(), "one right-hand relation per stage");

    let mut rebuilt: Option<BucketIndex> = None;
    for (stage, right) in stages.iter_mut().zip(rights.iter()) {
        if let Some(index) = rebuilt.take() {
            stage.join.index_left = index;
        }
        let result = stage.join.apply(engine, &left, right, config)?;
        rebuilt = Some(stage.join.rebuild_index()?);
        left = result;
    }
    Ok(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::index_equi_join::CompactionMode;
    use crate::relation::bucket::Range;
    use crate::secure::PlaintextEngine;

    #[test]
    fn chains_two_index_joins_through_rebuild_index() {
        let engine = PlaintextEngine;
        let left = SecureRelation::from_parts(vec![vec![1, 1, 2, 2]], vec![true; 4]).unwrap();
        let mid = SecureRelation::from_parts(vec![vec![1, 1, 2, 2]], vec![true; 4]).unwrap();
        let right = SecureRelation::from_parts(vec![vec![0, 0, 0, 0]], vec![true; 4]).unwrap();

        let stage1 = IndexJoinStage {
            join: IndexEquiJoin::new(
                vec![Range::inclusive(0, 3)],
                vec![Range::inclusive(0, 3)],
                0,
                0,
                CompactionMode::SmallerRel,
            ),
        };
        let stage2 = IndexJoinStage {
            join: IndexEquiJoin::new(
                vec![], // overwritten by stage1's rebuild_index
                vec![Range::inclusive(0, 3)],
                0,
                0,
                CompactionMode::SmallerRel,
            ),
        };

        let out = run_chain(&engine, vec![stage1, stage2], left, &[mid, right], &RunConfig::default()).unwrap();
        assert!(out.num_rows() > 0);
    }
}
