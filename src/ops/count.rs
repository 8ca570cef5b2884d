//! Count aggregate (spec §4.6). The source ships no `op_count.hpp` — this
//! module is grounded in the same accumulate-then-emit shape used by
//! `original_source/core/op_pac_filter.hpp`'s running counters, specialized
//! to a single running sum with no grouping (spec §4.6: "grouping is
//! synthesized by the planner via sort + count").

use crate::relation::SecureRelation;
use crate::secure::Engine;

pub struct Count;

impl Count {
    /// Sum `flags` (widened to the relation's integer width) and emit a
    /// single-row, single-column relation with flag `1`.
    pub fn apply<E: Engine>(engine: &E, input: &SecureRelation<E>) -> SecureRelation<E> {
        let mut total = engine.const_int(0);
        for flag in &input.flags {
            total = engine.add(&total, &engine.bit_to_int(flag));
        }
        SecureRelation {
            columns: vec![vec![total]],
            flags: vec![engine.const_bit(true)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secure::PlaintextEngine;

    #[test]
    fn counts_only_live_rows() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![1, 2, 3, 4]], vec![true, false, true, true]).unwrap();
        let out = Count::apply(&engine, &input);
        assert_eq!(out.columns[0], vec![3]);
        assert_eq!(out.flags, vec![true]);
    }

    #[test]
    fn counts_empty_relation_as_zero() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![]], vec![]).unwrap();
        let out = Count::apply(&engine, &input);
        assert_eq!(out.columns[0], vec![0]);
    }
}
