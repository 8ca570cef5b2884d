//! Standard selection (spec §4.4), grounded in
//! `original_source/core/op_filter.hpp`'s `FilterOperator` — with the
//! reveal-leak fixed (spec §9, leak 1).
//!
//! The source computes the comparison bit, calls `.reveal<bool>()` on it,
//! and re-encodes the revealed value as a fresh `Integer` flag. Under the
//! semi-honest model that hands each party the cleartext result of every
//! comparison, row by row — exactly the information the flag is supposed
//! to keep secret. This implementation never calls anything resembling
//! reveal: the comparison bit is ANDed with the input flag and stored
//! directly as the output flag, all inside the secret domain.

use crate::error::{Error, Result};
use crate::ops::Target;
use crate::relation::SecureRelation;
use crate::secure::{CompareOp, Engine};

pub struct Filter<E: Engine> {
    pub column: usize,
    pub target: Target<E>,
    pub op: CompareOp,
}

impl<E: Engine> Filter<E> {
    pub fn new(column: usize, target: Target<E>, op: CompareOp) -> Self {
        Self { column, target, op }
    }

    /// `out.flag[r] = in.flag[r] AND op(in.col[column][r], target_r)`;
    /// column data is copied verbatim, including rows the filter excludes
    /// (spec §4.4: "consumers rely on the flag").
    pub fn apply(&self, engine: &E, input: &SecureRelation<E>) -> Result<SecureRelation<E>> {
        input.check_column(self.column)?;
        if let Some(target_len) = self.target.len() {
            if target_len != input.num_rows() {
                return Err(Error::TargetLengthMismatch {
                    target: target_len,
                    expected: input.num_rows(),
                });
            }
        }

        let mut flags = Vec::with_capacity(input.num_rows());
        for row in 0..input.num_rows() {
            let cell = &input.columns[self.column][row];
            let target = self.target.at(row);
            let satisfies = self.op.eval(engine, cell, target);
            flags.push(engine.and(&satisfies, &input.flags[row]));
        }

        Ok(SecureRelation {
            columns: input.columns.clone(),
            flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secure::PlaintextEngine;

    #[test]
    fn filter_eq_constant_matches_scenario_1() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![3, 5, 3, 7]], vec![true, true, false, true]).unwrap();
        let out = Filter::new(0, Target::Const(3), CompareOp::Eq)
            .apply(&engine, &input)
            .unwrap();
        assert_eq!(out.flags, vec![true, false, false, false]);
        assert_eq!(out.columns, input.columns);
    }

    #[test]
    fn filter_against_column_target() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![1, 2, 3]], vec![true, true, true]).unwrap();
        let target = Target::Column(vec![1, 5, 3]);
        let out = Filter::new(0, target, CompareOp::Geq).apply(&engine, &input).unwrap();
        assert_eq!(out.flags, vec![true, false, true]);
    }

    #[test]
    fn rejects_mismatched_target_length() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![1, 2, 3]], vec![true, true, true]).unwrap();
        let target = Target::Column(vec![1, 2]);
        assert!(Filter::new(0, target, CompareOp::Eq).apply(&engine, &input).is_err());
    }
}
