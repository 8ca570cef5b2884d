//! Full equi-join (spec §4.7), grounded in
//! `original_source/core/op_equijoin.hpp`'s `EquiJoinOperator`.

use crate::error::Result;
use crate::relation::SecureRelation;
use crate::secure::Engine;

pub struct EquiJoin {
    pub column_left: usize,
    pub column_right: usize,
}

impl EquiJoin {
    pub fn new(column_left: usize, column_right: usize) -> Self {
        Self { column_left, column_right }
    }

    /// The `m*n` Cartesian product of `left` and `right`, with output row
    /// `l*n + r` holding `left[l] ++ right[r]` and
    /// `flag = (left.col[column_left][l] == right.col[column_right][r]) AND
    /// left.flag[l] AND right.flag[r]` (spec §4.7). No comparison result is
    /// ever revealed.
    pub fn apply<E: Engine>(
        &self,
        engine: &E,
        left: &SecureRelation<E>,
        right: &SecureRelation<E>,
    ) -> Result<SecureRelation<E>> {
        left.check_column(self.column_left)?;
        right.check_column(self.column_right)?;

        let m = left.num_rows();
        let n = right.num_rows();
        let num_cols = left.num_cols() + right.num_cols();
        let mut columns: Vec<Vec<E::Int>> = vec![Vec::with_capacity(m * n); num_cols];
        let mut flags = Vec::with_capacity(m * n);

        for l in 0..m {
            for r in 0..n {
                for (c, column) in left.columns.iter().enumerate() {
                    columns[c].push(column[l].clone());
                }
                for (c, column) in right.columns.iter().enumerate() {
                    columns[left.num_cols() + c].push(column[r].clone());
                }
                let keys_equal = engine.eq(&left.columns[self.column_left][l], &right.columns[self.column_right][r]);
                let both_live = engine.and(&left.flags[l], &right.flags[r]);
                flags.push(engine.and(&keys_equal, &both_live));
            }
        }

        Ok(SecureRelation { columns, flags })
    }
}
