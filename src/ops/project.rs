//! Projection (spec §4.3), grounded in
//! `original_source/core/op_project.hpp`'s `ProjectionOperator`.

use crate::error::{Error, Result};
use crate::relation::SecureRelation;
use crate::secure::Engine;

/// Keep exactly the given columns, in the given order; flags are carried
/// through unchanged. An out-of-range column index is a plan-time error
/// (spec §4.3), rejected before any column is touched — the source throws
/// `std::invalid_argument` for the same case, which this crate surfaces as
/// a typed `Error` instead.
pub struct Project {
    pub columns: Vec<usize>,
}

impl Project {
    pub fn new(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    pub fn apply<E: Engine>(&self, _engine: &E, input: &SecureRelation<E>) -> Result<SecureRelation<E>> {
        for &index in &self.columns {
            if index >= input.num_cols() {
                return Err(Error::InvalidColumn {
                    index,
                    num_cols: input.num_cols(),
                });
            }
        }
        let columns = self
            .columns
            .iter()
            .map(|&index| input.columns[index].clone())
            .collect();
        Ok(SecureRelation {
            columns,
            flags: input.flags.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secure::PlaintextEngine;

    #[test]
    fn keeps_selected_columns_in_order() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(
            vec![vec![1, 2, 3], vec![10, 20, 30], vec![100, 200, 300]],
            vec![true, true, false],
        )
        .unwrap();
        let out = Project::new(vec![2, 0]).apply(&engine, &input).unwrap();
        assert_eq!(out.columns, vec![vec![100, 200, 300], vec![1, 2, 3]]);
        assert_eq!(out.flags, vec![true, true, false]);
    }

    #[test]
    fn rejects_out_of_range_column() {
        let engine = PlaintextEngine;
        let input = SecureRelation::from_parts(vec![vec![1, 2]], vec![true, true]).unwrap();
        assert!(Project::new(vec![5]).apply(&engine, &input).is_err());
    }
}
