//! Packed-output filter (spec §4.5), grounded in
//! `original_source/core/op_pac_filter.hpp`'s `PACFilterOperator`.
//!
//! Unlike `Filter`, this operator writes qualifying rows into a
//! fixed-size, densely-packed output: a secret `last_written` cursor and a
//! secret `writes` counter track progress, and committing a row scans
//! every one of the `T` output slots so the write pattern never depends on
//! which slot actually receives the row (spec §4.5: gate cost
//! `O(N*T*C)`).

use crate::error::{Error, Result};
use crate::ops::Target;
use crate::relation::SecureRelation;
use crate::secure::{CompareOp, Engine};

pub struct PacFilter<E: Engine> {
    pub column: usize,
    pub target: Target<E>,
    pub op: CompareOp,
    pub truncation_size: usize,
}

impl<E: Engine> PacFilter<E> {
    pub fn new(column: usize, target: Target<E>, op: CompareOp, truncation_size: usize) -> Self {
        Self {
            column,
            target,
            op,
            truncation_size,
        }
    }

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

        let t = self.truncation_size;
        let num_cols = input.num_cols();
        let mut out_columns: Vec<Vec<E::Int>> = vec![vec![engine.const_int(0); t]; num_cols];
        let mut out_flags: Vec<E::Bit> = vec![engine.const_bit(false); t];

        let neg_one = engine.const_int(-1);
        let one = engine.const_int(1);
        let t_int = engine.const_int(t as i64);

        let mut last_written = neg_one;
        let mut writes = engine.const_int(0);

        for row in 0..input.num_rows() {
            let cell = &input.columns[self.column][row];
            let target = self.target.at(row);
            let satisfies_cond = self.op.eval(engine, cell, target);
            let satisfies = engine.and(&satisfies_cond, &input.flags[row]);

            let next_slot = engine.add(&last_written, &one);
            let has_room = engine.gt(&t_int, &next_slot);
            let is_write_position = engine.and(&has_room, &satisfies);

            for slot in 0..t {
                let slot_int = engine.const_int(slot as i64);
                let is_current = engine.and(&engine.eq(&slot_int, &next_slot), &is_write_position);
                for col in 0..num_cols {
                    let existing = out_columns[col][slot].clone();
                    out_columns[col][slot] = engine.mux_int(&is_current, &input.columns[col][row], &existing);
                }
                out_flags[slot] = engine.mux_bit(&is_current, &engine.const_bit(true), &out_flags[slot]);
            }

            last_written = engine.mux_int(&is_write_position, &next_slot, &last_written);
            writes = engine.mux_int(&is_write_position, &engine.add(&writes, &one), &writes);
        }
        let _ = writes;

        Ok(SecureRelation {
            columns: out_columns,
            flags: out_flags,
        })
    }
}
