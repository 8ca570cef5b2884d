//! Oblivious primitives (spec §4.1): conditional swap, bitonic sort, and an
//! oblivious two-way compaction that replaces the Goldreich merge from
//! `original_source/util/oblisort.hpp` — whose merge step branches on a
//! *revealed* flag bit and is exactly the leak spec §9 requires fixing.
//!
//! The bitonic recursion below (`bitonic_sort_range` / `bitonic_merge_range`
//! / `conditional_swap`) is a direct port of `oblisort.hpp`'s
//! `bitonic_sort` / `bitonic_merge` / `swap_data` over a generic key
//! selector instead of a single hardwired array. The compaction path
//! (`compact_by_flag_range` / `merge_by_flag_range` /
//! `greatest_power_of_two_less_than`) ports `oblisort.hpp`'s
//! `bitonic_compaction` / `binary_bitonic_merge_by_flag` family, which is
//! already a fully oblivious network (no revealed bits) and serves as the
//! non-leaky replacement for Goldreich's two-cursor merge.

use super::SecureRelation;
use crate::secure::Engine;

/// Which column drives a sort's comparator: one of the relation's own
/// columns, or the flag vector itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Column(usize),
    Flag,
}

/// Swap row `i` and row `j` of every column and the flag vector iff `cond`
/// is secretly true — the data-access pattern (every column, both rows) is
/// identical regardless of `cond` (spec §4.1).
pub fn conditional_swap<E: Engine>(
    engine: &E,
    relation: &mut SecureRelation<E>,
    i: usize,
    j: usize,
    cond: &E::Bit,
) {
    for column in relation.columns.iter_mut() {
        let a = column[i].clone();
        let b = column[j].clone();
        column[i] = engine.mux_int(cond, &b, &a);
        column[j] = engine.mux_int(cond, &a, &b);
    }
    let fa = relation.flags[i].clone();
    let fb = relation.flags[j].clone();
    relation.flags[i] = engine.mux_bit(cond, &fb, &fa);
    relation.flags[j] = engine.mux_bit(cond, &fa, &fb);
}

/// Read the comparator key for `row` as an `E::Int`, widening the flag bit
/// when `key == SortKey::Flag` so both key kinds share one comparator.
fn read_key<E: Engine>(engine: &E, relation: &SecureRelation<E>, key: SortKey, row: usize) -> E::Int {
    match key {
        SortKey::Column(idx) => relation.columns[idx][row].clone(),
        SortKey::Flag => engine.bit_to_int(&relation.flags[row]),
    }
}

/// Pad `relation` up to `target_len` rows so the bitonic network below can
/// assume a power-of-two size (spec §4.1). Padding rows get flag `0`
/// (non-live) and, for a column key, the sentinel maximum value so an
/// ascending sort carries them to the tail; for a flag key the padding
/// flag of `0` already sorts to the tail of a descending flag sort, since
/// there is no value outside `{0,1}` to use as a true sentinel there.
fn pad_for_bitonic<E: Engine>(engine: &E, relation: &mut SecureRelation<E>, key: SortKey, target_len: usize) {
    let extra = target_len - relation.num_rows();
    let max_key = engine.max_int();
    for column_idx in 0..relation.num_cols() {
        let fill = if key == SortKey::Column(column_idx) {
            max_key.clone()
        } else {
            engine.const_int(0)
        };
        relation.columns[column_idx].extend(std::iter::repeat(fill).take(extra));
    }
    relation
        .flags
        .extend(std::iter::repeat(engine.const_bit(false)).take(extra));
}

/// Bitonic sort of `relation` by `key`, ascending iff `ascending` (spec
/// §4.1). Handles non-power-of-two row counts by padding, sorting, then
/// truncating back.
///
/// Plain bitonic merge only withholds a swap when two keys are exactly
/// equal, which is not enough to make the sort stable: a descending
/// sub-merge (used internally by the recursion's upper half) swaps equal
/// keys unconditionally, so two tied rows can still cross each other by
/// the time the network finishes. Spec §4.2 requires `sort_by_column` to
/// be stable, so every comparison here is lexicographic on `(key,
/// original_row_index)` — a `tags` array that starts as `0..n` and is
/// swapped alongside every column, never equal between two distinct rows,
/// so ties always resolve in favor of the row that started earlier.
pub fn bitonic_sort<E: Engine>(engine: &E, relation: &mut SecureRelation<E>, key: SortKey, ascending: bool) {
    let n = relation.num_rows();
    if n <= 1 {
        return;
    }
    let padded_len = n.next_power_of_two();
    let mut tags: Vec<E::Int> = (0..n as i64).map(|i| engine.const_int(i)).collect();
    if padded_len != n {
        pad_for_bitonic(engine, relation, key, padded_len);
        tags.extend((n as i64..padded_len as i64).map(|i| engine.const_int(i)));
    }
    bitonic_sort_range(engine, relation, &mut tags, key, 0, padded_len, ascending);
    if padded_len != n {
        relation.truncate(n);
    }
}

fn bitonic_sort_range<E: Engine>(
    engine: &E,
    relation: &mut SecureRelation<E>,
    tags: &mut [E::Int],
    key: SortKey,
    low: usize,
    len: usize,
    ascending: bool,
) {
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    bitonic_sort_range(engine, relation, tags, key, low, mid, true);
    bitonic_sort_range(engine, relation, tags, key, low + mid, mid, false);
    bitonic_merge_range(engine, relation, tags, key, low, len, ascending);
}

fn bitonic_merge_range<E: Engine>(
    engine: &E,
    relation: &mut SecureRelation<E>,
    tags: &mut [E::Int],
    key: SortKey,
    low: usize,
    len: usize,
    ascending: bool,
) {
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    for i in low..low + mid {
        let j = i + mid;
        let a = read_key(engine, relation, key, i);
        let b = read_key(engine, relation, key, j);
        let key_gt = engine.gt(&a, &b);
        let key_eq = engine.eq(&a, &b);
        let tag_gt = engine.gt(&tags[i], &tags[j]);
        // lexicographic (key, tag) greater-than
        let a_gt_b = engine.not(&engine.and(&engine.not(&key_gt), &engine.not(&engine.and(&key_eq, &tag_gt))));
        // to_swap = (a > b) == ascending
        let cond = if ascending {
            a_gt_b
        } else {
            engine.not(&a_gt_b)
        };
        conditional_swap(engine, relation, i, j, &cond);
        let ta = tags[i].clone();
        let tb = tags[j].clone();
        tags[i] = engine.mux_int(&cond, &tb, &ta);
        tags[j] = engine.mux_int(&cond, &ta, &tb);
    }
    bitonic_merge_range(engine, relation, tags, key, low, mid, ascending);
    bitonic_merge_range(engine, relation, tags, key, low + mid, mid, ascending);
}

/// Greatest power of two strictly less than `n` (used to split an
/// arbitrary-sized range for the oblivious flag-compaction network, as in
/// `oblisort.hpp`'s `greatest_power_of_two_less_than`).
fn greatest_power_of_two_less_than(n: usize) -> usize {
    let mut k = 1usize;
    while k < n {
        k <<= 1;
    }
    k >> 1
}

/// Oblivious compaction by flag: after this call every live row (flag=1)
/// precedes every dead row (flag=0), without preserving relative order
/// (spec §4.1's "Goldreich two-way compaction"). Unlike the source's
/// two-cursor merge, this never reveals a flag bit — every comparison
/// and swap happens unconditionally for every position the network
/// touches, matching the fix spec §9 requires. Handles arbitrary `N`
/// directly (no power-of-two padding needed), following `oblisort.hpp`'s
/// `greatest_power_of_two_less_than` split.
pub fn compact_by_flag<E: Engine>(engine: &E, relation: &mut SecureRelation<E>) {
    let n = relation.num_rows();
    compact_by_flag_range(engine, relation, 0, n);
}

fn compact_by_flag_range<E: Engine>(engine: &E, relation: &mut SecureRelation<E>, low: usize, len: usize) {
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    compact_by_flag_range(engine, relation, low, mid);
    compact_by_flag_range(engine, relation, low + mid, len - mid);
    merge_by_flag_range(engine, relation, low, len);
}

fn merge_by_flag_range<E: Engine>(engine: &E, relation: &mut SecureRelation<E>, low: usize, len: usize) {
    if len <= 1 {
        return;
    }
    let m = greatest_power_of_two_less_than(len);
    for i in low..low + (len - m) {
        let j = i + m;
        let cond = engine.gt(&engine.bit_to_int(&relation.flags[j]), &engine.bit_to_int(&relation.flags[i]));
        conditional_swap(engine, relation, i, j, &cond);
    }
    merge_by_flag_range(engine, relation, low, m);
    merge_by_flag_range(engine, relation, low + m, len - m);
}
