//! The secure-shared relation (spec §3.2) and the operations over it that
//! every operator builds on (spec §4.2).

pub mod bucket;
pub mod primitives;

pub use bucket::{check_bucket_counts, pack_contiguous, BucketIndex, Range};
pub use primitives::SortKey;

use crate::error::{Error, Result};
use crate::secure::{DebugReveal, Engine};

/// A table of `C` secret columns and `N` rows, with a per-row secret
/// validity flag (spec §3.2). `flags[r] == 1` means row `r` is live;
/// `flags[r] == 0` marks a padding/tombstone row whose column values are
/// unspecified and must not be trusted by consumers.
///
/// Invariant maintained by every constructor and every method in this
/// module: `columns[c].len() == flags.len()` for every `c`, and that
/// length (`N`) together with `columns.len()` (`C`) are public.
#[derive(Debug, Clone)]
pub struct SecureRelation<E: Engine> {
    pub columns: Vec<Vec<E::Int>>,
    pub flags: Vec<E::Bit>,
}

impl<E: Engine> SecureRelation<E> {
    /// A zero-filled relation with every row marked live (spec §3.2
    /// lifecycle: "produced by constructors (zero-filled cells, all flags
    /// set to live)").
    pub fn new(engine: &E, num_cols: usize, num_rows: usize) -> Self {
        let columns = (0..num_cols)
            .map(|_| vec![engine.const_int(0); num_rows])
            .collect();
        let flags = vec![engine.const_bit(true); num_rows];
        Self { columns, flags }
    }

    /// Build a relation directly from column data and flags, validating
    /// the equal-length invariant.
    pub fn from_parts(columns: Vec<Vec<E::Int>>, flags: Vec<E::Bit>) -> Result<Self> {
        let n = flags.len();
        for (idx, column) in columns.iter().enumerate() {
            if column.len() != n {
                return Err(Error::LengthMismatch {
                    left_label: "flags",
                    left: n,
                    right_label: "column",
                    right: column.len(),
                })
                .map_err(|e| {
                    log::debug!("column {idx} failed the equal-length invariant");
                    e
                });
            }
        }
        Ok(Self { columns, flags })
    }

    pub fn num_rows(&self) -> usize {
        self.flags.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn check_column(&self, index: usize) -> Result<()> {
        if index >= self.num_cols() {
            return Err(Error::InvalidColumn {
                index,
                num_cols: self.num_cols(),
            });
        }
        Ok(())
    }

    /// Truncate every column and the flag vector to `len` rows. A no-op if
    /// `len >= num_rows()`.
    pub fn truncate(&mut self, len: usize) {
        for column in self.columns.iter_mut() {
            column.truncate(len);
        }
        self.flags.truncate(len);
    }

    /// Stable oblivious sort by column `i`, carrying every column and the
    /// flag along (spec §4.2).
    pub fn sort_by_column(&mut self, engine: &E, column: usize) -> Result<()> {
        self.check_column(column)?;
        primitives::bitonic_sort(engine, self, SortKey::Column(column), true);
        Ok(())
    }

    /// Sort by flag descending: live rows first (spec §4.2).
    pub fn sort_by_flag(&mut self, engine: &E) {
        primitives::bitonic_sort(engine, self, SortKey::Flag, false);
    }

    /// The Goldreich-style alternative to `sort_by_flag`: groups live rows
    /// before dead rows without preserving relative order, at the
    /// `O(N log N)`-gate cost of a compaction network rather than a full
    /// sort (spec §4.1). Implemented obliviously — see
    /// `relation::primitives` for why this does not reproduce the leaky
    /// two-cursor merge from `original_source/core/relation.hpp`.
    pub fn sort_by_flag_goldreich(&mut self, engine: &E) {
        primitives::compact_by_flag(engine, self);
    }

    /// Sort by `secondary` then by `primary`, so the final order is
    /// primary-major with ties broken by `secondary` (spec §4.2).
    pub fn sort_by_two_columns(&mut self, engine: &E, primary: usize, secondary: usize) -> Result<()> {
        self.check_column(primary)?;
        self.check_column(secondary)?;
        self.sort_by_column(engine, secondary)?;
        self.sort_by_column(engine, primary)?;
        Ok(())
    }

    /// Sort by flag descending, then truncate to `k` rows (spec §4.1). If
    /// `k >= N` the relation is unchanged. Live rows beyond `k` are
    /// silently dropped — this is a documented, by-design leak of at most
    /// "more than `k` rows were live", bounded by the planner's choice of
    /// `k` under its differential-privacy budget (spec §4.1, §7); it is
    /// never surfaced as an `Error`.
    pub fn compact(&mut self, engine: &E, k: usize) {
        if k >= self.num_rows() {
            return;
        }
        self.sort_by_flag(engine);
        self.truncate(k);
    }

    /// Plan-memory footprint of this relation in bytes: every cell of
    /// every column plus every flag, at their in-memory representation
    /// size. Used by `mem::PlanMeter` to report the CLI's "memory total
    /// across plan nodes" (spec §6.2).
    pub fn memory_bytes(&self) -> usize {
        let cell_bytes = std::mem::size_of::<E::Int>();
        let flag_bytes = std::mem::size_of::<E::Bit>();
        self.columns.iter().map(|c| c.len() * cell_bytes).sum::<usize>()
            + self.num_rows() * flag_bytes
    }
}

impl<E: DebugReveal> SecureRelation<E> {
    /// Debug reveal: prints every cell and flag in cleartext. Non-oblivious
    /// and test-only (spec §4.2) — only reachable through engines that
    /// implement `DebugReveal`, which a production backend need not.
    pub fn print(&self, engine: &E, label: &str) {
        println!("{label}");
        for row in 0..self.num_rows() {
            for column in &self.columns {
                print!("{}\t", engine.reveal_int(&column[row]));
            }
            println!("| flag: {}", engine.reveal_bit(&self.flags[row]) as i32);
        }
        println!();
    }

    /// The revealed `(row, flag)` view used by property tests (spec §8's
    /// "R" notation).
    pub fn reveal_rows(&self, engine: &E) -> Vec<(Vec<i64>, bool)> {
        (0..self.num_rows())
            .map(|row| {
                let cells = self
                    .columns
                    .iter()
                    .map(|c| engine.reveal_int(&c[row]))
                    .collect();
                (cells, engine.reveal_bit(&self.flags[row]))
            })
            .collect()
    }

    /// The multiset of revealed live rows (spec §8's `live(R)`).
    pub fn reveal_live_rows(&self, engine: &E) -> Vec<Vec<i64>> {
        self.reveal_rows(engine)
            .into_iter()
            .filter(|(_, flag)| *flag)
            .map(|(cells, _)| cells)
            .collect()
    }
}
