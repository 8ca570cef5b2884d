//! The operator algebra (spec §4.3–§4.8): projection, selection, aggregation,
//! and the two join operators. Each operator here corresponds to the
//! source's `UnaryOperator`/`BinaryOperator` subclasses (`_op_unary.hpp`,
//! `_op_binary.hpp`), collapsed from a virtual-method hierarchy into plain
//! functions — there is no vtable and no dynamic dispatch need, since every
//! operator instance is a short-lived plan node (spec §9).

pub mod count;
pub mod equi_join;
pub mod filter;
pub mod index_equi_join;
pub mod pac_filter;
pub mod project;

pub use count::Count;
pub use equi_join::EquiJoin;
pub use filter::Filter;
pub use index_equi_join::{CompactionMode, IndexEquiJoin};
pub use pac_filter::PacFilter;
pub use project::Project;

use crate::secure::Engine;

/// The comparison target for `Filter`/`PacFilter` (spec §4.4): either a
/// single secret constant broadcast to every row, or a secret column of the
/// same length as the input relation.
pub enum Target<E: Engine> {
    Const(E::Int),
    Column(Vec<E::Int>),
}

impl<E: Engine> Target<E> {
    /// The per-row comparison value, broadcasting a constant or indexing a
    /// column target (spec §4.4: `target_r`).
    fn at(&self, row: usize) -> &E::Int {
        match self {
            Target::Const(value) => value,
            Target::Column(values) => &values[row],
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Target::Const(_) => None,
            Target::Column(values) => Some(values.len()),
        }
    }
}
