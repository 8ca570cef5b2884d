//! The gate set (spec §3.1): equality, ordered comparison, addition,
//! conditional select, and their one-bit counterparts for flags and
//! predicate results.

use crate::error::{Error, Result};

/// A secure-arithmetic backend: the set of gates every operator in this
/// crate is written against. `Int` is a fixed-width secret integer (spec
/// default: 32 bits); `Bit` is its one-bit counterpart, used for flags and
/// predicate results (spec §3.1).
///
/// Every method here must be oblivious in a real backend: its cost and the
/// pattern of values it touches may depend only on public sizes, never on
/// the secret values involved. This trait only describes *what* gate is
/// computed, not how — that obliviousness obligation lives with whoever
/// implements `Engine` for a real two-party transport.
pub trait Engine {
    /// A fixed-width secret integer.
    type Int: Clone;
    /// A one-bit secret (flags, predicate results).
    type Bit: Clone;

    /// Lift a public constant into a secret integer (spec §3.1: "Public
    /// constants are allowed as shares with a sentinel party label").
    fn const_int(&self, value: i64) -> Self::Int;

    /// Lift a public constant into a secret bit.
    fn const_bit(&self, value: bool) -> Self::Bit;

    /// The maximum representable value for `Int`, used as the sentinel key
    /// for bitonic-sort padding (spec §4.1).
    fn max_int(&self) -> Self::Int;

    /// `a + b`.
    fn add(&self, a: &Self::Int, b: &Self::Int) -> Self::Int;

    /// `a == b`.
    fn eq(&self, a: &Self::Int, b: &Self::Int) -> Self::Bit;

    /// `a > b`.
    fn gt(&self, a: &Self::Int, b: &Self::Int) -> Self::Bit;

    /// Boolean AND.
    fn and(&self, a: &Self::Bit, b: &Self::Bit) -> Self::Bit;

    /// Boolean NOT.
    fn not(&self, a: &Self::Bit) -> Self::Bit;

    /// `if cond { a } else { b }` (spec §3.1: `mux(cond,a,b)` returns `a` if
    /// `cond` else `b`).
    fn mux_int(&self, cond: &Self::Bit, a: &Self::Int, b: &Self::Int) -> Self::Int;

    /// One-bit counterpart of [`Engine::mux_int`].
    fn mux_bit(&self, cond: &Self::Bit, a: &Self::Bit, b: &Self::Bit) -> Self::Bit;

    /// Widen a one-bit flag to a full-width integer (used by the count
    /// aggregate, spec §4.6, to sum flags).
    fn bit_to_int(&self, bit: &Self::Bit) -> Self::Int;
}

/// A debug-only capability for revealing secret values, used by
/// `SecureRelation::print` and by test assertions. A production `Engine`
/// has no obligation to implement this — it is intentionally a separate
/// trait so the operator layer can never accidentally call it outside a
/// `#[cfg(test)]` or demo-driver context.
pub trait DebugReveal: Engine {
    fn reveal_int(&self, value: &Self::Int) -> i64;
    fn reveal_bit(&self, value: &Self::Bit) -> bool;
}

/// The comparator family supported by `Filter` and `PacFilter` (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gt,
    Geq,
    Lt,
    Leq,
    Eq,
    Neq,
}

impl CompareOp {
    /// Parse the comparator names spec §4.4 uses on the wire
    /// (`gt, geq, lt, leq, eq, neq`). Unknown strings are a plan-time error
    /// (spec §7), not a panic.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "gt" => Ok(CompareOp::Gt),
            "geq" => Ok(CompareOp::Geq),
            "lt" => Ok(CompareOp::Lt),
            "leq" => Ok(CompareOp::Leq),
            "eq" => Ok(CompareOp::Eq),
            "neq" => Ok(CompareOp::Neq),
            other => Err(Error::UnknownComparator(other.to_string())),
        }
    }

    /// Evaluate `a <op> b` as a secret bit, derived from just `eq` and `gt`
    /// so a backend only has to provide those two comparison primitives.
    pub fn eval<E: Engine>(self, engine: &E, a: &E::Int, b: &E::Int) -> E::Bit {
        match self {
            CompareOp::Gt => engine.gt(a, b),
            CompareOp::Geq => {
                let lt = engine.gt(b, a);
                engine.not(&lt)
            }
            CompareOp::Lt => engine.gt(b, a),
            CompareOp::Leq => {
                let gt = engine.gt(a, b);
                engine.not(&gt)
            }
            CompareOp::Eq => engine.eq(a, b),
            CompareOp::Neq => {
                let eq = engine.eq(a, b);
                engine.not(&eq)
            }
        }
    }
}
