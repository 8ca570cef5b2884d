//! oblivrel - oblivious relational operators for two-party secret-shared
//! queries (spec.md §1).
//!
//! Five layers, leaves first: a secure-arithmetic `Engine` trait (L0,
//! external collaborator — `PlaintextEngine` is this crate's cleartext
//! reference implementation of it), `relation::primitives` (L1, bitonic
//! sort / flag compaction / conditional swap), `relation::SecureRelation`
//! (L2), the unary and binary operators under `ops` (L3/L4), and `plan`
//! (L5, the `rebuild_index` chaining contract).

pub mod config;
pub mod error;
pub mod mem;
pub mod ops;
pub mod plan;
pub mod random;
pub mod relation;
pub mod secure;

pub use error::{Error, Result};
pub use ops::{Count, EquiJoin, Filter, IndexEquiJoin, PacFilter, Project, Target};
pub use relation::{BucketIndex, Range, SecureRelation, SortKey};
pub use secure::{CompareOp, DebugReveal, Engine, PlaintextEngine};
