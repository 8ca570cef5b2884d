//! The L0 boundary: secret scalars, secret bits, and the gate set every
//! relational operator is written against.
//!
//! Per spec §1 the actual garbled-circuit / secret-sharing runtime that
//! realizes these gates is an external collaborator, out of scope for this
//! crate. What *is* in scope is the trait boundary the rest of the library
//! programs against, plus one reference implementation,
//! [`plaintext::PlaintextEngine`], used by the test suite and the demo
//! drivers.

pub mod engine;
pub mod plaintext;

pub use engine::{CompareOp, DebugReveal, Engine};
pub use plaintext::PlaintextEngine;
