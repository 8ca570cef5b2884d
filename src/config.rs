//! Runtime configuration (spec.md §6.3's compile-time feature flags,
//! promoted to ordinary fields built from CLI arguments via `clap`).
//!
//! The source toggles `MULTI_THREAD`, `EFFICIENT_MODE`, `DEBUG_LOG`, and
//! `FULL_BENCH` with `#ifdef`s chosen at build time, one binary per
//! variant. Those are per-run experiment knobs, not platform-conditional
//! compilation, so this crate exposes them as `RunConfig` fields a single
//! binary can flip via its own flags instead of requiring a rebuild.

use clap::Args;

/// Runtime equivalents of spec.md §6.3's feature flags.
#[derive(Debug, Clone, Args)]
pub struct RunConfig {
    /// Process `IndexEquiJoin` buckets across threads (`MULTI_THREAD`).
    #[arg(long)]
    pub multi_thread: bool,

    /// Release each bucket's intermediate relations as soon as they are
    /// folded into the running concatenation (`EFFICIENT_MODE`), rather
    /// than keeping every bucket result materialized for the run. Defaults
    /// to on (spec §5's "Q8 efficient mode" is the default, the
    /// materialized path is offered only for debugging) — pass
    /// `--efficient-mode false` to switch to the materialized path.
    #[arg(long, default_value_t = true)]
    pub efficient_mode: bool,

    /// Log each `rebuild_index` range via `log::debug!` as it is computed
    /// (`DEBUG_LOG`).
    #[arg(long)]
    pub debug_log: bool,

    /// Disable the cached-measurement shortcut in the chained-join demo
    /// driver, forcing every run to recompute from scratch (`FULL_BENCH`).
    #[arg(long)]
    pub full_bench: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            multi_thread: false,
            efficient_mode: true,
            debug_log: false,
            full_bench: false,
        }
    }
}

/// Shared connection arguments every demo binary under `src/bin/` takes
/// (spec.md §6.2): which party this process plays, and the port to listen
/// on or dial for the secure-channel transport.
#[derive(Debug, Clone, Args)]
pub struct PartyArgs {
    /// 1 = Alice (listener), 2 = Bob (dialer).
    #[arg(long)]
    pub party: u8,

    /// TCP port of the two-party channel.
    #[arg(long, default_value_t = 12345)]
    pub port: u16,
}
