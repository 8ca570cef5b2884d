//! Demo driver for the five-relation "Account/Trans/Disp/Order/Loan" chained
//! index-join query (spec.md §4.8.1, §6.2), grounded in
//! `original_source/exp/q8.cpp`: four index equi-joins chained end to end
//! via `rebuild_index`, the last three under `MF` compaction with
//! multiplicity bounds that compound stage over stage, followed by a count.
//!
//! `original_source/exp/q8_eps.cpp` runs this same query shape across five
//! `EPS` relation-size variants to chart how plan memory and wall time
//! scale with skew. Re-running all five on every invocation is the
//! "full bench": `--full-bench` (spec.md §6.3's `FULL_BENCH`) opts into it.
//! By default this driver takes the shortcut the source reserves for quick
//! iteration and only measures the representative `eps = 1` variant.

use clap::Parser;
use oblivrel::config::{PartyArgs, RunConfig};
use oblivrel::mem::PlanMeter;
use oblivrel::ops::index_equi_join::CompactionMode;
use oblivrel::plan::{run_chain, IndexJoinStage};
use oblivrel::random::RelationSampler;
use oblivrel::relation::bucket::Range;
use oblivrel::{Count, IndexEquiJoin, PlaintextEngine, SecureRelation};

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    party: PartyArgs,
    #[command(flatten)]
    run: RunConfig,
}

fn ranges(pairs: &[(usize, usize)]) -> Vec<Range> {
    pairs.iter().map(|&(s, e)| Range::inclusive(s, e)).collect()
}

/// One `EPS` relation-size/bucket-skeleton variant from `q8_eps.cpp`.
struct EpsConfig {
    eps: &'static str,
    sizes: (usize, usize, usize, usize, usize),
    index_a: &'static [(usize, usize)],
    index_b: &'static [(usize, usize)],
    index_c: &'static [(usize, usize)],
    index_d: &'static [(usize, usize)],
    index_e: &'static [(usize, usize)],
    mf_order: usize,
    mf_disp: usize,
    mf_trans: usize,
}

/// The five `EPS` variants `q8_eps.cpp` sweeps, smallest skew to largest.
fn eps_configs() -> Vec<EpsConfig> {
    vec![
        EpsConfig {
            eps: "0.1",
            sizes: (139, 8152, 5493, 453, 228),
            index_a: &[(0, 19), (0, 44), (0, 77), (9, 102), (9, 109), (9, 113), (9, 131), (9, 138)],
            index_b: &[
                (0, 2647),
                (2617, 5089),
                (5039, 7069),
                (7010, 7420),
                (7314, 7559),
                (7437, 7767),
                (7622, 7926),
                (7748, 8151),
            ],
            index_c: &[
                (0, 1635),
                (1629, 3279),
                (3249, 4676),
                (4611, 4903),
                (4828, 5013),
                (4930, 5195),
                (5064, 5344),
                (5196, 5492),
            ],
            index_d: &[(0, 104), (83, 233), (160, 329), (238, 370), (268, 390), (272, 437), (275, 446), (275, 452)],
            index_e: &[(0, 19), (0, 44), (6, 96), (13, 124), (30, 149), (30, 184), (42, 204), (42, 227)],
            mf_order: 4,
            mf_disp: 5,
            mf_trans: 87,
        },
        EpsConfig {
            eps: "0.2",
            sizes: (111, 8123, 5445, 398, 199),
            index_a: &[(0, 24), (0, 46), (3, 64), (16, 71), (16, 80), (16, 102), (16, 107), (16, 110)],
            index_b: &[
                (0, 2653),
                (2630, 5091),
                (5048, 7087),
                (7009, 7441),
                (7334, 7577),
                (7448, 7774),
                (7637, 7925),
                (7776, 8122),
            ],
            index_c: &[
                (0, 1633),
                (1623, 3268),
                (3230, 4655),
                (4599, 4878),
                (4807, 4991),
                (4908, 5133),
                (5042, 5274),
                (5170, 5442),
            ],
            index_d: &[(0, 102), (86, 208), (175, 299), (261, 345), (284, 358), (284, 367), (284, 380), (289, 397)],
            index_e: &[(0, 18), (12, 45), (27, 70), (35, 94), (44, 111), (45, 127), (46, 162), (59, 198)],
            mf_order: 4,
            mf_disp: 4,
            mf_trans: 77,
        },
        EpsConfig {
            eps: "0.5",
            sizes: (103, 8100, 5431, 384, 192),
            index_a: &[(0, 19), (3, 43), (10, 66), (19, 75), (19, 83), (19, 89), (19, 96), (19, 102)],
            index_b: &[
                (0, 2645),
                (2633, 5078),
                (5055, 7054),
                (7021, 7399),
                (7355, 7537),
                (7482, 7743),
                (7673, 7894),
                (7812, 8099),
            ],
            index_c: &[
                (0, 1634),
                (1625, 3267),
                (3244, 4662),
                (4624, 4888),
                (4840, 5001),
                (4942, 5151),
                (5073, 5295),
                (5203, 5430),
            ],
            index_d: &[(0, 97), (86, 204), (178, 294), (259, 336), (284, 350), (284, 365), (285, 379), (285, 383)],
            index_e: &[(0, 17), (4, 47), (22, 72), (29, 96), (44, 120), (52, 134), (57, 155), (63, 191)],
            mf_order: 4,
            mf_disp: 3,
            mf_trans: 72,
        },
        EpsConfig {
            eps: "1",
            sizes: (106, 8096, 5426, 394, 191),
            index_a: &[(0, 18), (6, 41), (16, 65), (25, 72), (25, 79), (25, 89), (25, 97), (25, 105)],
            index_b: &[
                (0, 2644),
                (2630, 5080),
                (5055, 7058),
                (7022, 7404),
                (7354, 7543),
                (7481, 7746),
                (7671, 7900),
                (7808, 8095),
            ],
            index_c: &[
                (0, 1658),
                (1643, 3332),
                (3302, 4696),
                (4651, 4904),
                (4847, 5023),
                (4951, 5146),
                (5061, 5291),
                (5193, 5425),
            ],
            index_d: &[(0, 101), (87, 208), (179, 302), (262, 341), (286, 355), (289, 369), (290, 382), (291, 393)],
            index_e: &[(0, 21), (3, 50), (20, 70), (27, 94), (37, 115), (45, 138), (52, 159), (59, 190)],
            mf_order: 2,
            mf_disp: 3,
            mf_trans: 71,
        },
        EpsConfig {
            eps: "10",
            sizes: (103, 8090, 5426, 398, 187),
            index_a: &[(0, 18), (4, 41), (13, 64), (22, 72), (22, 79), (22, 86), (22, 94), (22, 102)],
            index_b: &[
                (0, 2645),
                (2631, 5081),
                (5053, 7060),
                (7018, 7406),
                (7350, 7545),
                (7475, 7748),
                (7664, 7898),
                (7800, 8089),
            ],
            index_c: &[
                (0, 1637),
                (1623, 3271),
                (3243, 4663),
                (4621, 4890),
                (4834, 5005),
                (4935, 5148),
                (5064, 5291),
                (5193, 5425),
            ],
            index_d: &[(0, 101), (87, 207), (179, 303), (261, 343), (287, 357), (287, 372), (288, 386), (288, 397)],
            index_e: &[(0, 19), (5, 49), (21, 70), (28, 94), (38, 116), (46, 135), (51, 156), (58, 186)],
            mf_order: 2,
            mf_disp: 2,
            mf_trans: 70,
        },
    ]
}

/// Runs one `EPS` variant's chain of four index joins, recording every
/// intermediate relation into `meter`.
fn run_variant(engine: &PlaintextEngine, meter: &PlanMeter, run: &RunConfig, config: &EpsConfig, seed: u64) {
    let mut sampler = RelationSampler::new(seed);
    let (size_a, size_b, size_c, size_d, size_e) = config.sizes;

    let relation_a = SecureRelation::from_parts(vec![sampler.column(size_a, 0, 99)], sampler.flags(size_a, 1.0)).unwrap();
    let relation_b = SecureRelation::from_parts(vec![sampler.column(size_b, 0, 99)], sampler.flags(size_b, 1.0)).unwrap();
    let relation_c = SecureRelation::from_parts(vec![sampler.column(size_c, 0, 99)], sampler.flags(size_c, 1.0)).unwrap();
    let relation_d = SecureRelation::from_parts(vec![sampler.column(size_d, 0, 99)], sampler.flags(size_d, 1.0)).unwrap();
    let relation_e = SecureRelation::from_parts(vec![sampler.column(size_e, 0, 99)], sampler.flags(size_e, 1.0)).unwrap();
    for r in [&relation_a, &relation_b, &relation_c, &relation_d, &relation_e] {
        meter.record(r);
    }

    let index_a = ranges(config.index_a);
    let index_b = ranges(config.index_b);
    let index_c = ranges(config.index_c);
    let index_d = ranges(config.index_d);
    let index_e = ranges(config.index_e);
    let (mf_order, mf_disp, mf_trans) = (config.mf_order, config.mf_disp, config.mf_trans);

    let stages = vec![
        IndexJoinStage {
            join: IndexEquiJoin::new(index_a, index_e, 0, 0, CompactionMode::SmallerRel),
        },
        IndexJoinStage {
            join: IndexEquiJoin::new(vec![], index_d, 0, 0, CompactionMode::Mf { mf_left: 1, mf_right: mf_order }),
        },
        IndexJoinStage {
            join: IndexEquiJoin::new(vec![], index_c, 0, 0, CompactionMode::Mf { mf_left: mf_order, mf_right: mf_disp }),
        },
        IndexJoinStage {
            join: IndexEquiJoin::new(
                vec![],
                index_b,
                0,
                0,
                CompactionMode::Mf {
                    mf_left: mf_order * mf_disp,
                    mf_right: mf_trans,
                },
            ),
        },
    ];

    let joined = run_chain(engine, stages, relation_a, &[relation_e, relation_d, relation_c, relation_b], run)
        .expect("bucket counts agree at every chain stage");
    meter.record(&joined);

    // Max is simulated with count, per the source's own comment: the
    // demo cares about plan shape and timing, not the aggregate's value.
    let result = Count::apply(engine, &joined);
    meter.record(&result);
    log::debug!("eps={}: joined rows = {}", config.eps, joined.num_rows());
}

fn main() {
    let cli = Cli::parse();
    let mut logger = env_logger::Builder::from_default_env();
    if cli.run.debug_log {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();
    log::info!("q8 demo driver starting as party {} on port {}", cli.party.party, cli.party.port);

    let engine = PlaintextEngine;
    let meter = PlanMeter::start();
    let configs = eps_configs();

    if cli.run.full_bench {
        // FULL_BENCH: the source's q8_eps.cpp sweep, every variant measured.
        for (i, config) in configs.iter().enumerate() {
            run_variant(&engine, &meter, &cli.run, config, 0xC0FFEE + i as u64);
        }
    } else {
        // Shortcut: measure only the representative eps=1 variant, the one
        // q8.cpp hardcodes for a single quick run.
        let eps1 = configs.iter().find(|c| c.eps == "1").expect("eps=1 variant present");
        run_variant(&engine, &meter, &cli.run, eps1, 0xC0FFEE);
    }

    println!("Results:");
    println!("---------");
    println!("Memory size (query plan): {} bytes", meter.peak_bytes());
    println!("Index EquiJoin execution time: {} milliseconds", meter.elapsed_millis());
}
