use super::{ClimbOptions, ClimbOutcome, HillClimber};
use crate::codec::decompose_bytes;
use crate::config::Config;
use crate::error::CfResult;
use crate::parallel::{default_threads, FanOut};
use crate::report::ReportSink;
use crate::scorer::QuadgramModel;
use crate::stats::SkipStats;
use crate::tracker::ResultTracker;
use crate::transposer::{unscramble, ColumnSet, Permutation};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Hypotheses are climbed a few at a time so reports stay timely.
const SOLVE_BATCH_SIZE: usize = 16;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub climb: ClimbOptions,
    pub num_threads: usize,
    pub batch_size: usize,
    pub seed: Option<u64>,
    pub max_time: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            climb: ClimbOptions::default(),
            num_threads: default_threads(),
            batch_size: SOLVE_BATCH_SIZE,
            seed: None,
            max_time: None,
        }
    }
}

impl From<&Config> for SolveOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            climb: ClimbOptions {
                rounds: cfg.solve.sub_rounds,
                stall_limit: cfg.solve.stall_limit,
            },
            num_threads: cfg.threads.unwrap_or_else(default_threads),
            batch_size: SOLVE_BATCH_SIZE,
            seed: cfg.solve.seed,
            max_time: cfg.solve.time.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisResult {
    pub transpose: Permutation,
    pub outcome: ClimbOutcome,
}

/// Unscrambles the columns under `transpose` and climbs the decoded stream.
pub fn evaluate_hypothesis(
    columns: &ColumnSet,
    transpose: &Permutation,
    model: &QuadgramModel,
    climb: ClimbOptions,
    seed: Option<u64>,
) -> CfResult<HypothesisResult> {
    let stitched = unscramble(columns, transpose)?;
    let decomposed = decompose_bytes(stitched.as_bytes())?;
    let outcome = HillClimber::new(model, climb, seed).solve(&decomposed);
    Ok(HypothesisResult {
        transpose: transpose.clone(),
        outcome,
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    pub evaluated: usize,
    pub skipped: SkipStats,
    /// Hypotheses left untouched when the time limit ran out.
    pub abandoned: usize,
}

pub struct SubstitutionSolver {
    model: Arc<QuadgramModel>,
    options: SolveOptions,
}

impl SubstitutionSolver {
    pub fn new(model: Arc<QuadgramModel>, options: SolveOptions) -> Self {
        Self { model, options }
    }

    pub fn run(
        &self,
        columns: &ColumnSet,
        hypotheses: Vec<Permutation>,
        tracker: &mut ResultTracker,
        sink: &mut dyn ReportSink,
    ) -> CfResult<SolveOutcome> {
        let opts = &self.options;
        let total = hypotheses.len();
        info!("🧗 Checking {} transposition keys...", total);

        let deadline = opts.max_time.map(|t| Instant::now() + t);
        let fan = FanOut::new(opts.num_threads, opts.batch_size)?.with_deadline(deadline);
        debug!("   Climbing on {} threads", fan.threads());

        let model: &QuadgramModel = &self.model;
        let mut outcome = SolveOutcome::default();

        let report = fan.run_ordered(
            hypotheses.into_iter().enumerate(),
            |(i, transpose)| {
                let seed = opts.seed.map(|s| s.wrapping_add(*i as u64));
                evaluate_hypothesis(columns, transpose, model, opts.climb, seed)
            },
            |_, result| {
                outcome.evaluated += 1;
                match result {
                    Ok(r) => {
                        tracker.offer(r, sink)?;
                        Ok(())
                    }
                    Err(e) => outcome.skipped.absorb(e),
                }
            },
        )?;

        outcome.abandoned = report.abandoned;
        if outcome.abandoned > 0 {
            warn!(
                "⏱️  Time limit reached: {} of {} keys not checked",
                outcome.abandoned, total
            );
        }
        if outcome.skipped.total() > 0 {
            warn!(
                "Skipped {} keys whose decode exhausted the alphabet",
                outcome.skipped.total()
            );
        }
        Ok(outcome)
    }
}
