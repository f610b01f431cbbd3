use crate::codec::CipherStream;
use crate::error::{CfResult, CipherForgeError};
use crate::optimizer::runner::{SolveOptions, SolveOutcome, SubstitutionSolver};
use crate::report::ReportSink;
use crate::scorer::{loader, QuadgramModel};
use crate::search::{generate_hypotheses, SearchOptions, SearchOutcome, TranspositionSearch};
use crate::snapshot::Snapshot;
use crate::tracker::{BestResult, ResultTracker};
use crate::transposer::split;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads the quadgram table once for sharing across Phase-2 workers.
pub fn load_model<P: AsRef<Path>>(path: P) -> CfResult<Arc<QuadgramModel>> {
    Ok(Arc::new(loader::load_quadgrams(path)?))
}

/// Rejects input Phase 1 cannot run on, before anything is written.
pub fn check_input(stream: &CipherStream, options: &SearchOptions) -> CfResult<()> {
    if stream.is_empty() {
        return Err(CipherForgeError::InvalidInput(
            "ciphertext is empty after filtering".to_string(),
        ));
    }
    if options.max_ics == 0 {
        return Err(CipherForgeError::InvalidInput(
            "max-ics must be at least 1".to_string(),
        ));
    }
    split(stream, options.key_length).map(|_| ())
}

/// Phase 1: rank column orderings by IC.
pub fn analyze(
    stream: &CipherStream,
    options: SearchOptions,
    sink: &mut dyn ReportSink,
) -> CfResult<SearchOutcome> {
    check_input(stream, &options)?;
    info!("Ciphertext is {} characters in length.", stream.len());

    let outcome = TranspositionSearch::new(options).run(stream, sink)?;
    info!(
        "Identified {} unique IC keys from {} orderings.",
        outcome.top.len(),
        outcome.evaluated
    );
    Ok(outcome)
}

pub struct SolveSummary {
    pub hypotheses: usize,
    pub outcome: SolveOutcome,
    pub best: Option<BestResult>,
}

/// Phase 2: rebuild key hypotheses from a snapshot and climb each one.
pub fn solve(
    snapshot: &Snapshot,
    model: Arc<QuadgramModel>,
    options: SolveOptions,
    sink: &mut dyn ReportSink,
) -> CfResult<SolveSummary> {
    let hypotheses = generate_hypotheses(&snapshot.to_top_k());
    let count = hypotheses.len();
    info!(
        "Only {} potential {}-character transposition keys.",
        count, snapshot.key_length
    );

    let mut tracker = ResultTracker::new();
    let outcome =
        SubstitutionSolver::new(model, options).run(&snapshot.columns, hypotheses, &mut tracker, sink)?;

    Ok(SolveSummary {
        hypotheses: count,
        outcome,
        best: tracker.into_best(),
    })
}

pub struct CrackSummary {
    pub search: SearchOutcome,
    pub snapshot: Snapshot,
    pub solve: SolveSummary,
}

/// Both phases back to back. The model is loaded by the caller before any
/// work starts so a bad table fails fast.
pub fn crack(
    stream: &CipherStream,
    model: Arc<QuadgramModel>,
    search: SearchOptions,
    solve_opts: SolveOptions,
    snapshot_path: Option<&Path>,
    sink: &mut dyn ReportSink,
) -> CfResult<CrackSummary> {
    let outcome = analyze(stream, search, sink)?;
    let snapshot = Snapshot::from_outcome(&outcome);
    if let Some(path) = snapshot_path {
        snapshot.save(path)?;
    }
    let summary = solve(&snapshot, model, solve_opts, sink)?;
    Ok(CrackSummary {
        search: outcome,
        snapshot,
        solve: summary,
    })
}
