use crate::reports;
use cipherforge::api;
use cipherforge::config::{Config, SolveParams};
use cipherforge::error::CfResult;
use cipherforge::optimizer::runner::SolveOptions;
use cipherforge::report::FileReport;
use cipherforge::snapshot::Snapshot;
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub solve: SolveParams,

    /// Worker threads (defaults to available parallelism).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Phase-1 snapshot written by `search` or `analyze`.
    #[arg(long, default_value = "matches.json")]
    pub snapshot: String,
}

pub fn run(args: SolveArgs, ngrams: &str, output: &str) -> CfResult<()> {
    let model = api::load_model(ngrams)?;
    let snapshot = Snapshot::load(&args.snapshot)?;
    info!(
        "📂 Loaded {} candidates (key length {}) from {}",
        snapshot.candidates.len(),
        snapshot.key_length,
        args.snapshot
    );

    let config = Config {
        solve: args.solve,
        threads: args.threads,
        ..Default::default()
    };
    let mut report = FileReport::append(output)?;
    let summary = api::solve(&snapshot, model, SolveOptions::from(&config), &mut report)?;

    reports::print_summary(None, &summary);
    Ok(())
}
