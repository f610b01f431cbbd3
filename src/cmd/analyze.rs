use super::CipherSource;
use crate::reports;
use cipherforge::api;
use cipherforge::codec::digraph_frequencies;
use cipherforge::config::{Config, SearchParams};
use cipherforge::error::CfResult;
use cipherforge::report::FileReport;
use cipherforge::search::SearchOptions;
use cipherforge::snapshot::Snapshot;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub search: SearchParams,

    #[command(flatten)]
    pub source: CipherSource,

    /// Worker threads (defaults to available parallelism).
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, default_value = "matches.json")]
    pub snapshot: String,
}

pub fn run(args: AnalyzeArgs, output: &str) -> CfResult<()> {
    let stream = args.source.read()?;
    let config = Config {
        search: args.search,
        threads: args.threads,
        ..Default::default()
    };
    let options = SearchOptions::from(&config);
    api::check_input(&stream, &options)?;

    reports::print_digraph_frequencies(&digraph_frequencies(stream.as_str()));

    let mut report = FileReport::create(output)?;
    let outcome = api::analyze(&stream, options, &mut report)?;

    let snapshot = Snapshot::from_outcome(&outcome);
    snapshot.save(&args.snapshot)?;

    reports::print_candidates(&snapshot.candidates);
    reports::print_skips("Transposition search", outcome.evaluated, &outcome.skipped);
    Ok(())
}
