use super::CipherSource;
use crate::reports;
use cipherforge::api;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::optimizer::runner::SolveOptions;
use cipherforge::report::FileReport;
use cipherforge::search::SearchOptions;
use clap::Args;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[command(flatten)]
    pub source: CipherSource,

    /// Where the Phase-1 candidates are saved.
    #[arg(long, default_value = "matches.json")]
    pub snapshot: String,
}

pub fn run(args: SearchArgs, ngrams: &str, output: &str) -> CfResult<()> {
    // Load before any work so a bad table aborts with no partial output
    let model = api::load_model(ngrams)?;
    let stream = args.source.read()?;
    info!("{}", stream);

    let search = SearchOptions::from(&args.config);
    api::check_input(&stream, &search)?;

    let mut report = FileReport::create(output)?;
    let summary = api::crack(
        &stream,
        model,
        search,
        SolveOptions::from(&args.config),
        Some(Path::new(&args.snapshot)),
        &mut report,
    )?;

    reports::print_candidates(&summary.snapshot.candidates);
    reports::print_summary(
        Some((summary.search.evaluated, &summary.search.skipped)),
        &summary.solve,
    );
    Ok(())
}
