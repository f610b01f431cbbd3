use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        global = true,
        short,
        long,
        default_value = "data/english_quadgrams.txt"
    )]
    ngrams: String,

    /// Append-only progress report.
    #[arg(global = true, short, long, default_value = "output.txt")]
    output: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the transposition search and the substitution search.
    Search(cmd::search::SearchArgs),
    /// Transposition search only; writes the snapshot.
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Substitution search against a saved snapshot.
    Solve(cmd::solve::SolveArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    info!("🚀 Initializing CipherForge...");

    let result = match cli.command {
        Commands::Search(args) => cmd::search::run(args, &cli.ngrams, &cli.output),
        Commands::Analyze(args) => cmd::analyze::run(args, &cli.output),
        Commands::Solve(args) => cmd::solve::run(args, &cli.ngrams, &cli.output),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
