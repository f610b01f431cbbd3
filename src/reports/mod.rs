use cipherforge::api::SolveSummary;
use cipherforge::search::Candidate;
use cipherforge::stats::SkipStats;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// How many of the most frequent digraphs to show.
const DIGRAPH_ROWS: usize = 12;

pub fn print_digraph_frequencies(freqs: &[(String, f64)]) {
    println!("\nDigraph frequencies ({} distinct):", freqs.len());
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Digraph").add_attribute(Attribute::Bold),
        Cell::new("Share %"),
    ]);

    for (digraph, pct) in freqs.iter().rev().take(DIGRAPH_ROWS) {
        table.add_row(vec![
            Cell::new(digraph).set_alignment(CellAlignment::Center),
            Cell::new(format!("{:.2}", pct)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_candidates(candidates: &[Candidate]) {
    println!("\nRetained transposition candidates:");
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("IC").fg(Color::Cyan),
        Cell::new("Transpose"),
        Cell::new("Alphabet"),
        Cell::new("Decomposed"),
    ]);

    for (i, c) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:.6}", c.ic_score)).set_alignment(CellAlignment::Right),
            Cell::new(format!("({})", c.transpose)),
            Cell::new(c.alphabet_size()).set_alignment(CellAlignment::Right),
            Cell::new(&c.decomposed),
        ]);
    }
    println!("{}", table);
}

pub fn print_skips(phase: &str, evaluated: usize, skipped: &SkipStats) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new(phase).add_attribute(Attribute::Bold),
        Cell::new("Count"),
    ]);
    table.add_row(vec![Cell::new("evaluated"), Cell::new(evaluated)]);
    for (reason, count) in skipped.iter() {
        let cell = if count > 0 {
            Cell::new(count).fg(Color::Yellow)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(format!("skipped: {}", reason)), cell]);
    }
    println!("{}", table);
}

pub fn print_summary(search: Option<(usize, &SkipStats)>, solve: &SolveSummary) {
    println!("\n=== 🏆 FINAL RESULT ===");

    if let Some((evaluated, skipped)) = search {
        print_skips("Transposition search", evaluated, skipped);
    }
    print_skips(
        "Substitution search",
        solve.outcome.evaluated,
        &solve.outcome.skipped,
    );
    if solve.outcome.abandoned > 0 {
        println!(
            "{} of {} keys not checked (time limit).",
            solve.outcome.abandoned, solve.hypotheses
        );
    }

    match &solve.best {
        Some(best) => {
            println!("Fitness: {:.4}", best.fitness);
            println!("Transposition key: ({})", best.transpose_key);
            println!("Substitution key: {}", best.sub_key);
            println!("Plaintext:\n{}", best.plaintext);
        }
        None => println!("No solution found."),
    }
}
