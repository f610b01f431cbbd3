use crate::error::CfResult;
use crate::optimizer::runner::HypothesisResult;
use crate::optimizer::substitution::SubstitutionKey;
use crate::report::ReportSink;
use crate::transposer::Permutation;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct BestResult {
    pub fitness: f64,
    pub transpose_key: Permutation,
    pub sub_key: SubstitutionKey,
    pub plaintext: String,
}

/// Single owner of the best solution seen so far.
///
/// Starts empty (worst possible fitness) and only ever moves to a strictly
/// fitter result.
#[derive(Debug, Default)]
pub struct ResultTracker {
    best: Option<BestResult>,
    improvements: usize,
}

impl ResultTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> Option<&BestResult> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<BestResult> {
        self.best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best
            .as_ref()
            .map(|b| b.fitness)
            .unwrap_or(f64::NEG_INFINITY)
    }

    pub fn improvements(&self) -> usize {
        self.improvements
    }

    /// Replaces the best result if `result` is strictly fitter and reports it.
    pub fn offer(&mut self, result: HypothesisResult, sink: &mut dyn ReportSink) -> CfResult<bool> {
        let fitness = result.outcome.fitness;
        if fitness.is_nan() || fitness <= self.best_fitness() {
            return Ok(false);
        }

        let best = BestResult {
            fitness: result.outcome.fitness,
            transpose_key: result.transpose,
            sub_key: result.outcome.key,
            plaintext: result.outcome.plaintext,
        };

        info!("Better solution found (fitness score {:.4}):", best.fitness);
        info!("   Transposition key: ({})", best.transpose_key);
        info!("   Substitution key: {}", best.sub_key);
        info!("   Plaintext: {}", best.plaintext);

        sink.improvement(&best)?;
        self.best = Some(best);
        self.improvements += 1;
        Ok(true)
    }
}
