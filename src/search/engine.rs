use super::topk::{canonical_key, TopKSet};
use crate::codec::{decompose_bytes, CipherStream};
use crate::config::Config;
use crate::error::{CfResult, CipherForgeError};
use crate::parallel::{default_threads, FanOut, DEFAULT_BATCH_SIZE};
use crate::report::ReportSink;
use crate::scorer::index_of_coincidence;
use crate::stats::SkipStats;
use crate::transposer::{reorder, split, stitch, ColumnSet, Permutation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ICS: usize = 40;

/// Past this width the K! sweep takes hours.
const WIDE_KEY_WARNING: usize = 10;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub key_length: usize,
    pub max_ics: usize,
    pub num_threads: usize,
    pub batch_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            key_length: 5,
            max_ics: DEFAULT_MAX_ICS,
            num_threads: default_threads(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            key_length: cfg.search.key_length,
            max_ics: cfg.search.max_ics,
            num_threads: cfg.threads.unwrap_or_else(default_threads),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// One scored column ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub ic_score: f64,
    pub ic_key: i64,
    pub columns: ColumnSet,
    pub transpose: Permutation,
    pub decomposed: String,
}

impl Candidate {
    pub fn stitched(&self) -> CfResult<String> {
        stitch(&self.columns)
    }

    /// Distinct symbols the fractionation decode needed.
    pub fn alphabet_size(&self) -> usize {
        self.decomposed.bytes().collect::<HashSet<u8>>().len()
    }
}

/// Reorder, stitch, decode and score a single ordering.
pub fn evaluate_permutation(columns: &ColumnSet, transpose: &Permutation) -> CfResult<Candidate> {
    let permuted = reorder(columns, transpose)?;
    let stitched = stitch(&permuted)?;
    let decomposed = decompose_bytes(stitched.as_bytes())?;
    let ic_score = index_of_coincidence(decomposed.as_bytes())?;
    Ok(Candidate {
        ic_score,
        ic_key: canonical_key(ic_score),
        columns: permuted,
        transpose: transpose.clone(),
        decomposed,
    })
}

pub struct SearchOutcome {
    /// The unpermuted split of the ciphertext.
    pub columns: ColumnSet,
    pub top: TopKSet<Candidate>,
    pub evaluated: usize,
    pub skipped: SkipStats,
}

pub struct TranspositionSearch {
    options: SearchOptions,
}

impl TranspositionSearch {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn run(&self, stream: &CipherStream, sink: &mut dyn ReportSink) -> CfResult<SearchOutcome> {
        let k = self.options.key_length;
        if self.options.max_ics == 0 {
            return Err(CipherForgeError::InvalidInput(
                "max-ics must be at least 1".to_string(),
            ));
        }
        let columns = split(stream, k)?;

        if k > WIDE_KEY_WARNING {
            warn!("⚠️  Key length {} means {}! orderings to score.", k, k);
        }
        info!("🔎 Evaluating key length {}", k);

        let fan = FanOut::new(self.options.num_threads, self.options.batch_size)?;
        debug!("   Scoring on {} threads", fan.threads());

        let mut top = TopKSet::new(self.options.max_ics);
        let mut skipped = SkipStats::default();
        let mut evaluated = 0;

        fan.run_ordered(
            Permutation::all(k),
            |perm| evaluate_permutation(&columns, perm),
            |_, result| {
                evaluated += 1;
                let candidate = match result {
                    Ok(c) => c,
                    Err(e) => return skipped.absorb(e),
                };

                if top.would_admit(candidate.ic_score) {
                    info!(
                        " > Possible unique match found (IC_Key): {:.6} [{}]",
                        candidate.ic_score, candidate.transpose
                    );
                    sink.candidate_admitted(&candidate)?;
                    top.offer(candidate.ic_score, candidate);
                }
                Ok(())
            },
        )?;

        if skipped.total() > 0 {
            warn!(
                "Skipped {} of {} orderings ({} alphabet exhausted, {} insufficient data)",
                skipped.total(),
                evaluated,
                skipped.alphabet_exhausted,
                skipped.insufficient_data
            );
        }

        Ok(SearchOutcome {
            columns,
            top,
            evaluated,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullSink;

    fn options(k: usize, max_ics: usize) -> SearchOptions {
        SearchOptions {
            key_length: k,
            max_ics,
            num_threads: 2,
            batch_size: 5,
        }
    }

    #[test]
    fn evaluates_every_ordering() {
        let stream = CipherStream::clean("ADFGVXADFGVXAADDFFGGVVXX");
        let outcome = TranspositionSearch::new(options(4, 40))
            .run(&stream, &mut NullSink)
            .unwrap();
        assert_eq!(outcome.evaluated, 24);
        assert!(outcome.top.len() <= 24);
        assert_eq!(outcome.columns.len(), 4);
    }

    #[test]
    fn rejects_oversized_key() {
        let stream = CipherStream::clean("ADFG");
        let res = TranspositionSearch::new(options(5, 40)).run(&stream, &mut NullSink);
        assert!(matches!(res, Err(CipherForgeError::InvalidInput(_))));
    }

    #[test]
    fn tiny_streams_are_skipped_not_fatal() {
        let stream = CipherStream::clean("AD");
        let outcome = TranspositionSearch::new(options(2, 40))
            .run(&stream, &mut NullSink)
            .unwrap();
        assert_eq!(outcome.evaluated, 2);
        assert_eq!(outcome.skipped.insufficient_data, 2);
        assert!(outcome.top.is_empty());
    }

    #[test]
    fn candidate_records_its_decode() {
        let cols = split(&CipherStream::clean("AAAADDDD"), 2).unwrap();
        let c = evaluate_permutation(&cols, &Permutation::new(vec![1, 0]).unwrap()).unwrap();
        assert_eq!(c.stitched().unwrap(), "DADADADA");
        assert_eq!(c.decomposed, "AAAA");
        assert_eq!(c.alphabet_size(), 1);
        assert_eq!(c.ic_key, canonical_key(26.0));
    }
}
