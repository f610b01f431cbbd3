use crate::error::{CfResult, CipherForgeError};
use crate::search::{Candidate, SearchOutcome, TopKSet};
use crate::transposer::ColumnSet;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Everything Phase 2 needs, so it can run again without redoing Phase 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub key_length: usize,
    pub max_ics: usize,
    /// Split of the ciphertext before any reordering.
    pub columns: ColumnSet,
    /// Best IC first.
    pub candidates: Vec<Candidate>,
}

impl Snapshot {
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            key_length: outcome.columns.len(),
            max_ics: outcome.top.capacity(),
            columns: outcome.columns.clone(),
            candidates: outcome
                .top
                .sorted_desc()
                .into_iter()
                .map(|(_, c)| c.clone())
                .collect(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> CfResult<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!(
            "💾 Saved {} candidates to {}",
            self.candidates.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> CfResult<()> {
        if self.columns.len() != self.key_length {
            return Err(CipherForgeError::InvalidInput(format!(
                "snapshot has {} columns for key length {}",
                self.columns.len(),
                self.key_length
            )));
        }
        if !self.columns.is_clean() || self.candidates.iter().any(|c| !c.columns.is_clean()) {
            return Err(CipherForgeError::InvalidInput(
                "snapshot columns hold symbols outside A-Z0-9".to_string(),
            ));
        }
        if let Some(bad) = self
            .candidates
            .iter()
            .find(|c| c.transpose.len() != self.key_length)
        {
            return Err(CipherForgeError::InvalidPermutation(format!(
                "snapshot candidate ({}) does not match key length {}",
                bad.transpose, self.key_length
            )));
        }
        Ok(())
    }

    /// Rebuilds the bounded set the snapshot was taken from.
    pub fn to_top_k(&self) -> TopKSet<Candidate> {
        let mut top = TopKSet::new(self.max_ics.max(self.candidates.len()));
        for c in &self.candidates {
            top.offer(c.ic_score, c.clone());
        }
        top
    }
}
