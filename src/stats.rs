use crate::error::CipherForgeError;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Why a single candidate was dropped without aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum SkipReason {
    #[strum(serialize = "alphabet exhausted")]
    AlphabetExhausted,
    #[strum(serialize = "insufficient data")]
    InsufficientData,
}

impl SkipReason {
    pub fn from_error(err: &CipherForgeError) -> Option<Self> {
        match err {
            CipherForgeError::AlphabetExhausted { .. } => Some(Self::AlphabetExhausted),
            CipherForgeError::InsufficientData { .. } => Some(Self::InsufficientData),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SkipStats {
    pub alphabet_exhausted: usize,
    pub insufficient_data: usize,
}

impl SkipStats {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::AlphabetExhausted => self.alphabet_exhausted += 1,
            SkipReason::InsufficientData => self.insufficient_data += 1,
        }
    }

    pub fn get(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::AlphabetExhausted => self.alphabet_exhausted,
            SkipReason::InsufficientData => self.insufficient_data,
        }
    }

    pub fn total(&self) -> usize {
        self.alphabet_exhausted + self.insufficient_data
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, usize)> + '_ {
        SkipReason::iter().map(move |r| (r, self.get(r)))
    }

    /// Counts a recoverable error, handing anything fatal back to the caller.
    pub fn absorb(&mut self, err: CipherForgeError) -> Result<(), CipherForgeError> {
        match SkipReason::from_error(&err) {
            Some(reason) => {
                self.record(reason);
                Ok(())
            }
            None => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_counts_only_recoverable_errors() {
        let mut stats = SkipStats::default();
        stats
            .absorb(CipherForgeError::AlphabetExhausted { limit: 36 })
            .unwrap();
        stats
            .absorb(CipherForgeError::InsufficientData { len: 1 })
            .unwrap();
        assert!(stats
            .absorb(CipherForgeError::InvalidInput("k".into()))
            .is_err());
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.iter().count(), 2);
        assert_eq!(SkipReason::AlphabetExhausted.to_string(), "alphabet exhausted");
    }
}
