use crate::error::{CfResult, CipherForgeError};

pub const QUADGRAM_SPACE: usize = 26 * 26 * 26 * 26;

/// How the values in a quadgram table should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadgramValues {
    Counts,
    LogProbabilities,
}

/// Dense log10 probability table over all 26^4 windows.
#[derive(Debug, Clone)]
pub struct QuadgramModel {
    log_probs: Vec<f64>,
    floor: f64,
    entries: usize,
}

#[inline(always)]
fn window_index(w: &[u8]) -> usize {
    ((w[0] as usize * 26 + w[1] as usize) * 26 + w[2] as usize) * 26 + w[3] as usize
}

fn letter_indices(window: &str) -> Option<[u8; 4]> {
    let bytes = window.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    let mut out = [0u8; 4];
    for (slot, &b) in out.iter_mut().zip(bytes) {
        let up = b.to_ascii_uppercase();
        if !up.is_ascii_uppercase() {
            return None;
        }
        *slot = up - b'A';
    }
    Some(out)
}

impl QuadgramModel {
    /// Builds the table from raw `(window, value)` rows.
    ///
    /// Counts become `log10(count / total)` with a floor of
    /// `log10(0.01 / total)`. Log probabilities are taken as-is and the
    /// floor sits two decades under the rarest entry.
    pub fn from_entries(entries: &[(String, f64)], values: QuadgramValues) -> CfResult<Self> {
        let mut parsed = Vec::with_capacity(entries.len());
        for (window, value) in entries {
            let idx = letter_indices(window).ok_or_else(|| {
                CipherForgeError::ModelLoadFailure(format!("'{}' is not a 4-letter window", window))
            })?;
            if !value.is_finite() {
                return Err(CipherForgeError::ModelLoadFailure(format!(
                    "non-finite value for '{}'",
                    window
                )));
            }
            parsed.push((window_index(&idx), *value));
        }

        if parsed.is_empty() {
            return Err(CipherForgeError::ModelLoadFailure(
                "table contains no quadgrams".to_string(),
            ));
        }

        match values {
            QuadgramValues::Counts => {
                let mut counts = vec![0.0f64; QUADGRAM_SPACE];
                for &(idx, c) in &parsed {
                    counts[idx] += c;
                }
                let total: f64 = counts.iter().sum();
                if total <= 0.0 {
                    return Err(CipherForgeError::ModelLoadFailure(
                        "quadgram counts sum to zero".to_string(),
                    ));
                }
                let floor = (0.01 / total).log10();
                let log_probs = counts
                    .iter()
                    .map(|&c| if c > 0.0 { (c / total).log10() } else { floor })
                    .collect();
                Ok(Self {
                    log_probs,
                    floor,
                    entries: parsed.len(),
                })
            }
            QuadgramValues::LogProbabilities => {
                let min = parsed
                    .iter()
                    .map(|&(_, v)| v)
                    .fold(f64::INFINITY, f64::min);
                let floor = min - 2.0;
                let mut log_probs = vec![floor; QUADGRAM_SPACE];
                for &(idx, v) in &parsed {
                    log_probs[idx] = v;
                }
                Ok(Self {
                    log_probs,
                    floor,
                    entries: parsed.len(),
                })
            }
        }
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Number of table rows the model was built from.
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn log_prob(&self, window: &str) -> f64 {
        match letter_indices(window) {
            Some(idx) => self.log_probs[window_index(&idx)],
            None => self.floor,
        }
    }

    /// Hot path: scores letters already mapped to `0..26`.
    #[inline]
    pub fn score_indices(&self, letters: &[u8]) -> f64 {
        letters
            .windows(4)
            .map(|w| self.log_probs[window_index(w)])
            .sum()
    }
}

/// Sum of quadgram log probabilities over the cleaned, uppercased text.
pub fn language_fitness(plaintext: &str, model: &QuadgramModel) -> f64 {
    let letters: Vec<u8> = plaintext
        .bytes()
        .map(|b| b.to_ascii_uppercase())
        .filter(u8::is_ascii_uppercase)
        .map(|b| b - b'A')
        .collect();
    model.score_indices(&letters)
}
