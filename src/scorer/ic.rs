use crate::error::{CfResult, CipherForgeError};

/// Normalisation factor: a uniform distribution over 26 symbols scores ~1.0.
pub const IC_NORMALIZER: f64 = 26.0;

/// Index of coincidence over raw byte symbols.
///
/// `26 * sum(n_i * (n_i - 1)) / (N * (N - 1))`
pub fn index_of_coincidence(symbols: &[u8]) -> CfResult<f64> {
    let n = symbols.len();
    if n <= 1 {
        return Err(CipherForgeError::InsufficientData { len: n });
    }

    let mut counts = [0u64; 256];
    for &s in symbols {
        counts[s as usize] += 1;
    }

    let coincidences: u64 = counts.iter().map(|&c| c * c.saturating_sub(1)).sum();
    let n = n as f64;
    Ok(IC_NORMALIZER * coincidences as f64 / (n * (n - 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_tiny_streams() {
        assert!(matches!(
            index_of_coincidence(b"A"),
            Err(CipherForgeError::InsufficientData { len: 1 })
        ));
        assert!(index_of_coincidence(b"").is_err());
    }

    #[test]
    fn single_symbol_stream_is_maximal() {
        let ic = index_of_coincidence(b"AAAA").unwrap();
        assert!((ic - 26.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_stream_approaches_one() {
        let text: Vec<u8> = (0..2000).flat_map(|_| b'A'..=b'Z').collect();
        let ic = index_of_coincidence(&text).unwrap();
        assert!((ic - 1.0).abs() < 1e-3, "ic = {}", ic);
    }
}
