use crate::error::{CfResult, CipherForgeError};
use fnv::FnvHashMap;
use std::fmt;

/// Output pool for fractionation decoding, handed out in order.
pub const SYMBOL_POOL: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// An immutable stream of `A-Z0-9` symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CipherStream {
    symbols: Vec<u8>,
}

impl CipherStream {
    /// Uppercases `text` and drops everything outside the working alphabet.
    pub fn clean(text: &str) -> Self {
        let symbols = text
            .bytes()
            .map(|b| b.to_ascii_uppercase())
            .filter(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            .collect();
        Self { symbols }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII survives `clean`
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for CipherStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digraph -> symbol mapping, assigned on first sight.
///
/// A trailing unpaired symbol is stored as `[c, 0]` so it never collides
/// with a full pair.
#[derive(Debug, Default)]
pub struct FractionationAlphabet {
    mapping: FnvHashMap<[u8; 2], u8>,
}

impl FractionationAlphabet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol_for(&mut self, digraph: [u8; 2]) -> CfResult<u8> {
        if let Some(&sym) = self.mapping.get(&digraph) {
            return Ok(sym);
        }
        let next = self.mapping.len();
        let sym = *SYMBOL_POOL
            .get(next)
            .ok_or(CipherForgeError::AlphabetExhausted {
                limit: SYMBOL_POOL.len(),
            })?;
        self.mapping.insert(digraph, sym);
        Ok(sym)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Collapses every digraph of the cleaned input into one symbol.
pub fn decompose(text: &str) -> CfResult<String> {
    decompose_bytes(CipherStream::clean(text).as_bytes())
}

/// Same as [`decompose`] for input already restricted to `A-Z0-9`.
pub fn decompose_bytes(symbols: &[u8]) -> CfResult<String> {
    let mut alphabet = FractionationAlphabet::new();
    let mut out = String::with_capacity(symbols.len().div_ceil(2));
    for pair in symbols.chunks(2) {
        let digraph = [pair[0], pair.get(1).copied().unwrap_or(0)];
        out.push(alphabet.symbol_for(digraph)? as char);
    }
    Ok(out)
}

/// Percentage share of each digraph relative to the cleaned length,
/// least frequent first.
pub fn digraph_frequencies(text: &str) -> Vec<(String, f64)> {
    let cleaned = CipherStream::clean(text);
    let total = cleaned.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: FnvHashMap<&[u8], usize> = FnvHashMap::default();
    for pair in cleaned.as_bytes().chunks(2) {
        *counts.entry(pair).or_insert(0) += 1;
    }

    let mut freqs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(d, c)| (String::from_utf8_lossy(d).into_owned(), c))
        .collect();
    freqs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    freqs
        .into_iter()
        .map(|(d, c)| (d, c as f64 / total as f64 * 100.0))
        .collect()
}
