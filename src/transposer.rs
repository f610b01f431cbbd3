use crate::codec::CipherStream;
use crate::error::{CfResult, CipherForgeError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column ordering: position `i` of the output takes input column `self[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn new(order: Vec<usize>) -> CfResult<Self> {
        let mut seen = vec![false; order.len()];
        for &i in &order {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(CipherForgeError::InvalidPermutation(format!(
                        "index {} repeated in {:?}",
                        i, order
                    )))
                }
                None => {
                    return Err(CipherForgeError::InvalidPermutation(format!(
                        "index {} out of range for length {}",
                        i,
                        order.len()
                    )))
                }
            }
        }
        Ok(Self(order))
    }

    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Every ordering of `0..len`, lexicographic.
    pub fn all(len: usize) -> impl Iterator<Item = Permutation> {
        (0..len).permutations(len).map(Permutation)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = CipherForgeError;

    fn try_from(order: Vec<usize>) -> CfResult<Self> {
        Self::new(order)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.0
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Fixed-width column slices of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    columns: Vec<String>,
}

impl ColumnSet {
    pub fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.columns.iter().map(String::len).sum()
    }

    /// True when every column holds only `A-Z0-9`.
    pub fn is_clean(&self) -> bool {
        self.columns
            .iter()
            .all(|c| c.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()))
    }

    /// Concatenation in stored order.
    pub fn concat(&self) -> String {
        self.columns.concat()
    }
}

/// Cuts the stream into `k` contiguous chunks of `floor(len / k)` symbols.
///
/// The last column also takes the `len % k` leftover symbols so that no
/// input is dropped and exactly `k` columns exist.
pub fn split(stream: &CipherStream, k: usize) -> CfResult<ColumnSet> {
    let n = stream.len();
    if k == 0 || k > n {
        return Err(CipherForgeError::InvalidInput(format!(
            "key length {} does not fit a stream of {} symbols",
            k, n
        )));
    }

    let width = n / k;
    let text = stream.as_str();
    let columns = (0..k)
        .map(|i| {
            let start = i * width;
            let end = if i + 1 == k { n } else { start + width };
            text[start..end].to_string()
        })
        .collect();
    Ok(ColumnSet { columns })
}

pub fn reorder(columns: &ColumnSet, permutation: &Permutation) -> CfResult<ColumnSet> {
    if permutation.len() != columns.len() {
        return Err(CipherForgeError::InvalidPermutation(format!(
            "permutation of {} applied to {} columns",
            permutation.len(),
            columns.len()
        )));
    }
    // `Permutation` construction already guarantees a bijection
    let columns = permutation
        .as_slice()
        .iter()
        .map(|&i| columns.columns[i].clone())
        .collect();
    Ok(ColumnSet { columns })
}

/// Row-major read-out: one symbol per column per row, skipping columns
/// that have run out.
pub fn stitch(columns: &ColumnSet) -> CfResult<String> {
    let rows = columns.columns.iter().map(String::len).max().unwrap_or(0);
    let cols: Vec<&[u8]> = columns.columns.iter().map(|c| c.as_bytes()).collect();
    let mut out = Vec::with_capacity(columns.total_len());
    for r in 0..rows {
        for c in &cols {
            if let Some(&b) = c.get(r) {
                out.push(b);
            }
        }
    }
    String::from_utf8(out).map_err(|_| {
        CipherForgeError::InvalidInput("columns hold symbols outside A-Z0-9".to_string())
    })
}

/// Reorders then stitches in one step.
pub fn unscramble(columns: &ColumnSet, permutation: &Permutation) -> CfResult<String> {
    stitch(&reorder(columns, permutation)?)
}

/// Columnar transposition: writes `plain` row-major under `permutation.len()`
/// columns and emits the columns so that [`split`], [`reorder`] with the
/// same permutation, and [`stitch`] give `plain` back whenever the width
/// divides the length.
pub fn encipher(plain: &CipherStream, permutation: &Permutation) -> CfResult<CipherStream> {
    let k = permutation.len();
    if k == 0 || k > plain.len() {
        return Err(CipherForgeError::InvalidInput(format!(
            "key length {} does not fit a stream of {} symbols",
            k,
            plain.len()
        )));
    }

    let bytes = plain.as_bytes();
    let grid: Vec<Vec<u8>> = (0..k)
        .map(|i| bytes.iter().skip(i).step_by(k).copied().collect())
        .collect();

    // Output slot j holds grid column i where permutation[i] == j
    let mut slots: Vec<&[u8]> = vec![&[][..]; k];
    for (i, &j) in permutation.as_slice().iter().enumerate() {
        slots[j] = &grid[i];
    }
    Ok(CipherStream::clean(&String::from_utf8_lossy(&slots.concat())))
}
