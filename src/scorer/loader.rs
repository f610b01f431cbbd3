use super::quadgram::{QuadgramModel, QuadgramValues};
use crate::error::{CfResult, CipherForgeError};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parsed rows of a quadgram table before normalisation.
pub struct RawQuadgrams {
    pub entries: Vec<(String, f64)>,
    pub skipped: usize,
}

impl RawQuadgrams {
    /// Tables made only of non-positive values are log probabilities.
    pub fn detect_values(&self) -> QuadgramValues {
        if self.entries.iter().all(|(_, v)| *v <= 0.0) {
            QuadgramValues::LogProbabilities
        } else {
            QuadgramValues::Counts
        }
    }
}

/// Loads a `WINDOW VALUE` per-line table (space or tab separated).
pub fn load_quadgrams<P: AsRef<Path>>(path: P) -> CfResult<QuadgramModel> {
    let path = path.as_ref();
    info!("📚 Loading quadgrams from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        CipherForgeError::ModelLoadFailure(format!("could not read '{}': {}", path.display(), e))
    })?;

    build_model(parse_quadgrams(content.as_bytes())?)
}

pub fn load_quadgrams_from_reader<R: Read>(mut reader: R) -> CfResult<QuadgramModel> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .map_err(|e| CipherForgeError::ModelLoadFailure(e.to_string()))?;
    build_model(parse_quadgrams(&content)?)
}

fn build_model(raw: RawQuadgrams) -> CfResult<QuadgramModel> {
    if raw.skipped > 0 {
        warn!("   ⚠️  Skipped {} unusable rows in quadgram table.", raw.skipped);
    }
    let values = raw.detect_values();
    let model = QuadgramModel::from_entries(&raw.entries, values)?;
    debug!(
        "   -> Loaded {} quadgrams ({:?}), floor {:.3}",
        model.entries(),
        values,
        model.floor()
    );
    Ok(model)
}

pub fn parse_quadgrams(content: &[u8]) -> CfResult<RawQuadgrams> {
    let delimiter = if content.contains(&b'\t') { b'\t' } else { b' ' };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut entries = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("   ⚠️  Quadgram row error: {}", e);
                skipped += 1;
                continue;
            }
        };

        let mut fields = rec.iter().filter(|f| !f.is_empty());
        let (window, value) = match (fields.next(), fields.next()) {
            (Some(w), Some(v)) => (w, v),
            (None, _) => continue,
            _ => {
                skipped += 1;
                continue;
            }
        };

        if window.len() != 4 || !window.bytes().all(|b| b.is_ascii_alphabetic()) {
            skipped += 1;
            continue;
        }

        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => entries.push((window.to_ascii_uppercase(), v)),
            _ => skipped += 1,
        }
    }

    if entries.is_empty() {
        return Err(CipherForgeError::ModelLoadFailure(
            "no usable quadgram rows".to_string(),
        ));
    }

    Ok(RawQuadgrams { entries, skipped })
}
