use crate::error::CfResult;
use crate::search::Candidate;
use crate::tracker::BestResult;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Receives progress as the two phases run.
pub trait ReportSink {
    fn candidate_admitted(&mut self, candidate: &Candidate) -> CfResult<()>;
    fn improvement(&mut self, best: &BestResult) -> CfResult<()>;
}

/// Discards everything.
pub struct NullSink;

impl ReportSink for NullSink {
    fn candidate_admitted(&mut self, _candidate: &Candidate) -> CfResult<()> {
        Ok(())
    }

    fn improvement(&mut self, _best: &BestResult) -> CfResult<()> {
        Ok(())
    }
}

/// Append-only text report, flushed after every block.
pub struct FileReport {
    writer: BufWriter<File>,
}

impl FileReport {
    /// Truncates `path` and starts a fresh report.
    pub fn create<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Continues an existing report (e.g. a Phase-2 rerun).
    pub fn append<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ReportSink for FileReport {
    fn candidate_admitted(&mut self, candidate: &Candidate) -> CfResult<()> {
        writeln!(self.writer, "Possible match (IC: {}):", candidate.ic_score)?;
        writeln!(self.writer, "Transpose key: ({})", candidate.transpose)?;
        let stitched = candidate.stitched()?;
        writeln!(self.writer, "{}", stitched)?;
        writeln!(
            self.writer,
            "Decomposed [{}-char alphabet]:",
            candidate.alphabet_size()
        )?;
        writeln!(self.writer, "{}\n", candidate.decomposed)?;
        self.writer.flush()?;
        Ok(())
    }

    fn improvement(&mut self, best: &BestResult) -> CfResult<()> {
        writeln!(
            self.writer,
            "Better solution found (fitness score {}):",
            best.fitness
        )?;
        writeln!(self.writer, "   Transposition key: ({})", best.transpose_key)?;
        writeln!(self.writer, "   Substitution key: {}", best.sub_key)?;
        writeln!(self.writer, "   Plaintext: \n{}\n", best.plaintext)?;
        self.writer.flush()?;
        Ok(())
    }
}
