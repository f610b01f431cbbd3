pub mod analyze;
pub mod search;
pub mod solve;

use clap::Args;
use cipherforge::codec::CipherStream;
use cipherforge::config::SAMPLE_CIPHERTEXT;
use cipherforge::error::CfResult;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct CipherSource {
    /// Ciphertext given inline.
    #[arg(short = 'c', long, conflicts_with = "input")]
    pub ciphertext: Option<String>,

    /// Read ciphertext from a file.
    #[arg(short = 'i', long)]
    pub input: Option<String>,
}

impl CipherSource {
    pub fn read(&self) -> CfResult<CipherStream> {
        let raw = match (&self.ciphertext, &self.input) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => {
                info!("📂 Reading ciphertext from: {}", path);
                fs::read_to_string(path)?
            }
            (None, None) => {
                info!("No ciphertext given, using the built-in sample.");
                SAMPLE_CIPHERTEXT.to_string()
            }
        };
        Ok(CipherStream::clean(&raw))
    }
}
