use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Thread Pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Fractionation alphabet exhausted: more than {limit} distinct digraphs")]
    AlphabetExhausted { limit: usize },

    #[error("Insufficient data: need more than 1 symbol, got {len}")]
    InsufficientData { len: usize },

    #[error("Invalid Permutation: {0}")]
    InvalidPermutation(String),

    #[error("Quadgram model failed to load: {0}")]
    ModelLoadFailure(String),
}

impl CipherForgeError {
    /// Per-candidate failures are skipped and counted; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlphabetExhausted { .. } | Self::InsufficientData { .. }
        )
    }
}

pub type CfResult<T> = Result<T, CipherForgeError>;
