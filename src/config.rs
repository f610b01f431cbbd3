use crate::optimizer::{DEFAULT_STALL_LIMIT, DEFAULT_SUB_ROUNDS};
use crate::search::engine::DEFAULT_MAX_ICS;
use clap::Args;

/// The intercepted message the tool was first written against; used when no
/// ciphertext is supplied.
pub const SAMPLE_CIPHERTEXT: &str = "DGDAF FAFDA DGDVG AFAFV ADGVF DAGDF GDADA AVAAV GAGDD \
AGGAA AFAGG ADDFG VFGAA FDGAF GAFFF VDAGX DAGAF VVDAA DGDVD GFAFA ADFGF AADFF VAGVG VFAVV \
AVGVG ADFFG FVDAA VAVAG AFADA XFDAA FXGAA GXAVV DVAGD XADAV FGAAF GAGGD GGAGF AFDAG DAGVA \
FVGXX";

#[derive(Args, Debug, Clone, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub solve: SolveParams,

    /// Worker threads (defaults to available parallelism).
    #[arg(long)]
    pub threads: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    #[arg(short = 'k', long, default_value_t = 5)]
    pub key_length: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_ICS)]
    pub max_ics: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            key_length: 5,
            max_ics: DEFAULT_MAX_ICS,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SolveParams {
    #[arg(long, default_value_t = DEFAULT_SUB_ROUNDS)]
    pub sub_rounds: usize,
    #[arg(long, default_value_t = DEFAULT_STALL_LIMIT)]
    pub stall_limit: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Stop dispatching substitution searches after this many seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            sub_rounds: DEFAULT_SUB_ROUNDS,
            stall_limit: DEFAULT_STALL_LIMIT,
            seed: None,
            time: None,
        }
    }
}
