pub mod engine;
pub mod reconstruct;
pub mod topk;

pub use self::engine::{
    evaluate_permutation, Candidate, SearchOptions, SearchOutcome, TranspositionSearch,
};
pub use self::reconstruct::{generate_hypotheses, pair_orderings};
pub use self::topk::{canonical_key, Admission, TopKSet};
