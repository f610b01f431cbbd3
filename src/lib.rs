pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod parallel;
pub mod report;
pub mod scorer;
pub mod search;
pub mod snapshot;
pub mod stats;
pub mod tracker;
pub mod transposer;
// cmd and reports are binary modules (see main.rs).

pub use error::{CfResult, CipherForgeError};
