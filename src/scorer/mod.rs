pub mod ic;
pub mod loader;
pub mod quadgram;

pub use self::ic::index_of_coincidence;
pub use self::quadgram::{language_fitness, QuadgramModel};
