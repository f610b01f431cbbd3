pub mod runner;
pub mod substitution;

use self::substitution::{indices_to_text, letter_indices, SubstitutionKey};
use crate::scorer::QuadgramModel;

pub const DEFAULT_SUB_ROUNDS: usize = 20;
pub const DEFAULT_STALL_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct ClimbOptions {
    /// Random restarts per ciphertext.
    pub rounds: usize,
    /// Consecutive non-improving swaps before a restart gives up.
    pub stall_limit: usize,
}

impl Default for ClimbOptions {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_SUB_ROUNDS,
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimbOutcome {
    pub fitness: f64,
    pub key: SubstitutionKey,
    pub plaintext: String,
}

/// Hooks into the climb, mostly for diagnostics and tests.
pub trait ClimbObserver {
    fn on_restart(&mut self, _restart: usize, _fitness: f64) {}
    fn on_accept(&mut self, restart: usize, fitness: f64);
}

pub struct NoopObserver;

impl ClimbObserver for NoopObserver {
    fn on_accept(&mut self, _restart: usize, _fitness: f64) {}
}

/// Greedy hill-climb over substitution keys with random restarts.
///
/// Only strictly better swaps are taken; there is no temperature.
pub struct HillClimber<'m> {
    pub model: &'m QuadgramModel,
    pub options: ClimbOptions,
    pub rng: fastrand::Rng,
    buffer: Vec<u8>,
}

impl<'m> HillClimber<'m> {
    pub fn new(model: &'m QuadgramModel, options: ClimbOptions, seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        Self {
            model,
            options,
            rng,
            buffer: Vec::new(),
        }
    }

    #[inline(always)]
    fn fitness(&mut self, key: &SubstitutionKey, cipher: &[u8]) -> f64 {
        key.decipher_indices_into(cipher, &mut self.buffer);
        self.model.score_indices(&self.buffer)
    }

    /// Solves the `A-Z` letters of `ciphertext`; other symbols are ignored.
    pub fn solve(&mut self, ciphertext: &str) -> ClimbOutcome {
        self.solve_observed(ciphertext, &mut NoopObserver)
    }

    pub fn solve_observed(
        &mut self,
        ciphertext: &str,
        observer: &mut dyn ClimbObserver,
    ) -> ClimbOutcome {
        let cipher = letter_indices(ciphertext);

        let mut best_key = SubstitutionKey::identity();
        let mut best_score = f64::NEG_INFINITY;

        for restart in 0..self.options.rounds {
            let mut parent = SubstitutionKey::shuffled(&mut self.rng);
            let mut parent_score = self.fitness(&parent, &cipher);
            observer.on_restart(restart, parent_score);

            let mut stall = 0;
            while stall < self.options.stall_limit {
                let a = self.rng.usize(0..26);
                let b = self.rng.usize(0..26);
                let child = parent.swapped(a, b);
                let score = self.fitness(&child, &cipher);

                if score > parent_score {
                    parent = child;
                    parent_score = score;
                    stall = 0;
                    observer.on_accept(restart, score);
                } else {
                    stall += 1;
                }
            }

            if parent_score > best_score {
                best_score = parent_score;
                best_key = parent;
            }
        }

        best_key.decipher_indices_into(&cipher, &mut self.buffer);
        ClimbOutcome {
            fitness: best_score,
            key: best_key,
            plaintext: indices_to_text(&self.buffer),
        }
    }
}
