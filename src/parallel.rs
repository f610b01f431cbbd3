use crate::error::CfResult;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

pub const DEFAULT_BATCH_SIZE: usize = 1024;

pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanOutReport {
    pub dispatched: usize,
    /// Items never evaluated because the deadline passed.
    pub abandoned: usize,
}

/// Worker pool that evaluates batches in parallel and replays the results
/// in submission order to a single consumer.
pub struct FanOut {
    pool: rayon::ThreadPool,
    batch_size: usize,
    deadline: Option<Instant>,
}

impl FanOut {
    pub fn new(num_threads: usize, batch_size: usize) -> CfResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .build()?;
        Ok(Self {
            pool,
            batch_size: batch_size.max(1),
            deadline: None,
        })
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn run_ordered<T, R, I, F, C>(&self, items: I, eval: F, mut consume: C) -> CfResult<FanOutReport>
    where
        I: IntoIterator<Item = T>,
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync,
        C: FnMut(T, R) -> CfResult<()>,
    {
        let mut items = items.into_iter();
        let mut report = FanOutReport::default();

        loop {
            let batch: Vec<T> = items.by_ref().take(self.batch_size).collect();
            if batch.is_empty() {
                break;
            }

            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    report.abandoned = batch.len() + items.count();
                    debug!("Deadline reached, abandoning {} items", report.abandoned);
                    break;
                }
            }

            let results: Vec<R> = self
                .pool
                .install(|| batch.par_iter().map(|item| eval(item)).collect());

            report.dispatched += batch.len();
            for (item, result) in batch.into_iter().zip(results) {
                consume(item, result)?;
            }
        }

        Ok(report)
    }
}
