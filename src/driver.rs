use crate::error::{SladError, SladResult};
use crate::selector::Selector;
use crate::store::RecordSource;
use rayon::prelude::*;
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs a [`Selector`] over every record of a source, split into contiguous
/// partitions that are processed in parallel, each into its own accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Driver {
    /// Worker threads; 0 lets rayon decide.
    pub threads: usize,
    /// Index-space partitions; 0 means one per worker.
    pub partitions: usize,
}

impl Driver {
    pub fn new(threads: usize, partitions: usize) -> Self {
        Self {
            threads,
            partitions,
        }
    }

    pub fn sequential() -> Self {
        Self::new(1, 1)
    }

    pub fn run<S, R>(&self, selector: &S, source: &R) -> SladResult<S::Output>
    where
        S: Selector,
        R: RecordSource + ?Sized,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| SladError::Config(format!("cannot build worker pool: {}", e)))?;

        let workers = pool.current_num_threads();
        let requested = if self.partitions == 0 {
            workers
        } else {
            self.partitions
        };
        if requested > source.len() && !source.is_empty() {
            warn!(
                "⚠️  {} partitions requested for {} events; using one per event",
                requested,
                source.len()
            );
        }
        let ranges = partition_ranges(source.len(), requested);

        info!(
            "⚙️  Processing {} events in {} partitions on {} workers",
            source.len(),
            ranges.len(),
            workers
        );
        let start = Instant::now();

        // collect keeps partition order, so the reduce below is reproducible
        let partials: Vec<S::Partial> = pool.install(|| {
            ranges
                .par_iter()
                .map(|range| run_partition(selector, source, range.clone()))
                .collect()
        });

        let mut merged = selector.init();
        for partial in partials {
            merged = selector.merge(merged, partial)?;
        }

        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            info!(
                "   Event loop done in {:.2}s ({:.0} events/s)",
                elapsed,
                source.len() as f64 / elapsed
            );
        }

        Ok(selector.finalize(merged))
    }
}

fn run_partition<S, R>(selector: &S, source: &R, range: Range<usize>) -> S::Partial
where
    S: Selector,
    R: RecordSource + ?Sized,
{
    let mut partial = selector.init();
    let mut accepted = 0usize;
    let len = range.len();
    let first = range.start;
    for index in range {
        if selector.step(&mut partial, &source.event(index)) {
            accepted += 1;
        }
    }
    debug!(
        "   Partition @{}: {} events, {} accepted",
        first, len, accepted
    );
    partial
}

/// Splits `0..len` into at most `parts` contiguous, non-empty ranges.
pub fn partition_ranges(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let parts = parts.clamp(1, len);
    let chunk = len.div_ceil(parts);
    (0..len)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(len))
        .collect()
}
