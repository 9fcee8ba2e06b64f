//! Parallel unit execution with cooperative cancellation
//!
//! Benchmark trials are independent units: each builds and owns its own
//! structure, so they can run on rayon's pool without any locking. Results
//! are always returned in unit order regardless of which worker finished
//! first, which keeps every downstream aggregate reproducible.
//!
//! Cancellation is cooperative. The flag is checked before each unit
//! starts; units already running complete normally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

/// Shared cancellation flag handed to long-running batches
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation (best effort)
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Outcome of a batch of units
#[derive(Debug, Clone, PartialEq)]
pub struct UnitBatch<R> {
    /// Completed unit results in unit order
    pub completed: Vec<R>,

    /// Whether some units were skipped because of cancellation
    pub cancelled: bool,
}

/// Executes `count` units, optionally on the rayon pool
///
/// `unit` receives the unit index. With cancellation, the completed
/// results are the ones whose units started before the flag was seen.
pub fn run_units<R, F>(count: usize, parallel: bool, token: &CancellationToken, unit: F) -> UnitBatch<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    if parallel {
        let outcomes: Vec<Option<R>> = (0..count)
            .into_par_iter()
            .map(|i| if token.is_cancelled() { None } else { Some(unit(i)) })
            .collect();
        let total = outcomes.len();
        let completed: Vec<R> = outcomes.into_iter().flatten().collect();
        let cancelled = completed.len() < total;
        UnitBatch { completed, cancelled }
    } else {
        let mut completed = Vec::with_capacity(count);
        for i in 0..count {
            if token.is_cancelled() {
                return UnitBatch {
                    completed,
                    cancelled: true,
                };
            }
            completed.push(unit(i));
        }
        UnitBatch {
            completed,
            cancelled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_keep_unit_order() {
        let token = CancellationToken::new();
        let sequential = run_units(100, false, &token, |i| i * i);
        let parallel = run_units(100, true, &token, |i| i * i);

        assert_eq!(sequential, parallel);
        assert!(!parallel.cancelled);
        assert_eq!(parallel.completed[7], 49);
    }

    #[test]
    fn test_cancellation_keeps_completed_units() {
        let token = CancellationToken::new();
        let batch = run_units(10, false, &token, |i| {
            if i == 3 {
                token.cancel();
            }
            i
        });

        assert!(batch.cancelled);
        assert_eq!(batch.completed, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pre_cancelled_batch_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(token.is_cancelled());

        let batch = run_units(5, true, &token, |i| i);
        assert!(batch.cancelled);
        assert!(batch.completed.is_empty());
    }
}
