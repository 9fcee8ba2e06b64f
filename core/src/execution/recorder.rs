//! Step recording shared by every search variant
//!
//! Algorithms never build step records themselves: they report what they
//! examined to a `StepRecorder`, which stamps ordinals, counts comparisons
//! and remembers the match position. The recorder knows nothing about who
//! consumes the steps, so replay and benchmarking share one code path.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Position, StepOutcome};

/// One immutable trace entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep<T> {
    /// 1-based, strictly increasing within a trace
    pub ordinal: usize,

    /// Examined position; absent for `exhausted`
    pub position: Option<Position>,

    /// Examined value; absent for `exhausted`
    pub value: Option<T>,

    pub outcome: StepOutcome,
}

/// Final verdict of one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub found: bool,

    /// Present iff `found`
    pub position: Option<Position>,

    /// Number of non-`exhausted` steps
    pub comparisons: usize,

    /// End-to-end time over the drained trace
    pub elapsed: Duration,
}

/// Ordinal and comparison bookkeeping for a single trace
#[derive(Debug, Default)]
pub struct StepRecorder {
    emitted: usize,
    comparisons: usize,
    matched: Option<Position>,
    finished: bool,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a comparison against `value` at `position`
    pub fn record<T: Clone>(&mut self, position: Position, value: &T, outcome: StepOutcome) -> SearchStep<T> {
        debug_assert!(!self.finished, "step recorded after terminal step");
        debug_assert!(outcome.is_comparison());

        self.comparisons += 1;
        if outcome == StepOutcome::Match {
            self.matched = Some(position);
            self.finished = true;
        }
        self.stamp(Some(position), Some(value.clone()), outcome)
    }

    /// Records the terminal step of an unsuccessful search
    pub fn exhausted<T>(&mut self) -> SearchStep<T> {
        debug_assert!(!self.finished, "step recorded after terminal step");

        self.finished = true;
        self.stamp(None, None, StepOutcome::Exhausted)
    }

    fn stamp<T>(&mut self, position: Option<Position>, value: Option<T>, outcome: StepOutcome) -> SearchStep<T> {
        self.emitted += 1;
        SearchStep {
            ordinal: self.emitted,
            position,
            value,
            outcome,
        }
    }

    #[inline]
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    #[inline]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Builds the result for everything recorded so far
    pub fn result(&self, elapsed: Duration) -> SearchResult {
        SearchResult {
            found: self.matched.is_some(),
            position: self.matched,
            comparisons: self.comparisons,
            elapsed,
        }
    }
}
