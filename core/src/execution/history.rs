//! Execution history for step-through replay
//!
//! A `Replay` is a fully materialized trace owned by the consumer that
//! requested it. It supports bidirectional navigation by ordinal and the
//! lookups a replay view needs (visits at a position, the match step,
//! running comparison counts) without re-running the algorithm.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmKind, Position, StepOutcome};
use crate::data_structures::structure::StructureKind;
use crate::execution::recorder::{SearchResult, SearchStep};

/// Materialized trace plus its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay<T> {
    pub algorithm: AlgorithmKind,
    pub structure: StructureKind,
    pub target: T,

    /// Steps in emission order
    steps: Vec<SearchStep<T>>,

    pub result: SearchResult,
}

impl<T> Replay<T> {
    pub(crate) fn new(
        algorithm: AlgorithmKind,
        structure: StructureKind,
        target: T,
        steps: Vec<SearchStep<T>>,
        result: SearchResult,
    ) -> Self {
        Self {
            algorithm,
            structure,
            target,
            steps,
            result,
        }
    }

    /// Total number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[SearchStep<T>] {
        &self.steps
    }

    /// Step at a zero-based cursor position
    pub fn step(&self, index: usize) -> Option<&SearchStep<T>> {
        self.steps.get(index)
    }

    /// Step carrying a given ordinal
    pub fn step_by_ordinal(&self, ordinal: usize) -> Option<&SearchStep<T>> {
        ordinal.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// The unique `match` step, if the target was found
    pub fn matched_step(&self) -> Option<&SearchStep<T>> {
        self.steps.iter().find(|s| s.outcome == StepOutcome::Match)
    }

    /// Ordinals of the steps that examined `position`
    pub fn visits_at(&self, position: Position) -> Vec<usize> {
        self.steps
            .iter()
            .filter(|s| s.position == Some(position))
            .map(|s| s.ordinal)
            .collect()
    }

    /// Comparisons performed up to and including the step at `index`
    pub fn comparisons_through(&self, index: usize) -> usize {
        self.steps
            .iter()
            .take(index.saturating_add(1))
            .filter(|s| s.outcome.is_comparison())
            .count()
    }

    /// Comparison count recomputed from the steps themselves
    pub fn counted_comparisons(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_comparison()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::structure::Structure;
    use crate::execution::trace::SearchRun;

    fn linear_replay() -> Replay<i32> {
        let structure = Structure::build(StructureKind::Array, vec![4, 2, 9, 1]).unwrap();
        SearchRun::new(&structure, AlgorithmKind::Linear, 9)
            .unwrap()
            .replay()
            .unwrap()
    }

    #[test]
    fn test_navigation_by_index_and_ordinal() {
        let replay = linear_replay();
        assert_eq!(replay.len(), 3);
        assert_eq!(replay.step(0).map(|s| s.ordinal), Some(1));
        assert_eq!(replay.step_by_ordinal(3).map(|s| s.outcome), Some(StepOutcome::Match));
        assert!(replay.step_by_ordinal(0).is_none());
        assert!(replay.step(3).is_none());
    }

    #[test]
    fn test_lookups() {
        let replay = linear_replay();
        assert_eq!(replay.matched_step().and_then(|s| s.value), Some(9));
        assert_eq!(replay.visits_at(Position::Index(1)), vec![2]);
        assert_eq!(replay.comparisons_through(1), 2);
        assert_eq!(replay.counted_comparisons(), replay.result.comparisons);
    }
}
