//! Linear search over sequential structures
//!
//! Scans positions in natural order (array index ascending, list head to
//! tail) and stops at the first equal element, so ties resolve to the
//! lowest index or offset.

use crate::algorithm::traits::{
    AlgorithmKind, Position, Result, SearchAlgorithm, SearchCursor, SearchError, StepOutcome,
};
use crate::data_structures::structure::{Capabilities, Structure, StructureKind};
use crate::execution::recorder::{SearchStep, StepRecorder};

/// Sequential scan, O(n) comparisons in the worst case
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl<T: Ord + Clone> SearchAlgorithm<T> for LinearSearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Linear
    }

    fn check_compatibility(&self, kind: StructureKind, capabilities: Capabilities) -> Result<()> {
        if !capabilities.ordered_traversal {
            return Err(SearchError::unsupported(
                AlgorithmKind::Linear,
                kind,
                "structure has no sequential traversal order",
            ));
        }
        Ok(())
    }

    fn cursor<'a>(
        &self,
        structure: &'a Structure<T>,
        target: &'a T,
    ) -> Result<Box<dyn SearchCursor<T> + 'a>> {
        SearchAlgorithm::<T>::check_compatibility(self, structure.kind(), structure.capabilities())?;
        let positions = structure.sequential().ok_or_else(|| {
            SearchError::unsupported(
                AlgorithmKind::Linear,
                structure.kind(),
                "structure has no sequential traversal order",
            )
        })?;
        Ok(Box::new(LinearCursor { positions, target }))
    }
}

struct LinearCursor<'a, T> {
    positions: Box<dyn Iterator<Item = (Position, &'a T)> + 'a>,
    target: &'a T,
}

impl<'a, T: Ord + Clone> SearchCursor<T> for LinearCursor<'a, T> {
    fn advance(&mut self, recorder: &mut StepRecorder) -> Option<SearchStep<T>> {
        if recorder.is_finished() {
            return None;
        }
        match self.positions.next() {
            Some((position, value)) => {
                let outcome = if value == self.target {
                    StepOutcome::Match
                } else {
                    StepOutcome::Visiting
                };
                Some(recorder.record(position, value, outcome))
            }
            None => Some(recorder.exhausted()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::trace::SearchRun;

    fn run_linear(kind: StructureKind, values: Vec<i32>, target: i32) -> Vec<SearchStep<i32>> {
        let structure = Structure::build(kind, values).unwrap();
        let run = SearchRun::new(&structure, AlgorithmKind::Linear, target).unwrap();
        let steps: Vec<_> = run.steps().unwrap().collect();
        steps
    }

    #[test]
    fn test_array_scan_stops_at_match() {
        let structure = Structure::build(StructureKind::Array, vec![4, 2, 9, 1]).unwrap();
        let run = SearchRun::new(&structure, AlgorithmKind::Linear, 9).unwrap();
        let steps: Vec<_> = run.steps().unwrap().collect();

        let positions: Vec<_> = steps.iter().filter_map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![Position::Index(0), Position::Index(1), Position::Index(2)]
        );
        assert_eq!(steps[2].outcome, StepOutcome::Match);

        let result = run.result().unwrap();
        assert!(result.found);
        assert_eq!(result.position, Some(Position::Index(2)));
        assert_eq!(result.comparisons, 3);
    }

    #[test]
    fn test_first_duplicate_wins() {
        for kind in [StructureKind::Array, StructureKind::LinkedList] {
            let steps = run_linear(kind, vec![3, 7, 5, 7, 7], 7);
            assert_eq!(steps.len(), 2);
            let matched = steps.last().unwrap();
            assert_eq!(matched.outcome, StepOutcome::Match);
            let expected = match kind {
                StructureKind::Array => Position::Index(1),
                _ => Position::Offset(1),
            };
            assert_eq!(matched.position, Some(expected));
        }
    }

    #[test]
    fn test_absent_target_visits_everything() {
        let steps = run_linear(StructureKind::LinkedList, vec![1, 3, 5, 7], 8);
        assert_eq!(steps.len(), 5);
        assert!(steps[..4].iter().all(|s| s.outcome == StepOutcome::Visiting));
        assert_eq!(steps[4].outcome, StepOutcome::Exhausted);

        let offsets: Vec<_> = steps.iter().filter_map(|s| s.position).collect();
        assert_eq!(offsets, (0..4).map(Position::Offset).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_sequences_only_exhaust() {
        for kind in [StructureKind::Array, StructureKind::LinkedList] {
            let steps = run_linear(kind, Vec::new(), 5);
            assert_eq!(steps.len(), 1);
            assert_eq!(steps[0].outcome, StepOutcome::Exhausted);
        }
    }

    #[test]
    fn test_tree_is_unsupported() {
        let structure = Structure::build(StructureKind::BinarySearchTree, vec![2, 1, 3]).unwrap();
        assert!(matches!(
            SearchRun::new(&structure, AlgorithmKind::Linear, 1),
            Err(SearchError::UnsupportedCombination { .. })
        ));
    }
}
