//! Binary search tree descent
//!
//! Starts at the root and compares the target with each node on the way
//! down. Every visited node yields exactly one step: `match` on equality,
//! otherwise a pruning tag naming the subtree that is discarded
//! (`pruned-right` when descending left, `pruned-left` when descending
//! right). Reaching a missing child emits `exhausted`. The number of
//! comparisons for a present value therefore equals its depth.

use std::cmp::Ordering;

use crate::algorithm::traits::{
    AlgorithmKind, Position, Result, SearchAlgorithm, SearchCursor, SearchError, StepOutcome,
};
use crate::data_structures::search_tree::TreeNode;
use crate::data_structures::structure::{Capabilities, Structure, StructureKind};
use crate::execution::recorder::{SearchStep, StepRecorder};

/// Root-to-leaf descent, O(height) comparisons
#[derive(Debug, Clone, Copy, Default)]
pub struct BstSearch;

impl<T: Ord + Clone> SearchAlgorithm<T> for BstSearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Bst
    }

    fn check_compatibility(&self, kind: StructureKind, capabilities: Capabilities) -> Result<()> {
        if !capabilities.tree_navigation {
            return Err(SearchError::unsupported(
                AlgorithmKind::Bst,
                kind,
                "tree navigation is required",
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
        let tree = structure.as_tree().ok_or_else(|| {
            SearchError::unsupported(
                AlgorithmKind::Bst,
                structure.kind(),
                "a binary search tree is required",
            )
        })?;
        Ok(Box::new(BstCursor {
            next: tree.root(),
            target,
        }))
    }
}

struct BstCursor<'a, T> {
    /// Node to compare on the next pull; `None` means a missing child
    next: Option<&'a TreeNode<T>>,
    target: &'a T,
}

impl<'a, T: Ord + Clone> SearchCursor<T> for BstCursor<'a, T> {
    fn advance(&mut self, recorder: &mut StepRecorder) -> Option<SearchStep<T>> {
        if recorder.is_finished() {
            return None;
        }
        let node = match self.next {
            Some(node) => node,
            None => return Some(recorder.exhausted()),
        };
        let outcome = match self.target.cmp(node.value()) {
            Ordering::Equal => StepOutcome::Match,
            Ordering::Less => {
                self.next = node.left();
                StepOutcome::PrunedRight
            }
            Ordering::Greater => {
                self.next = node.right();
                StepOutcome::PrunedLeft
            }
        };
        Some(recorder.record(Position::Node(node.id()), node.value(), outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::NodeId;
    use crate::execution::trace::SearchRun;

    fn tree(values: Vec<i32>) -> Structure<i32> {
        Structure::build(StructureKind::BinarySearchTree, values).unwrap()
    }

    #[test]
    fn test_descent_path() {
        let structure = tree(vec![5, 3, 8, 1, 4]);
        let run = SearchRun::new(&structure, AlgorithmKind::Bst, 4).unwrap();
        let steps: Vec<_> = run.steps().unwrap().collect();

        let path: Vec<_> = steps.iter().map(|s| (s.value, s.outcome)).collect();
        assert_eq!(
            path,
            vec![
                (Some(5), StepOutcome::PrunedRight),
                (Some(3), StepOutcome::PrunedLeft),
                (Some(4), StepOutcome::Match),
            ]
        );
        assert_eq!(steps[2].position, Some(Position::Node(NodeId(4))));

        let result = run.result().unwrap();
        assert!(result.found);
        assert_eq!(result.comparisons, 3);
        assert_eq!(result.position, Some(Position::Node(NodeId(4))));
    }

    #[test]
    fn test_comparisons_equal_depth() {
        let values = vec![50, 20, 70, 10, 30, 60, 80, 25, 35, 65, 5];
        let structure = tree(values.clone());
        let search_tree = structure.as_tree().unwrap();

        for value in values {
            let run = SearchRun::new(&structure, AlgorithmKind::Bst, value).unwrap();
            let result = run.result().unwrap();
            assert!(result.found);
            assert_eq!(Some(result.comparisons), search_tree.depth_of(&value));
        }
    }

    #[test]
    fn test_missing_child_exhausts() {
        let structure = tree(vec![5, 3, 8]);
        let run = SearchRun::new(&structure, AlgorithmKind::Bst, 9).unwrap();
        let steps: Vec<_> = run.steps().unwrap().collect();

        let outcomes: Vec<_> = steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![StepOutcome::PrunedLeft, StepOutcome::PrunedLeft, StepOutcome::Exhausted]
        );
        assert_eq!(run.result().unwrap().comparisons, 2);
    }

    #[test]
    fn test_empty_tree_exhausts_immediately() {
        let structure = tree(Vec::new());
        let run = SearchRun::new(&structure, AlgorithmKind::Bst, 1).unwrap();
        let steps: Vec<_> = run.steps().unwrap().collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].outcome, StepOutcome::Exhausted);
    }

    #[test]
    fn test_sequences_are_unsupported() {
        for kind in [StructureKind::Array, StructureKind::LinkedList] {
            let structure = Structure::build(kind, vec![1, 2, 3]).unwrap();
            assert!(matches!(
                SearchRun::new(&structure, AlgorithmKind::Bst, 2),
                Err(SearchError::UnsupportedCombination { algorithm: AlgorithmKind::Bst, .. })
            ));
        }
    }

    #[test]
    fn test_cursor_checks_capabilities_first() {
        let array = Structure::build(StructureKind::Array, vec![1, 2, 3]).unwrap();
        let err = SearchAlgorithm::<i32>::cursor(&BstSearch, &array, &2).err().unwrap();
        match err {
            SearchError::UnsupportedCombination { structure, reason, .. } => {
                assert_eq!(structure, StructureKind::Array);
                assert_eq!(reason, "tree navigation is required");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
