//! Binary search over sorted arrays
//!
//! Classic midpoint narrowing over inclusive bounds `[lo, hi]` with
//! `mid = (lo + hi) / 2`. Each iteration emits one step at the midpoint;
//! the bound update happens between pulls and is not a step of its own.
//! Requires random access and the sorted guarantee from construction.

use std::cmp::Ordering;

use crate::algorithm::traits::{
    AlgorithmKind, Position, Result, SearchAlgorithm, SearchCursor, SearchError, StepOutcome,
};
use crate::data_structures::array::SearchArray;
use crate::data_structures::structure::{Capabilities, Structure, StructureKind};
use crate::execution::recorder::{SearchStep, StepRecorder};

/// Midpoint narrowing, at most ⌈log2(n + 1)⌉ comparisons
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl<T: Ord + Clone> SearchAlgorithm<T> for BinarySearch {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Binary
    }

    fn check_compatibility(&self, kind: StructureKind, capabilities: Capabilities) -> Result<()> {
        if !capabilities.random_access {
            return Err(SearchError::unsupported(
                AlgorithmKind::Binary,
                kind,
                "random access is required",
            ));
        }
        if !capabilities.sorted {
            return Err(SearchError::unsupported(
                AlgorithmKind::Binary,
                kind,
                "values are not in ascending order",
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
        let array = structure.as_array().ok_or_else(|| {
            SearchError::unsupported(AlgorithmKind::Binary, structure.kind(), "an array is required")
        })?;
        Ok(Box::new(BinaryCursor {
            array,
            target,
            lo: 0,
            hi: array.len(),
        }))
    }
}

/// Remaining range is `[lo, hi)`; the classic inclusive right bound is `hi - 1`
struct BinaryCursor<'a, T> {
    array: &'a SearchArray<T>,
    target: &'a T,
    lo: usize,
    hi: usize,
}

impl<'a, T: Ord + Clone> SearchCursor<T> for BinaryCursor<'a, T> {
    fn advance(&mut self, recorder: &mut StepRecorder) -> Option<SearchStep<T>> {
        if recorder.is_finished() {
            return None;
        }
        if self.lo >= self.hi {
            return Some(recorder.exhausted());
        }

        let mid = (self.lo + self.hi - 1) / 2;
        let value = match self.array.get(mid) {
            Some(value) => value,
            None => return Some(recorder.exhausted()),
        };
        let outcome = match value.cmp(self.target) {
            Ordering::Equal => StepOutcome::Match,
            Ordering::Less => {
                self.lo = mid + 1;
                StepOutcome::Visiting
            }
            Ordering::Greater => {
                self.hi = mid;
                StepOutcome::Visiting
            }
        };
        Some(recorder.record(Position::Index(mid), value, outcome))
    }
}
