//! Lazy, restartable search traces
//!
//! A `SearchRun` is a validated (structure, algorithm, target) triple. It
//! holds no cursor state of its own: every call to `steps` derives a brand
//! new `Trace` from the immutable structure, so a replay never observes a
//! previous consumer's position. A `Trace` is a plain pull iterator; the
//! algorithm advances only when the consumer asks for the next step.

use std::fmt::Debug;
use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use crate::algorithm::resolve;
use crate::algorithm::traits::{AlgorithmKind, Result, SearchCursor};
use crate::data_structures::structure::Structure;
use crate::execution::history::Replay;
use crate::execution::recorder::{SearchResult, SearchStep, StepRecorder};

/// Single-consumer step sequence for one search
pub struct Trace<'a, T> {
    cursor: Box<dyn SearchCursor<T> + 'a>,
    recorder: StepRecorder,
    started: Option<Instant>,
    result: Option<SearchResult>,
}

impl<'a, T> Trace<'a, T> {
    pub fn new(cursor: Box<dyn SearchCursor<T> + 'a>) -> Self {
        Self {
            cursor,
            recorder: StepRecorder::new(),
            started: None,
            result: None,
        }
    }

    /// Final result, available once the trace has been exhausted
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Comparisons recorded so far
    pub fn comparisons(&self) -> usize {
        self.recorder.comparisons()
    }

    /// Drains the remaining steps without retaining them
    pub fn finish(mut self) -> SearchResult {
        for _ in self.by_ref() {}
        match self.result.take() {
            Some(result) => result,
            None => self.recorder.result(Duration::ZERO),
        }
    }
}

impl<'a, T> Iterator for Trace<'a, T> {
    type Item = SearchStep<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.result.is_some() {
            return None;
        }
        let started = *self.started.get_or_insert_with(Instant::now);
        let step = self.cursor.advance(&mut self.recorder);
        if step.as_ref().map_or(true, |s| s.outcome.is_terminal()) {
            self.result = Some(self.recorder.result(started.elapsed()));
        }
        step
    }
}

impl<'a, T> FusedIterator for Trace<'a, T> {}

impl<'a, T> Debug for Trace<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trace")
            .field("recorder", &self.recorder)
            .field("result", &self.result)
            .finish()
    }
}

/// Validated search request that can be traced any number of times
#[derive(Debug, Clone)]
pub struct SearchRun<'s, T> {
    structure: &'s Structure<T>,
    algorithm: AlgorithmKind,
    target: T,
}

impl<'s, T: Ord + Clone> SearchRun<'s, T> {
    /// Checks the algorithm against the structure's capabilities
    pub fn new(structure: &'s Structure<T>, algorithm: AlgorithmKind, target: T) -> Result<Self> {
        resolve::<T>(algorithm).check_compatibility(structure.kind(), structure.capabilities())?;
        Ok(Self {
            structure,
            algorithm,
            target,
        })
    }

    /// Fresh trace over the structure snapshot
    pub fn steps(&self) -> Result<Trace<'_, T>> {
        let cursor = resolve::<T>(self.algorithm).cursor(self.structure, &self.target)?;
        Ok(Trace::new(cursor))
    }

    /// Runs a fresh trace to completion, keeping only the result
    pub fn result(&self) -> Result<SearchResult> {
        Ok(self.steps()?.finish())
    }

    /// Runs a fresh trace to completion, keeping every step
    pub fn replay(&self) -> Result<Replay<T>> {
        let mut trace = self.steps()?;
        let steps: Vec<_> = trace.by_ref().collect();
        let result = trace.finish();
        Ok(Replay::new(
            self.algorithm,
            self.structure.kind(),
            self.target.clone(),
            steps,
            result,
        ))
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn structure(&self) -> &'s Structure<T> {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::traits::{Position, SearchError, StepOutcome};
    use crate::data_structures::structure::StructureKind;

    #[test]
    fn test_result_available_only_after_exhaustion() {
        let structure = Structure::build(StructureKind::Array, vec![4, 2, 9, 1]).unwrap();
        let run = SearchRun::new(&structure, AlgorithmKind::Linear, 9).unwrap();
        let mut trace = run.steps().unwrap();

        assert!(trace.next().is_some());
        assert!(trace.result().is_none());
        assert_eq!(trace.comparisons(), 1);

        let result = trace.finish();
        assert!(result.found);
        assert_eq!(result.position, Some(Position::Index(2)));
    }

    #[test]
    fn test_traces_are_independent() {
        let structure = Structure::build(StructureKind::LinkedList, vec![1, 2, 3]).unwrap();
        let run = SearchRun::new(&structure, AlgorithmKind::Linear, 3).unwrap();

        let mut first = run.steps().unwrap();
        first.next();
        first.next();

        let second: Vec<_> = run.steps().unwrap().collect();
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].ordinal, 1);
        assert_eq!(second[0].position, Some(Position::Offset(0)));

        let rest: Vec<_> = first.collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].outcome, StepOutcome::Match);
    }

    #[test]
    fn test_trace_is_fused() {
        let structure = Structure::build(StructureKind::Array, Vec::<i32>::new()).unwrap();
        let run = SearchRun::new(&structure, AlgorithmKind::Linear, 1).unwrap();
        let mut trace = run.steps().unwrap();

        assert_eq!(trace.next().map(|s| s.outcome), Some(StepOutcome::Exhausted));
        assert!(trace.next().is_none());
        assert!(trace.next().is_none());
        assert_eq!(trace.result().map(|r| r.comparisons), Some(0));
    }

    #[test]
    fn test_incompatible_run_is_rejected_up_front() {
        let structure = Structure::build(StructureKind::LinkedList, vec![1, 2, 3]).unwrap();
        let err = SearchRun::new(&structure, AlgorithmKind::Binary, 2).unwrap_err();
        assert!(matches!(err, SearchError::UnsupportedCombination { .. }));
    }
}
