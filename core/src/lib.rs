//! Search Observatory Core
//!
//! Instrumented search algorithms over arrays, linked lists and binary
//! search trees. Every search is exposed as a lazy, replayable trace of
//! steps, so the same run can drive a step-through animation, a benchmark
//! batch or a complexity analysis.
//!
//! # Example
//! ```
//! use search_observatory::{build_sorted_structure, search, AlgorithmKind, StructureKind};
//!
//! let array = build_sorted_structure(StructureKind::Array, vec![1, 3, 5, 7, 9, 11]).unwrap();
//! let run = search(&array, AlgorithmKind::Binary, 7).unwrap();
//!
//! for step in run.steps().unwrap() {
//!     println!("{:?} {:?}", step.position, step.outcome);
//! }
//! assert_eq!(run.result().unwrap().comparisons, 3);
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt::Debug;

pub mod algorithm;
pub mod data_structures;
pub mod execution;
pub mod insights;
pub mod optimization;
pub mod validation;

pub use crate::algorithm::traits::{
    AlgorithmComplexity, AlgorithmKind, ComplexityClass, NodeId, Position, Result, SearchAlgorithm,
    SearchError, StepOutcome,
};
pub use crate::data_structures::structure::{Capabilities, Structure, StructureKind};
pub use crate::execution::{Replay, SearchResult, SearchRun, SearchStep, Trace};
pub use crate::insights::{
    recommend, recommend_by_group, RankedRecord, RankingMetric, Recommendation, ReportRow,
    TrendPoint,
};
pub use crate::optimization::parallel::CancellationToken;
pub use crate::validation::{
    analyze_complexity, run_benchmark, BenchmarkConfig, BenchmarkRecord, BenchmarkReport,
    BenchmarkRunner, ComplexityAnalyzer, ComplexityConfig, ComplexityTrend, CurveFit,
    TargetPolicy, TrendMetric, TrendSample,
};

/// Builds a structure of the given kind from `values`
pub fn build_structure<T: Ord + Clone + Debug>(kind: StructureKind, values: Vec<T>) -> Result<Structure<T>> {
    Structure::build(kind, values)
}

/// Builds a structure whose values must already be ascending
pub fn build_sorted_structure<T: Ord + Clone + Debug>(
    kind: StructureKind,
    values: Vec<T>,
) -> Result<Structure<T>> {
    Structure::build_sorted(kind, values)
}

/// Validated, restartable search handle; no step runs until a trace is pulled
pub fn search<T: Ord + Clone>(
    structure: &Structure<T>,
    algorithm: AlgorithmKind,
    target: T,
) -> Result<SearchRun<'_, T>> {
    SearchRun::new(structure, algorithm, target)
}
