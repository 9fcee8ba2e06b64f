//! Empirical validation: benchmark batches and complexity trends
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod benchmarks;
pub mod complexity;

pub use self::benchmarks::{
    run_benchmark, BenchmarkConfig, BenchmarkRecord, BenchmarkReport, BenchmarkRunner, TargetPolicy,
};
pub use self::complexity::{
    analyze_complexity, best_fit, fit_curves, ComplexityAnalyzer, ComplexityConfig, ComplexityTrend,
    CurveFit, TrendMetric, TrendSample,
};
