//! Report shaping for charting and tabular front-ends
//!
//! Flattens records and trends into plain rows with display-friendly
//! units. Formatting of percentages and labels is left to the caller.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmKind, Result};
use crate::data_structures::structure::StructureKind;
use crate::validation::benchmarks::BenchmarkRecord;
use crate::validation::complexity::ComplexityTrend;

/// One table row per benchmark record, times in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub algorithm: AlgorithmKind,
    pub structure: StructureKind,
    pub size: usize,
    pub trials: usize,
    pub avg_time_ms: f64,
    pub min_time_ms: f64,
    pub max_time_ms: f64,
    pub median_time_ms: f64,
    pub avg_comparisons: f64,
    pub median_comparisons: f64,
    pub success_rate: f64,
    pub verdict_accuracy: f64,
}

impl From<&BenchmarkRecord> for ReportRow {
    fn from(record: &BenchmarkRecord) -> Self {
        let ms = |d: std::time::Duration| d.as_secs_f64() * 1000.0;
        Self {
            algorithm: record.algorithm,
            structure: record.structure,
            size: record.size,
            trials: record.trials,
            avg_time_ms: ms(record.average_elapsed),
            min_time_ms: ms(record.min_elapsed),
            max_time_ms: ms(record.max_elapsed),
            median_time_ms: ms(record.median_elapsed),
            avg_comparisons: record.average_comparisons,
            median_comparisons: record.median_comparisons,
            success_rate: record.success_rate,
            verdict_accuracy: record.verdict_accuracy,
        }
    }
}

pub fn report_rows(records: &[BenchmarkRecord]) -> Vec<ReportRow> {
    records.iter().map(ReportRow::from).collect()
}

/// Pretty-printed JSON array of report rows
pub fn to_json(records: &[BenchmarkRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&report_rows(records))?)
}

/// Observed value next to the fitted reference curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub size: usize,
    pub observed: f64,

    /// Value of the fitted curve, absent when the trend has no label
    pub theoretical: Option<f64>,
}

pub fn trend_points(trend: &ComplexityTrend) -> Vec<TrendPoint> {
    let best = trend.best();
    trend
        .samples
        .iter()
        .map(|sample| TrendPoint {
            size: sample.size,
            observed: sample.value,
            theoretical: best.map(|fit| fit.predict(sample.size)),
        })
        .collect()
}
