//! Algorithm recommendation from benchmark records
//!
//! Ranks records by a single metric. Time and comparisons rank ascending,
//! success rate descending. Ties are broken by algorithm name and the sort
//! is stable, so equal records keep their input order.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::SearchError;
use crate::data_structures::structure::StructureKind;
use crate::validation::benchmarks::BenchmarkRecord;

/// Metric a recommendation is ranked by
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    /// Mean elapsed time, lower is better
    Time,

    /// Mean comparisons, lower is better
    Comparisons,

    /// Success rate, higher is better
    SuccessRate,
}

impl RankingMetric {
    pub const ALL: [RankingMetric; 3] = [
        RankingMetric::Time,
        RankingMetric::Comparisons,
        RankingMetric::SuccessRate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RankingMetric::Time => "time",
            RankingMetric::Comparisons => "comparisons",
            RankingMetric::SuccessRate => "success_rate",
        }
    }

    /// Value the metric reads from a record
    pub fn value(self, record: &BenchmarkRecord) -> f64 {
        match self {
            RankingMetric::Time => record.average_elapsed.as_secs_f64(),
            RankingMetric::Comparisons => record.average_comparisons,
            RankingMetric::SuccessRate => record.success_rate,
        }
    }

    fn compare(self, a: &BenchmarkRecord, b: &BenchmarkRecord) -> Ordering {
        let by_value = match self {
            RankingMetric::Time | RankingMetric::Comparisons => self.value(a).total_cmp(&self.value(b)),
            RankingMetric::SuccessRate => self.value(b).total_cmp(&self.value(a)),
        };
        by_value.then_with(|| a.algorithm.name().cmp(b.algorithm.name()))
    }
}

impl Display for RankingMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingMetric {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "time" | "avg_time" => Ok(RankingMetric::Time),
            "comparisons" | "avg_comparisons" => Ok(RankingMetric::Comparisons),
            "success_rate" | "success" => Ok(RankingMetric::SuccessRate),
            other => Err(SearchError::InvalidInput(format!(
                "unknown ranking metric '{}'",
                other
            ))),
        }
    }
}

/// Record with its 1-based rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub rank: usize,
    pub record: BenchmarkRecord,
}

/// Ordered ranking of records under one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: RankingMetric,
    pub ranked: Vec<RankedRecord>,

    /// First-ranked record, absent for empty input
    pub top: Option<BenchmarkRecord>,
}

impl Recommendation {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// Ranks every record under `metric`
pub fn recommend(records: &[BenchmarkRecord], metric: RankingMetric) -> Recommendation {
    let mut sorted: Vec<&BenchmarkRecord> = records.iter().collect();
    sorted.sort_by(|a, b| metric.compare(a, b));

    let ranked: Vec<RankedRecord> = sorted
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedRecord {
            rank: i + 1,
            record: record.clone(),
        })
        .collect();
    let top = ranked.first().map(|r| r.record.clone());
    if let Some(best) = &top {
        debug!(
            "Best by {}: {} on {} (n = {})",
            metric, best.algorithm, best.structure, best.size
        );
    }

    Recommendation {
        metric,
        ranked,
        top,
    }
}

/// Best record for each (structure, size) group, keyed in ascending order
pub fn recommend_by_group(
    records: &[BenchmarkRecord],
    metric: RankingMetric,
) -> BTreeMap<(StructureKind, usize), BenchmarkRecord> {
    let mut groups: BTreeMap<(StructureKind, usize), Vec<BenchmarkRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.structure, record.size))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .filter_map(|(key, members)| recommend(&members, metric).top.map(|best| (key, best)))
        .collect()
}
