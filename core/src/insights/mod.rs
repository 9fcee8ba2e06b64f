//! Insights derived from benchmark results
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod presentation;
pub mod recommendation;

pub use self::presentation::{report_rows, to_json, trend_points, ReportRow, TrendPoint};
pub use self::recommendation::{
    recommend, recommend_by_group, RankedRecord, RankingMetric, Recommendation,
};
