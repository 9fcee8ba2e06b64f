//! Parallel trial execution with cooperative cancellation
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parallel;

pub use self::parallel::{run_units, CancellationToken, UnitBatch};
