//! Benchmarking Framework for the Search Observatory
//!
//! Runs every (algorithm, structure, size) combination of a configuration
//! for a fixed number of independent trials and aggregates elapsed time and
//! comparison counts into `BenchmarkRecord`s.
//!
//! # Reproducibility
//! Every trial draws its data and target from its own ChaCha generator
//! seeded from `(seed, algorithm, structure, size, trial)`. Trials never
//! share state, so running them in parallel changes nothing but wall-clock
//! time, and aggregates are folded in trial order. Comparison statistics
//! are therefore identical across runs with the same configuration; only
//! timings vary.
//!
//! # Failure Handling
//! Unsupported pairings are collected in the report instead of aborting
//! the batch. Any other error inside a trial aborts that trial alone; an
//! aborted trial whose target was drawn from the data counts against the
//! success rate.

use std::time::Duration;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmKind, Result, SearchError};
use crate::data_structures::structure::{Structure, StructureKind};
use crate::execution::recorder::SearchResult;
use crate::execution::trace::SearchRun;
use crate::optimization::parallel::{run_units, CancellationToken};

/// Smallest upper bound for generated values, matching a 1..=100 palette
const MIN_VALUE_CEILING: i64 = 100;

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// How benchmark targets are chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPolicy {
    /// Probability that a trial's target is drawn from the data (0.0-1.0)
    pub present_probability: f64,
}

impl Default for TargetPolicy {
    fn default() -> Self {
        Self::balanced()
    }
}

impl TargetPolicy {
    pub fn balanced() -> Self {
        Self {
            present_probability: 0.5,
        }
    }

    pub fn always_present() -> Self {
        Self {
            present_probability: 1.0,
        }
    }

    pub fn never_present() -> Self {
        Self {
            present_probability: 0.0,
        }
    }
}

/// Benchmark batch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub algorithms: Vec<AlgorithmKind>,

    pub structures: Vec<StructureKind>,

    /// Structure sizes, each benchmarked independently
    pub sizes: Vec<usize>,

    /// Trials per combination
    pub trials: usize,

    pub target_policy: TargetPolicy,

    /// Base seed for every per-trial generator
    pub seed: u64,

    /// Run the trials of a combination on the rayon pool
    pub parallel: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            algorithms: AlgorithmKind::ALL.to_vec(),
            structures: StructureKind::ALL.to_vec(),
            sizes: vec![10, 100, 1000],
            trials: 100,
            target_policy: TargetPolicy::default(),
            seed: 42,
            parallel: false,
        }
    }
}

impl BenchmarkConfig {
    /// Standard suite: every pairing at 100, 500, 1000 and 2000 elements
    pub fn standard() -> Self {
        Self {
            sizes: vec![100, 500, 1000, 2000],
            trials: 50,
            ..Self::default()
        }
    }

    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = AlgorithmKind>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    pub fn with_structures(mut self, structures: impl IntoIterator<Item = StructureKind>) -> Self {
        self.structures = structures.into_iter().collect();
        self
    }

    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parses a JSON configuration; omitted fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(SearchError::InvalidInput("no algorithms selected".into()));
        }
        if self.structures.is_empty() {
            return Err(SearchError::InvalidInput("no structures selected".into()));
        }
        if self.sizes.is_empty() {
            return Err(SearchError::InvalidInput("no sizes selected".into()));
        }
        if self.sizes.contains(&0) {
            return Err(SearchError::EmptyStructure(
                "benchmark sizes must be at least 1".into(),
            ));
        }
        if self.trials == 0 {
            return Err(SearchError::InvalidInput("trial count must be at least 1".into()));
        }
        let p = self.target_policy.present_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SearchError::InvalidInput(format!(
                "present probability {} is outside [0, 1]",
                p
            )));
        }
        Ok(())
    }
}

/// Aggregated statistics for one (algorithm, structure, size) combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub algorithm: AlgorithmKind,
    pub structure: StructureKind,
    pub size: usize,

    /// Trials attempted, aborted ones included
    pub trials: usize,

    pub average_elapsed: Duration,
    pub average_comparisons: f64,

    /// Found targets among `present_trials`; 0.0 when no target was present
    pub success_rate: f64,

    /// Completed trials with the correct verdict (found iff present) divided by `trials`
    pub verdict_accuracy: f64,

    pub min_elapsed: Duration,
    pub max_elapsed: Duration,
    pub median_elapsed: Duration,
    pub min_comparisons: usize,
    pub max_comparisons: usize,
    pub median_comparisons: f64,

    /// Trials whose target was drawn from the data, aborted ones included
    pub present_trials: usize,

    /// Completed trials with a present target that was found
    pub found_trials: usize,

    /// Trials aborted by an error before producing a result
    pub aborted_trials: usize,
}

/// Records plus per-combination failures of one batch
#[derive(Debug, Default)]
pub struct BenchmarkReport {
    pub records: Vec<BenchmarkRecord>,

    /// Pairings skipped as unsupported, or otherwise not measurable
    pub skipped: Vec<SearchError>,

    /// Set when the batch stopped early; `records` holds finished combinations
    pub cancelled: bool,
}

impl BenchmarkReport {
    /// Cancellation as an error value, if the batch was cancelled
    pub fn cancellation(&self) -> Option<SearchError> {
        self.cancelled.then(|| SearchError::BenchmarkCancelled {
            completed: self.records.len(),
        })
    }
}

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrialOutcome {
    Completed {
        elapsed: Duration,
        comparisons: usize,
        present: bool,
        found: bool,
    },
    /// `present` is the target decision made before the failure
    Aborted { present: bool },
}

/// Executes benchmark batches described by a `BenchmarkConfig`
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs every configured combination
    pub fn run(&self) -> BenchmarkReport {
        self.run_with_cancellation(&CancellationToken::new())
    }

    /// Runs every configured combination, stopping early once `token` fires
    pub fn run_with_cancellation(&self, token: &CancellationToken) -> BenchmarkReport {
        let mut report = BenchmarkReport::default();

        'batch: for &algorithm in &self.config.algorithms {
            for &structure in &self.config.structures {
                if !algorithm.supports(structure) {
                    let skipped = unsupported_pairing(algorithm, structure);
                    warn!("Skipping combination: {}", skipped);
                    report.skipped.push(skipped);
                    continue;
                }
                for &size in &self.config.sizes {
                    if token.is_cancelled() {
                        report.cancelled = true;
                        break 'batch;
                    }
                    match self.measure_with_cancellation(algorithm, structure, size, token) {
                        Ok(Some(record)) => report.records.push(record),
                        Ok(None) => {
                            report.cancelled = true;
                            break 'batch;
                        }
                        Err(err) => {
                            warn!("Skipping combination: {}", err);
                            report.skipped.push(err);
                        }
                    }
                }
            }
        }

        if report.cancelled {
            info!(
                "Benchmark cancelled after {} completed combination(s)",
                report.records.len()
            );
        } else {
            info!(
                "Benchmark finished: {} record(s), {} skipped",
                report.records.len(),
                report.skipped.len()
            );
        }
        report
    }

    /// Benchmarks a single combination with the configured trials and policy
    pub fn measure(
        &self,
        algorithm: AlgorithmKind,
        structure: StructureKind,
        size: usize,
    ) -> Result<BenchmarkRecord> {
        let token = CancellationToken::new();
        self.measure_with_cancellation(algorithm, structure, size, &token)?
            .ok_or(SearchError::BenchmarkCancelled { completed: 0 })
    }

    /// `Ok(None)` when cancellation interrupted the combination
    pub(crate) fn measure_with_cancellation(
        &self,
        algorithm: AlgorithmKind,
        structure: StructureKind,
        size: usize,
        token: &CancellationToken,
    ) -> Result<Option<BenchmarkRecord>> {
        if !algorithm.supports(structure) {
            return Err(unsupported_pairing(algorithm, structure));
        }
        if size == 0 {
            return Err(SearchError::EmptyStructure(format!(
                "cannot benchmark {} on an empty {}",
                algorithm, structure
            )));
        }

        info!(
            "Benchmarking {} search on {} (n = {}, {} trials)",
            algorithm, structure, size, self.config.trials
        );
        let batch = run_units(self.config.trials, self.config.parallel, token, |trial| {
            self.run_trial(algorithm, structure, size, trial)
        });
        if batch.cancelled {
            return Ok(None);
        }
        Ok(Some(aggregate(algorithm, structure, size, &batch.completed)))
    }

    fn run_trial(
        &self,
        algorithm: AlgorithmKind,
        structure: StructureKind,
        size: usize,
        trial: usize,
    ) -> TrialOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(trial_seed(
            self.config.seed,
            algorithm,
            structure,
            size,
            trial,
        ));
        let ceiling = value_ceiling(size);
        let mut values = generate_values(&mut rng, structure, size, ceiling);
        if algorithm.requires_sorted_input() {
            values.sort_unstable();
        }

        let present = rng.gen_bool(self.config.target_policy.present_probability);
        match execute_trial(&mut rng, algorithm, structure, values, present, ceiling) {
            Ok(result) => {
                debug!(
                    "Trial {}: present={} found={} comparisons={}",
                    trial, present, result.found, result.comparisons
                );
                TrialOutcome::Completed {
                    elapsed: result.elapsed,
                    comparisons: result.comparisons,
                    present,
                    found: result.found,
                }
            }
            Err(err) => {
                warn!(
                    "Trial {} of {} on {} (n = {}) aborted: {}",
                    trial, algorithm, structure, size, err
                );
                TrialOutcome::Aborted { present }
            }
        }
    }
}

/// Picks the target, builds the structure and drains one search
fn execute_trial(
    rng: &mut ChaCha8Rng,
    algorithm: AlgorithmKind,
    structure: StructureKind,
    values: Vec<i64>,
    present: bool,
    ceiling: i64,
) -> Result<SearchResult> {
    let target = if present {
        *values.choose(rng).ok_or_else(|| {
            SearchError::EmptyStructure(format!("no values generated for {}", structure))
        })?
    } else {
        rng.gen_range(ceiling + 1..=ceiling * 2)
    };

    let instance = if algorithm.requires_sorted_input() {
        Structure::build_sorted(structure, values)?
    } else {
        Structure::build(structure, values)?
    };
    SearchRun::new(&instance, algorithm, target)?.result()
}

fn unsupported_pairing(algorithm: AlgorithmKind, structure: StructureKind) -> SearchError {
    SearchError::unsupported(algorithm, structure, "pairing is not implemented")
}

/// Upper bound of generated values; absent targets are drawn above it
fn value_ceiling(size: usize) -> i64 {
    (size as i64).saturating_mul(2).max(MIN_VALUE_CEILING)
}

/// Random data in `1..=ceiling`; trees receive distinct values in random order
fn generate_values(rng: &mut ChaCha8Rng, structure: StructureKind, size: usize, ceiling: i64) -> Vec<i64> {
    match structure {
        StructureKind::BinarySearchTree => rand::seq::index::sample(rng, ceiling as usize, size)
            .into_iter()
            .map(|i| i as i64 + 1)
            .collect(),
        StructureKind::Array | StructureKind::LinkedList => {
            (0..size).map(|_| rng.gen_range(1..=ceiling)).collect()
        }
    }
}

/// FNV-1a over the trial coordinates
fn trial_seed(
    base: u64,
    algorithm: AlgorithmKind,
    structure: StructureKind,
    size: usize,
    trial: usize,
) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for word in [base, algorithm as u64, structure as u64, size as u64, trial as u64] {
        for byte in word.to_le_bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    }
    hash
}

fn aggregate(
    algorithm: AlgorithmKind,
    structure: StructureKind,
    size: usize,
    outcomes: &[TrialOutcome],
) -> BenchmarkRecord {
    let trials = outcomes.len();
    let mut elapsed = Vec::with_capacity(trials);
    let mut comparisons = Vec::with_capacity(trials);
    let mut present_trials = 0;
    let mut found_trials = 0;
    let mut correct_verdicts = 0;

    for outcome in outcomes {
        match *outcome {
            TrialOutcome::Completed {
                elapsed: e,
                comparisons: c,
                present,
                found,
            } => {
                elapsed.push(e);
                comparisons.push(c);
                present_trials += usize::from(present);
                found_trials += usize::from(present && found);
                correct_verdicts += usize::from(present == found);
            }
            TrialOutcome::Aborted { present } => present_trials += usize::from(present),
        }
    }
    let aborted_trials = trials - elapsed.len();
    let measured = elapsed.len();

    let total_nanos: u128 = elapsed.iter().map(Duration::as_nanos).sum();
    let total_comparisons: usize = comparisons.iter().sum();

    elapsed.sort_unstable();
    comparisons.sort_unstable();

    BenchmarkRecord {
        algorithm,
        structure,
        size,
        trials,
        average_elapsed: if measured == 0 {
            Duration::ZERO
        } else {
            nanos_to_duration(total_nanos / measured as u128)
        },
        average_comparisons: if measured == 0 {
            0.0
        } else {
            total_comparisons as f64 / measured as f64
        },
        success_rate: if present_trials == 0 {
            0.0
        } else {
            found_trials as f64 / present_trials as f64
        },
        verdict_accuracy: if trials == 0 {
            0.0
        } else {
            correct_verdicts as f64 / trials as f64
        },
        min_elapsed: elapsed.first().copied().unwrap_or_default(),
        max_elapsed: elapsed.last().copied().unwrap_or_default(),
        median_elapsed: median_duration(&elapsed),
        min_comparisons: comparisons.first().copied().unwrap_or_default(),
        max_comparisons: comparisons.last().copied().unwrap_or_default(),
        median_comparisons: median_count(&comparisons),
        present_trials,
        found_trials,
        aborted_trials,
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn median_duration(sorted: &[Duration]) -> Duration {
    match sorted.len() {
        0 => Duration::ZERO,
        n if n % 2 == 1 => sorted[n / 2],
        n => nanos_to_duration((sorted[n / 2 - 1].as_nanos() + sorted[n / 2].as_nanos()) / 2),
    }
}

fn median_count(sorted: &[usize]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2] as f64,
        n => (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0,
    }
}

/// Runs a validated configuration to completion
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    Ok(BenchmarkRunner::new(config.clone())?.run())
}
