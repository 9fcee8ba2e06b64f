//! Empirical Complexity Analysis
//!
//! Measures one (algorithm, structure) pairing across ascending sizes and
//! labels the observed growth as constant, logarithmic or linear.
//!
//! # Curve Fitting
//! Samples are normalized so the largest magnitude is 1. Each reference
//! curve `f` is then scaled by the least-squares factor
//! `c = Σ y·f / Σ f²` and scored by its residual `Σ (y - c·f)²`. The curve
//! with the smallest residual wins; on equal residuals the slower-growing
//! curve is kept.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmKind, ComplexityClass, Result, SearchError};
use crate::data_structures::structure::StructureKind;
use crate::optimization::parallel::CancellationToken;
use crate::validation::benchmarks::{BenchmarkConfig, BenchmarkRecord, BenchmarkRunner, TargetPolicy};

/// Minimum number of sizes needed for a meaningful fit
pub const MIN_TREND_SIZES: usize = 3;

/// Quantity sampled at each size
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Mean elapsed time in nanoseconds
    Time,

    /// Mean comparison count
    #[default]
    Comparisons,
}

impl TrendMetric {
    fn sample(self, record: &BenchmarkRecord) -> f64 {
        match self {
            TrendMetric::Time => record.average_elapsed.as_nanos() as f64,
            TrendMetric::Comparisons => record.average_comparisons,
        }
    }
}

/// Complexity analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Trials per size
    pub trials: usize,

    pub seed: u64,

    pub metric: TrendMetric,

    pub target_policy: TargetPolicy,

    pub parallel: bool,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            trials: 50,
            seed: 42,
            metric: TrendMetric::default(),
            target_policy: TargetPolicy::default(),
            parallel: false,
        }
    }
}

impl ComplexityConfig {
    /// Size ladder used by the standard analysis
    pub fn standard_sizes() -> Vec<usize> {
        vec![50, 100, 200, 500, 1000, 2000, 5000]
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_metric(mut self, metric: TrendMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// One measured point of a trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    pub size: usize,
    pub value: f64,
}

/// Least-squares fit of one reference curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveFit {
    pub class: ComplexityClass,

    /// Multiplier in the sample's own units (`value ≈ scale · f(n)`)
    pub scale: f64,

    /// Sum of squared residuals over the normalized samples
    pub residual: f64,
}

impl CurveFit {
    /// Fitted curve value at `size`
    pub fn predict(&self, size: usize) -> f64 {
        self.scale * self.class.evaluate(size as f64)
    }
}

/// Observed growth of one pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityTrend {
    pub algorithm: AlgorithmKind,
    pub structure: StructureKind,
    pub metric: TrendMetric,

    /// Samples in ascending size order
    pub samples: Vec<TrendSample>,

    /// Best-fitting class; `None` only when fewer than three samples exist
    pub fitted: Option<ComplexityClass>,

    /// Every candidate curve in order of increasing growth
    pub fits: Vec<CurveFit>,

    pub cancelled: bool,
}

impl ComplexityTrend {
    /// Fit record of the chosen class
    pub fn best(&self) -> Option<&CurveFit> {
        let fitted = self.fitted?;
        self.fits.iter().find(|fit| fit.class == fitted)
    }

    /// Whether the observed class matches the algorithm's average case
    pub fn matches_theory(&self) -> bool {
        self.fitted == Some(self.algorithm.complexity().average_case)
    }
}

/// Fits every reference curve to the samples
pub fn fit_curves(samples: &[TrendSample]) -> Vec<CurveFit> {
    let peak = samples.iter().map(|s| s.value.abs()).fold(0.0_f64, f64::max);
    let norm = if peak > 0.0 { peak } else { 1.0 };

    ComplexityClass::ALL
        .iter()
        .map(|&class| {
            let mut sum_yf = 0.0;
            let mut sum_ff = 0.0;
            for sample in samples {
                let f = class.evaluate(sample.size as f64);
                sum_yf += sample.value / norm * f;
                sum_ff += f * f;
            }
            let c = if sum_ff > 0.0 { sum_yf / sum_ff } else { 0.0 };
            let residual = samples
                .iter()
                .map(|sample| {
                    let diff = sample.value / norm - c * class.evaluate(sample.size as f64);
                    diff * diff
                })
                .sum();
            CurveFit {
                class,
                scale: c * norm,
                residual,
            }
        })
        .collect()
}

/// Smallest residual; ties keep the earlier, slower-growing curve
pub fn best_fit(fits: &[CurveFit]) -> Option<ComplexityClass> {
    let mut best: Option<&CurveFit> = None;
    for fit in fits {
        match best {
            Some(current) if fit.residual >= current.residual => {}
            _ => best = Some(fit),
        }
    }
    best.map(|fit| fit.class)
}

/// Runs size sweeps and labels their growth
#[derive(Debug, Clone, Default)]
pub struct ComplexityAnalyzer {
    config: ComplexityConfig,
}

impl ComplexityAnalyzer {
    pub fn new(config: ComplexityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComplexityConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        algorithm: AlgorithmKind,
        structure: StructureKind,
        sizes: &[usize],
    ) -> Result<ComplexityTrend> {
        self.analyze_with_cancellation(algorithm, structure, sizes, &CancellationToken::new())
    }

    /// Cancellation keeps the samples measured so far
    pub fn analyze_with_cancellation(
        &self,
        algorithm: AlgorithmKind,
        structure: StructureKind,
        sizes: &[usize],
        token: &CancellationToken,
    ) -> Result<ComplexityTrend> {
        validate_sizes(sizes)?;
        if !algorithm.supports(structure) {
            return Err(SearchError::unsupported(
                algorithm,
                structure,
                "pairing is not implemented",
            ));
        }

        let runner = BenchmarkRunner::new(
            BenchmarkConfig::default()
                .with_algorithms([algorithm])
                .with_structures([structure])
                .with_sizes(sizes.iter().copied())
                .with_trials(self.config.trials)
                .with_seed(self.config.seed)
                .with_target_policy(self.config.target_policy)
                .with_parallel(self.config.parallel),
        )?;

        info!(
            "Analyzing {} search on {} over {} sizes",
            algorithm,
            structure,
            sizes.len()
        );
        let mut samples = Vec::with_capacity(sizes.len());
        let mut cancelled = false;
        for &size in sizes {
            if token.is_cancelled() {
                cancelled = true;
                break;
            }
            match runner.measure_with_cancellation(algorithm, structure, size, token)? {
                Some(record) => samples.push(TrendSample {
                    size,
                    value: self.config.metric.sample(&record),
                }),
                None => {
                    cancelled = true;
                    break;
                }
            }
        }

        let (fits, fitted) = if samples.len() >= MIN_TREND_SIZES {
            let fits = fit_curves(&samples);
            let fitted = best_fit(&fits);
            (fits, fitted)
        } else {
            (Vec::new(), None)
        };
        debug!(
            "{} on {}: fitted {:?} from {} sample(s)",
            algorithm,
            structure,
            fitted,
            samples.len()
        );

        Ok(ComplexityTrend {
            algorithm,
            structure,
            metric: self.config.metric,
            samples,
            fitted,
            fits,
            cancelled,
        })
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < MIN_TREND_SIZES {
        return Err(SearchError::InvalidInput(format!(
            "at least {} sizes are required, got {}",
            MIN_TREND_SIZES,
            sizes.len()
        )));
    }
    if sizes.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(SearchError::InvalidInput(
            "sizes must be distinct and ascending".into(),
        ));
    }
    if sizes[0] == 0 {
        return Err(SearchError::EmptyStructure(
            "trend sizes must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Analyzes with the default configuration
pub fn analyze_complexity(
    algorithm: AlgorithmKind,
    structure: StructureKind,
    sizes: &[usize],
) -> Result<ComplexityTrend> {
    ComplexityAnalyzer::default().analyze(algorithm, structure, sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(usize, f64)]) -> Vec<TrendSample> {
        points
            .iter()
            .map(|&(size, value)| TrendSample { size, value })
            .collect()
    }

    #[test]
    fn test_linear_search_grows_linearly() {
        let _ = env_logger::builder().is_test(true).try_init();
        let trend = analyze_complexity(AlgorithmKind::Linear, StructureKind::Array, &[10, 100, 1000]).unwrap();

        assert_eq!(trend.fitted, Some(ComplexityClass::Linear));
        assert_eq!(trend.samples.len(), 3);
        assert_eq!(trend.fits.len(), 3);
        assert!(trend.matches_theory());
        assert!(!trend.cancelled);
    }

    #[test]
    fn test_binary_search_grows_logarithmically() {
        let trend = analyze_complexity(
            AlgorithmKind::Binary,
            StructureKind::Array,
            &ComplexityConfig::standard_sizes(),
        )
        .unwrap();
        assert_eq!(trend.fitted, Some(ComplexityClass::Logarithmic));
    }

    #[test]
    fn test_random_bst_grows_logarithmically() {
        let trend = analyze_complexity(
            AlgorithmKind::Bst,
            StructureKind::BinarySearchTree,
            &ComplexityConfig::standard_sizes(),
        )
        .unwrap();
        assert_eq!(trend.fitted, Some(ComplexityClass::Logarithmic));
    }

    #[test]
    fn test_linked_list_scan_under_time_metric() {
        let analyzer = ComplexityAnalyzer::new(
            ComplexityConfig::default()
                .with_metric(TrendMetric::Time)
                .with_trials(10),
        );
        let trend = analyzer
            .analyze(AlgorithmKind::Linear, StructureKind::LinkedList, &[10, 50, 250])
            .unwrap();
        assert_eq!(trend.metric, TrendMetric::Time);
        assert_eq!(trend.samples.len(), 3);
        assert!(trend.fitted.is_some());
    }

    #[test]
    fn test_comparisons_are_the_default_metric() {
        assert_eq!(TrendMetric::default(), TrendMetric::Comparisons);
        let config: ComplexityConfig = serde_json::from_str(r#"{ "trials": 5 }"#).unwrap();
        assert_eq!(config.metric, TrendMetric::Comparisons);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_size_validation() {
        assert!(matches!(
            analyze_complexity(AlgorithmKind::Linear, StructureKind::Array, &[10, 100]),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_complexity(AlgorithmKind::Linear, StructureKind::Array, &[10, 10, 100]),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_complexity(AlgorithmKind::Linear, StructureKind::Array, &[100, 10, 1000]),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            analyze_complexity(AlgorithmKind::Binary, StructureKind::LinkedList, &[10, 100, 1000]),
            Err(SearchError::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn test_cancelled_analysis_has_no_label() {
        let token = CancellationToken::new();
        token.cancel();
        let trend = ComplexityAnalyzer::default()
            .analyze_with_cancellation(AlgorithmKind::Linear, StructureKind::Array, &[10, 20, 30], &token)
            .unwrap();
        assert!(trend.cancelled);
        assert!(trend.samples.is_empty());
        assert_eq!(trend.fitted, None);
        assert!(trend.best().is_none());
    }

    #[test]
    fn test_fit_prefers_exact_curve() {
        let linear = samples(&[(10, 20.0), (100, 200.0), (1000, 2000.0)]);
        let fits = fit_curves(&linear);
        assert_eq!(best_fit(&fits), Some(ComplexityClass::Linear));
        let exact = fits.iter().find(|f| f.class == ComplexityClass::Linear).unwrap();
        assert!(exact.residual < 1e-12);
        assert!((exact.scale - 2.0).abs() < 1e-9);
        assert!((exact.predict(500) - 1000.0).abs() < 1e-6);

        let flat = samples(&[(10, 4.0), (100, 4.0), (1000, 4.0)]);
        assert_eq!(best_fit(&fit_curves(&flat)), Some(ComplexityClass::Constant));

        let log = samples(&[(15, 4.0), (255, 8.0), (4095, 12.0)]);
        assert_eq!(best_fit(&fit_curves(&log)), Some(ComplexityClass::Logarithmic));
    }

    #[test]
    fn test_all_zero_samples_are_constant() {
        let zeros = samples(&[(10, 0.0), (100, 0.0), (1000, 0.0)]);
        let fits = fit_curves(&zeros);
        assert!(fits.iter().all(|f| f.residual == 0.0));
        assert_eq!(best_fit(&fits), Some(ComplexityClass::Constant));
    }
}
