//! Core algorithm trait definitions for the Search Observatory
//!
//! This module establishes the vocabulary shared by every search variant:
//! the error taxonomy, position and outcome tags carried by trace steps,
//! the algorithm registry and the polymorphic `SearchAlgorithm` contract.
//!
//! # Key Design Principles
//! - Closed tagged variants instead of runtime attribute probing
//! - Capability checks performed before any step is emitted
//! - Identical comparison accounting across all variants

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::structure::{Capabilities, Structure, StructureKind};
use crate::execution::recorder::{SearchStep, StepRecorder};

/// Comprehensive error types for search and benchmarking operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty structure: {0}")]
    EmptyStructure(String),

    #[error("{algorithm} search is not supported on {structure}: {reason}")]
    UnsupportedCombination {
        algorithm: AlgorithmKind,
        structure: StructureKind,
        reason: String,
    },

    #[error("Benchmark cancelled after {completed} completed unit(s)")]
    BenchmarkCancelled { completed: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SearchError {
    pub(crate) fn unsupported(
        algorithm: AlgorithmKind,
        structure: StructureKind,
        reason: impl Into<String>,
    ) -> Self {
        SearchError::UnsupportedCombination {
            algorithm,
            structure,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Tree node identifier ensuring type safety and preventing mixing with indices
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Location of an examined element within its structure
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Array index
    Index(usize),

    /// Offset from the head of a linked list
    Offset(usize),

    /// Tree node identifier
    Node(NodeId),
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Index(i) => write!(f, "index {}", i),
            Position::Offset(o) => write!(f, "offset {}", o),
            Position::Node(id) => write!(f, "node {}", id),
        }
    }
}

/// Outcome tag attached to every trace step
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepOutcome {
    /// Element compared and found unequal, search continues
    Visiting,

    /// Element compared and found equal to the target
    Match,

    /// Node compared; its left subtree is discarded
    PrunedLeft,

    /// Node compared; its right subtree is discarded
    PrunedRight,

    /// Nothing left to examine
    Exhausted,
}

impl StepOutcome {
    /// Whether this step stands for one value comparison
    #[inline]
    pub fn is_comparison(self) -> bool {
        !matches!(self, StepOutcome::Exhausted)
    }

    /// Whether the trace ends with this step
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepOutcome::Match | StepOutcome::Exhausted)
    }
}

/// Theoretical growth classes a search can be fitted against
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    /// O(1)
    Constant,

    /// O(log n)
    Logarithmic,

    /// O(n)
    Linear,
}

impl ComplexityClass {
    /// Reference curves in order of increasing growth
    pub const ALL: [ComplexityClass; 3] = [
        ComplexityClass::Constant,
        ComplexityClass::Logarithmic,
        ComplexityClass::Linear,
    ];

    /// Evaluate the reference curve for an input size
    pub fn evaluate(self, n: f64) -> f64 {
        match self {
            ComplexityClass::Constant => 1.0,
            ComplexityClass::Logarithmic => (n + 1.0).log2(),
            ComplexityClass::Linear => n,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComplexityClass::Constant => "constant",
            ComplexityClass::Logarithmic => "logarithmic",
            ComplexityClass::Linear => "linear",
        }
    }

    pub fn big_o(self) -> &'static str {
        match self {
            ComplexityClass::Constant => "O(1)",
            ComplexityClass::Logarithmic => "O(log n)",
            ComplexityClass::Linear => "O(n)",
        }
    }
}

impl Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Algorithm complexity information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub best_case: ComplexityClass,
    pub average_case: ComplexityClass,
    pub worst_case: ComplexityClass,
}

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Linear,
    Binary,
    Bst,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::Linear,
        AlgorithmKind::Binary,
        AlgorithmKind::Bst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Linear => "linear",
            AlgorithmKind::Binary => "binary",
            AlgorithmKind::Bst => "bst",
        }
    }

    /// Static compatibility table between algorithms and structure kinds
    pub fn supports(self, structure: StructureKind) -> bool {
        matches!(
            (self, structure),
            (AlgorithmKind::Linear, StructureKind::Array)
                | (AlgorithmKind::Linear, StructureKind::LinkedList)
                | (AlgorithmKind::Binary, StructureKind::Array)
                | (AlgorithmKind::Bst, StructureKind::BinarySearchTree)
        )
    }

    /// Whether benchmark data for this algorithm must be sorted
    pub fn requires_sorted_input(self) -> bool {
        matches!(self, AlgorithmKind::Binary)
    }

    /// Textbook complexity of the comparison count
    pub fn complexity(self) -> AlgorithmComplexity {
        use ComplexityClass::*;
        match self {
            AlgorithmKind::Linear => AlgorithmComplexity {
                best_case: Constant,
                average_case: Linear,
                worst_case: Linear,
            },
            AlgorithmKind::Binary => AlgorithmComplexity {
                best_case: Constant,
                average_case: Logarithmic,
                worst_case: Logarithmic,
            },
            // Worst case assumes a balanced tree; degenerate chains are linear.
            AlgorithmKind::Bst => AlgorithmComplexity {
                best_case: Constant,
                average_case: Logarithmic,
                worst_case: Logarithmic,
            },
        }
    }
}

impl Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(AlgorithmKind::Linear),
            "binary" => Ok(AlgorithmKind::Binary),
            "bst" | "binary_search_tree" => Ok(AlgorithmKind::Bst),
            other => Err(SearchError::InvalidInput(format!(
                "unknown search algorithm '{}'",
                other
            ))),
        }
    }
}

/// Pull-based cursor producing one trace step per call
///
/// A cursor is created fresh for every trace; it never outlives the
/// structure snapshot it borrows and it is never shared between consumers.
pub trait SearchCursor<T> {
    /// Emits the next step through `recorder`, or `None` once terminal
    fn advance(&mut self, recorder: &mut StepRecorder) -> Option<SearchStep<T>>;
}

/// Main search algorithm contract
///
/// # Invariants
/// - `check_compatibility` is consulted before any cursor is created
/// - Cursors emit exactly one terminal step (`match` or `exhausted`)
/// - Every non-terminal step and every `match` is one comparison
pub trait SearchAlgorithm<T: Ord>: Debug + Send + Sync {
    /// Returns the algorithm's registry identifier
    fn kind(&self) -> AlgorithmKind;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the algorithm's asymptotic complexity
    fn complexity(&self) -> AlgorithmComplexity {
        self.kind().complexity()
    }

    /// Verifies the algorithm can operate on a structure with these capabilities
    fn check_compatibility(&self, kind: StructureKind, capabilities: Capabilities) -> Result<()>;

    /// Creates a fresh cursor over `structure` searching for `target`
    fn cursor<'a>(
        &self,
        structure: &'a Structure<T>,
        target: &'a T,
    ) -> Result<Box<dyn SearchCursor<T> + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_kind_parsing() {
        assert_eq!("linear".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Linear);
        assert_eq!(" Binary ".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Binary);
        assert_eq!("bst".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Bst);
        assert!(matches!(
            "hash".parse::<AlgorithmKind>(),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_compatibility_table() {
        assert!(AlgorithmKind::Linear.supports(StructureKind::Array));
        assert!(AlgorithmKind::Linear.supports(StructureKind::LinkedList));
        assert!(!AlgorithmKind::Linear.supports(StructureKind::BinarySearchTree));
        assert!(AlgorithmKind::Binary.supports(StructureKind::Array));
        assert!(!AlgorithmKind::Binary.supports(StructureKind::LinkedList));
        assert!(AlgorithmKind::Bst.supports(StructureKind::BinarySearchTree));
        assert!(!AlgorithmKind::Bst.supports(StructureKind::Array));
    }

    #[test]
    fn test_outcome_accounting() {
        assert!(StepOutcome::Visiting.is_comparison());
        assert!(StepOutcome::PrunedLeft.is_comparison());
        assert!(StepOutcome::Match.is_comparison());
        assert!(!StepOutcome::Exhausted.is_comparison());
        assert!(StepOutcome::Match.is_terminal());
        assert!(!StepOutcome::PrunedRight.is_terminal());
    }

    #[test]
    fn test_complexity_evaluation() {
        assert_eq!(ComplexityClass::Constant.evaluate(100.0), 1.0);
        assert_eq!(ComplexityClass::Linear.evaluate(10.0), 10.0);
        assert!((ComplexityClass::Logarithmic.evaluate(7.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_node_id_type_safety() {
        let node1 = NodeId(42);
        let node2 = NodeId(42);
        let node3 = NodeId(43);

        assert_eq!(node1, node2);
        assert_ne!(node1, node3);
        assert_eq!(node1.as_usize(), 42);
        assert_eq!(Position::Node(node1).to_string(), "node #42");
    }
}
