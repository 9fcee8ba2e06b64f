//! Search Observatory Algorithm Framework
//! Instrumented search algorithms sharing one polymorphic contract
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod searching;
pub mod traits;

pub use self::searching::*;
pub use self::traits::*;

/// Registry lookup from identifier to implementation
pub fn resolve<'a, T: Ord + Clone + 'a>(kind: AlgorithmKind) -> &'a dyn SearchAlgorithm<T> {
    match kind {
        AlgorithmKind::Linear => &LinearSearch,
        AlgorithmKind::Binary => &BinarySearch,
        AlgorithmKind::Bst => &BstSearch,
    }
}
