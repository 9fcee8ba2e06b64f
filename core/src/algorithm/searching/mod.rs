//! Instrumented search algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod binary;
pub mod bst;
pub mod linear;

pub use self::binary::BinarySearch;
pub use self::bst::BstSearch;
pub use self::linear::LinearSearch;
