//! Contiguous searchable array with indexed access

use crate::algorithm::traits::{Position, Result, SearchError};

/// Read-only array exposing indexed reads and its ordering guarantee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchArray<T> {
    values: Vec<T>,

    /// Ascending order holds for `values`
    sorted: bool,
}

impl<T: Ord> SearchArray<T> {
    /// Wraps `values` as given, recording whether they happen to be ascending
    pub fn new(values: Vec<T>) -> Self {
        let sorted = is_ascending(&values);
        Self { values, sorted }
    }

    /// Wraps `values`, rejecting input that is not in ascending order
    pub fn new_sorted(values: Vec<T>) -> Result<Self> {
        if let Some(at) = first_descent(&values) {
            return Err(SearchError::InvalidInput(format!(
                "values must be ascending for a sorted array (descent at index {})",
                at
            )));
        }
        Ok(Self {
            values,
            sorted: true,
        })
    }
}

impl<T> SearchArray<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Elements in index order paired with their positions
    pub fn positions(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (Position::Index(i), v))
    }
}

fn is_ascending<T: Ord>(values: &[T]) -> bool {
    first_descent(values).is_none()
}

/// Index of the first element smaller than its predecessor
fn first_descent<T: Ord>(values: &[T]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[0] > pair[1])
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sortedness_detection() {
        assert!(SearchArray::new(vec![1, 2, 2, 5]).is_sorted());
        assert!(!SearchArray::new(vec![4, 2, 9, 1]).is_sorted());
        assert!(SearchArray::<i32>::new(Vec::new()).is_sorted());
    }

    #[test]
    fn test_sorted_construction_rejects_descent() {
        let err = SearchArray::new_sorted(vec![1, 3, 2]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(ref msg) if msg.contains("index 2")));
        assert!(SearchArray::new_sorted(vec![1, 1, 3]).is_ok());
    }

    #[test]
    fn test_positions_follow_index_order() {
        let array = SearchArray::new(vec![7, 8]);
        let positions: Vec<_> = array.positions().map(|(p, v)| (p, *v)).collect();
        assert_eq!(positions, vec![(Position::Index(0), 7), (Position::Index(1), 8)]);
        assert_eq!(array.get(1), Some(&8));
        assert_eq!(array.get(2), None);
    }
}
