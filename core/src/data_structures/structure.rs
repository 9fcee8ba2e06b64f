//! Uniform adapter over the searchable structures
//!
//! `Structure` is a closed tagged variant over the three supported
//! containers. Each variant reports a fixed capability table which search
//! algorithms consult before emitting a single step, so incompatible
//! pairings fail with `UnsupportedCombination` instead of misbehaving.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{Position, Result, SearchError};
use crate::data_structures::array::SearchArray;
use crate::data_structures::linked_list::SearchList;
use crate::data_structures::search_tree::SearchTree;

/// Structure kind identifier
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Array,
    LinkedList,
    BinarySearchTree,
}

impl StructureKind {
    pub const ALL: [StructureKind; 3] = [
        StructureKind::Array,
        StructureKind::LinkedList,
        StructureKind::BinarySearchTree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::LinkedList => "linked_list",
            StructureKind::BinarySearchTree => "binary_search_tree",
        }
    }
}

impl Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(StructureKind::Array),
            "linked_list" | "list" => Ok(StructureKind::LinkedList),
            "binary_search_tree" | "bst" | "tree" => Ok(StructureKind::BinarySearchTree),
            other => Err(SearchError::InvalidInput(format!(
                "unknown structure kind '{}'",
                other
            ))),
        }
    }
}

/// Access patterns a structure supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Constant-time indexed reads
    pub random_access: bool,

    /// Sequential traversal in natural position order
    pub ordered_traversal: bool,

    /// Root and left/right child navigation
    pub tree_navigation: bool,

    /// Elements are guaranteed ascending in position order
    pub sorted: bool,
}

/// Searchable structure snapshot, immutable once built
#[derive(Debug, Clone)]
pub enum Structure<T> {
    Array(SearchArray<T>),
    LinkedList(SearchList<T>),
    BinarySearchTree(SearchTree<T>),
}

impl<T: Ord + Clone + Debug> Structure<T> {
    /// Builds a structure of `kind` over `values` in their given order
    ///
    /// Arrays record whether the values happen to be ascending; a BST
    /// rejects duplicate values.
    pub fn build(kind: StructureKind, values: Vec<T>) -> Result<Self> {
        let len = values.len();
        let structure = match kind {
            StructureKind::Array => Structure::Array(SearchArray::new(values)),
            StructureKind::LinkedList => Structure::LinkedList(SearchList::new(values)),
            StructureKind::BinarySearchTree => {
                Structure::BinarySearchTree(SearchTree::from_values(values)?)
            }
        };
        debug!("Built {} with {} element(s)", kind, len);
        Ok(structure)
    }

    /// Builds a structure whose values must already be ascending
    ///
    /// Input is never sorted on the caller's behalf; out-of-order values
    /// fail with `InvalidInput`.
    pub fn build_sorted(kind: StructureKind, values: Vec<T>) -> Result<Self> {
        let len = values.len();
        let structure = match kind {
            StructureKind::Array => Structure::Array(SearchArray::new_sorted(values)?),
            StructureKind::LinkedList => {
                if let Some(at) = values.windows(2).position(|pair| pair[0] > pair[1]) {
                    return Err(SearchError::InvalidInput(format!(
                        "values must be ascending for a sorted list (descent at offset {})",
                        at + 1
                    )));
                }
                Structure::LinkedList(SearchList::new(values))
            }
            StructureKind::BinarySearchTree => {
                Structure::BinarySearchTree(SearchTree::from_values(values)?)
            }
        };
        debug!("Built sorted {} with {} element(s)", kind, len);
        Ok(structure)
    }
}

impl<T> Structure<T> {
    pub fn kind(&self) -> StructureKind {
        match self {
            Structure::Array(_) => StructureKind::Array,
            Structure::LinkedList(_) => StructureKind::LinkedList,
            Structure::BinarySearchTree(_) => StructureKind::BinarySearchTree,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Structure::Array(array) => Capabilities {
                random_access: true,
                ordered_traversal: true,
                tree_navigation: false,
                sorted: array.is_sorted(),
            },
            Structure::LinkedList(_) => Capabilities {
                random_access: false,
                ordered_traversal: true,
                tree_navigation: false,
                sorted: false,
            },
            Structure::BinarySearchTree(_) => Capabilities {
                random_access: false,
                ordered_traversal: false,
                tree_navigation: true,
                sorted: true,
            },
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Structure::Array(array) => array.len(),
            Structure::LinkedList(list) => list.len(),
            Structure::BinarySearchTree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_array(&self) -> Option<&SearchArray<T>> {
        match self {
            Structure::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&SearchList<T>> {
        match self {
            Structure::LinkedList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&SearchTree<T>> {
        match self {
            Structure::BinarySearchTree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Elements in natural position order, for sequential structures only
    pub fn sequential(&self) -> Option<Box<dyn Iterator<Item = (Position, &T)> + '_>> {
        match self {
            Structure::Array(array) => Some(Box::new(array.positions())),
            Structure::LinkedList(list) => Some(Box::new(list.positions())),
            Structure::BinarySearchTree(_) => None,
        }
    }

    /// All values, in position order for sequences and ascending for trees
    pub fn values(&self) -> Vec<&T> {
        match self {
            Structure::Array(array) => array.as_slice().iter().collect(),
            Structure::LinkedList(list) => list.iter().collect(),
            Structure::BinarySearchTree(tree) => tree.inorder(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_each_kind() {
        for kind in StructureKind::ALL {
            let structure = Structure::build(kind, vec![5, 3, 8]).unwrap();
            assert_eq!(structure.kind(), kind);
            assert_eq!(structure.len(), 3);
        }
    }

    #[test]
    fn test_capability_table() {
        let array = Structure::build(StructureKind::Array, vec![1, 2, 3]).unwrap();
        let caps = array.capabilities();
        assert!(caps.random_access && caps.ordered_traversal && caps.sorted);
        assert!(!caps.tree_navigation);

        let list = Structure::build(StructureKind::LinkedList, vec![1, 2, 3]).unwrap();
        assert!(!list.capabilities().random_access);
        assert!(list.capabilities().ordered_traversal);

        let tree = Structure::build(StructureKind::BinarySearchTree, vec![2, 1, 3]).unwrap();
        assert!(tree.capabilities().tree_navigation);
        assert!(!tree.capabilities().ordered_traversal);
    }

    #[test]
    fn test_sorted_build_never_reorders() {
        assert!(matches!(
            Structure::build_sorted(StructureKind::Array, vec![3, 1, 2]),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            Structure::build_sorted(StructureKind::LinkedList, vec![1, 0]),
            Err(SearchError::InvalidInput(_))
        ));
        let unsorted = Structure::build(StructureKind::Array, vec![3, 1, 2]).unwrap();
        assert!(!unsorted.capabilities().sorted);
        assert_eq!(unsorted.values(), vec![&3, &1, &2]);
    }

    #[test]
    fn test_duplicate_tree_values_rejected() {
        assert!(matches!(
            Structure::build(StructureKind::BinarySearchTree, vec![1, 1]),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deep_structures_clone_and_format() {
        use crate::algorithm::traits::AlgorithmKind;
        use crate::execution::trace::SearchRun;

        let list = Structure::build(StructureKind::LinkedList, (0..200_000).collect()).unwrap();
        let list_copy = list.clone();
        assert_eq!(list_copy.len(), 200_000);
        assert!(format!("{:?}", list_copy).starts_with("LinkedList([0, 1, 2"));

        let chain = Structure::build(StructureKind::BinarySearchTree, (0..50_000).collect()).unwrap();
        let chain_copy = chain.clone();
        assert_eq!(chain_copy.as_tree().map(|t| t.height()), Some(50_000));

        let run = SearchRun::new(&chain_copy, AlgorithmKind::Bst, 49_999).unwrap();
        assert!(format!("{:?}", run).contains("NodeId(49999): 49999"));
        assert_eq!(run.result().unwrap().comparisons, 50_000);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("bst".parse::<StructureKind>().unwrap(), StructureKind::BinarySearchTree);
        assert_eq!("linked_list".parse::<StructureKind>().unwrap(), StructureKind::LinkedList);
        assert!("heap".parse::<StructureKind>().is_err());
    }
}
