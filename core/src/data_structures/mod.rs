//! Searchable data structures
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod array;
pub mod linked_list;
pub mod search_tree;
pub mod structure;

pub use self::array::SearchArray;
pub use self::linked_list::{ListNode, SearchList};
pub use self::search_tree::{NodeLayout, NodeSide, SearchTree, TreeNode};
pub use self::structure::{Capabilities, Structure, StructureKind};
