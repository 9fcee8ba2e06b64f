//! Singly linked list supporting head-to-tail traversal only
//!
//! Clone, comparison, formatting and drop all walk the chain with a loop,
//! so list length is never bounded by stack depth.

use std::fmt;

use crate::algorithm::traits::Position;

/// List node owning its successor
pub struct ListNode<T> {
    value: T,
    next: Option<Box<ListNode<T>>>,
}

impl<T> ListNode<T> {
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn next(&self) -> Option<&ListNode<T>> {
        self.next.as_deref()
    }
}

/// Shows the value and whether a successor exists, never the tail
impl<T: fmt::Debug> fmt::Debug for ListNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListNode")
            .field("value", &self.value)
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Immutable singly linked list
pub struct SearchList<T> {
    head: Option<Box<ListNode<T>>>,
    len: usize,
}

impl<T> SearchList<T> {
    /// Links `values` in their given order
    pub fn new(values: Vec<T>) -> Self {
        let len = values.len();
        let head = values
            .into_iter()
            .rev()
            .fold(None, |next, value| Some(Box::new(ListNode { value, next })));
        Self { head, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn head(&self) -> Option<&ListNode<T>> {
        self.head.as_deref()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self.head() }
    }

    /// Elements head to tail paired with their offsets
    pub fn positions(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.iter()
            .enumerate()
            .map(|(offset, v)| (Position::Offset(offset), v))
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: Clone> Clone for SearchList<T> {
    fn clone(&self) -> Self {
        Self::new(self.to_vec())
    }
}

impl<T: PartialEq> PartialEq for SearchList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SearchList<T> {}

impl<T: fmt::Debug> fmt::Debug for SearchList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Drop for SearchList<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Borrowing head-to-tail iterator
pub struct Iter<'a, T> {
    next: Option<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next();
            &node.value
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_preserves_order() {
        let list = SearchList::new(vec![4, 2, 9, 1]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.to_vec(), vec![4, 2, 9, 1]);
        assert_eq!(list.head().map(|n| *n.value()), Some(4));
        assert_eq!(list.head().and_then(|n| n.next()).map(|n| *n.value()), Some(2));
    }

    #[test]
    fn test_positions_are_offsets() {
        let list = SearchList::new(vec!['a', 'b']);
        let offsets: Vec<_> = list.positions().map(|(p, _)| p).collect();
        assert_eq!(offsets, vec![Position::Offset(0), Position::Offset(1)]);
    }

    #[test]
    fn test_long_list_drops_without_recursion() {
        let list = SearchList::new((0..200_000).collect());
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn test_long_list_clones_compares_and_formats() {
        let list: SearchList<u32> = SearchList::new((0..200_000).collect());
        let copy = list.clone();
        assert_eq!(copy.len(), 200_000);
        assert_eq!(copy, list);

        let formatted = format!("{:?}", copy);
        assert!(formatted.starts_with("[0, 1, 2"));
        assert!(formatted.ends_with("199999]"));

        assert_ne!(SearchList::new(vec![1, 2]), SearchList::new(vec![1, 3]));
        assert_ne!(SearchList::new(vec![1, 2]), SearchList::new(vec![1, 2, 3]));
        assert_eq!(format!("{:?}", SearchList::new(vec![7, 8])), "[7, 8]");
        assert_eq!(
            format!("{:?}", list.head().unwrap()),
            "ListNode { value: 0, has_next: true }"
        );
    }
}
