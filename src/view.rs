use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::cursor::{Cursor, Position, RevCursor};
use crate::{Arena, NodeAllocator, Tree};

/// A read-only pre-order view of a [`Tree`].
///
/// The view borrows the tree and hands out cursors over it: [`begin`](Self::begin) denotes the
/// root and [`end`](Self::end) lies past the last node. Since the view only ever borrows the
/// tree immutably, the `c`-prefixed variants are the same cursors under a second name.
///
/// This `struct` is created by the [`pre_order`](Tree::pre_order) method on [`Tree`].
///
/// # Examples
///
/// ```
/// use multiway_tree::Tree;
///
/// let mut tree = Tree::with_root('a');
/// let b = tree.append_child(tree.begin(), 'b');
/// tree.append_child(b, 'c');
///
/// let view = tree.pre_order();
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.front(), Some(&'a'));
/// assert_eq!(view.back(), Some(&'c'));
///
/// let mut cursor = view.begin();
/// let mut seen = String::new();
/// while cursor != view.end() {
///     seen.push(*cursor.current().unwrap());
///     cursor.move_next();
/// }
/// assert_eq!(seen, "abc");
/// ```
pub struct PreOrderView<'a, T, A: NodeAllocator<T> = Arena<T>> {
    tree: &'a Tree<T, A>,
}

impl<'a, T, A: NodeAllocator<T>> PreOrderView<'a, T, A> {
    pub(crate) const fn new(tree: &'a Tree<T, A>) -> Self {
        Self { tree }
    }

    /// Returns a cursor at the first node, the root.
    #[must_use]
    pub fn begin(&self) -> Cursor<'a, T, A> {
        Cursor::new(self.tree.allocator(), self.tree.begin())
    }

    /// Returns a cursor past the last node.
    ///
    /// Stepping it back lands on the last node.
    #[must_use]
    pub fn end(&self) -> Cursor<'a, T, A> {
        Cursor::new(self.tree.allocator(), self.tree.end())
    }

    /// Same as [`begin`](Self::begin).
    #[must_use]
    pub fn cbegin(&self) -> Cursor<'a, T, A> {
        self.begin()
    }

    /// Same as [`end`](Self::end).
    #[must_use]
    pub fn cend(&self) -> Cursor<'a, T, A> {
        self.end()
    }

    /// Returns a reverse cursor at the last node.
    #[must_use]
    pub fn rbegin(&self) -> RevCursor<'a, T, A> {
        RevCursor::new(self.end())
    }

    /// Returns a reverse cursor past the first node.
    #[must_use]
    pub fn rend(&self) -> RevCursor<'a, T, A> {
        RevCursor::new(self.begin())
    }

    #[must_use]
    pub fn crbegin(&self) -> RevCursor<'a, T, A> {
        self.rbegin()
    }

    #[must_use]
    pub fn crend(&self) -> RevCursor<'a, T, A> {
        self.rend()
    }

    /// Returns the first value in pre-order.
    #[must_use]
    pub fn front(&self) -> Option<&'a T> {
        self.begin().current()
    }

    /// Returns the last value in pre-order.
    #[must_use]
    pub fn back(&self) -> Option<&'a T> {
        let mut last = self.end();
        last.move_prev();
        last.current()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Gets an iterator over the values, in pre-order.
    pub fn iter(&self) -> Iter<'a, T, A> {
        self.tree.iter()
    }
}

impl<T, A: NodeAllocator<T>> Clone for PreOrderView<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: NodeAllocator<T>> Copy for PreOrderView<'_, T, A> {}

impl<T: fmt::Debug, A: NodeAllocator<T>> fmt::Debug for PreOrderView<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A: NodeAllocator<T>> IntoIterator for PreOrderView<'a, T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values of a [`Tree`], in pre-order.
///
/// This `struct` is created by the [`iter`](Tree::iter) method on [`Tree`]. It walks from both
/// ends with two independent positions and stops when they meet.
///
/// # Examples
///
/// ```
/// use multiway_tree::Tree;
///
/// let mut tree = Tree::with_root(1);
/// tree.append_child(tree.begin(), 2);
/// tree.append_child(tree.begin(), 3);
///
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.len(), 1);
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next_back(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, A = Arena<T>> {
    nodes: &'a A,
    front: Position,
    back: Position,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, A: NodeAllocator<T>> Iter<'a, T, A> {
    pub(crate) const fn new(nodes: &'a A, front: Position, back: Position, remaining: usize) -> Self {
        Self {
            nodes,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes: &'a A = self.nodes;
        let id = self.front.node()?;
        self.front = self.front.next_in(nodes);
        self.remaining -= 1;
        Some(nodes.get(id).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, A: NodeAllocator<T>> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let nodes: &'a A = self.nodes;
        self.back = self.back.prev_in(nodes);
        let id = self.back.node()?;
        self.remaining -= 1;
        Some(nodes.get(id).value())
    }
}

impl<T, A: NodeAllocator<T>> ExactSizeIterator for Iter<'_, T, A> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, A: NodeAllocator<T>> FusedIterator for Iter<'_, T, A> {}

impl<T, A> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T, A> fmt::Debug for Iter<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::format;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::tree::tests::{random_tree, sample};

    #[test]
    fn empty_view() {
        let tree: Tree<u32> = Tree::new();
        let view = tree.pre_order();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
        assert_eq!(view.begin(), view.end());
        assert_eq!(view.cbegin(), view.cend());
        assert_eq!(view.rbegin(), view.rend());
        assert_eq!(view.front(), None);
        assert_eq!(view.back(), None);
        assert_eq!(view.iter().next(), None);
    }

    #[test]
    fn view_accessors() {
        let tree = sample();
        let view = tree.pre_order();
        assert_eq!(view.len(), 10);
        assert!(!view.is_empty());
        assert_eq!(view.front(), Some(&1));
        assert_eq!(view.back(), Some(&10));
        assert_eq!(view.crbegin().current(), Some(&10));
        assert_eq!(view.crend().current(), None);
        assert_eq!(format!("{view:?}"), "[1, 2, 5, 6, 7, 3, 8, 9, 4, 10]");
    }

    #[test]
    fn view_outlives_nothing() {
        let tree = sample();
        let front = {
            let view = tree.pre_order();
            view.front()
        };
        assert_eq!(front, Some(&1));
    }

    #[test]
    fn iterator_meets_in_the_middle() {
        let tree = sample();
        let mut iter = tree.iter();
        let mut front = Vec::new();
        let mut back = Vec::new();
        while let Some(&value) = iter.next() {
            front.push(value);
            if let Some(&value) = iter.next_back() {
                back.push(value);
            }
        }
        assert_eq!(front, [1, 2, 5, 6, 7]);
        assert_eq!(back, [10, 4, 9, 8, 3]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn for_loop_over_view() {
        let tree = sample();
        let mut sum = 0;
        for value in tree.pre_order() {
            sum += value;
        }
        for value in &tree {
            sum += value;
        }
        assert_eq!(sum, 2 * 55);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn rev_matches_reversed(tree in random_tree(64)) {
            let mut forward: Vec<u32> = tree.iter().copied().collect();
            let backward: Vec<u32> = tree.iter().rev().copied().collect();
            forward.reverse();
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(tree.iter().len(), tree.len());
        }

        #[test]
        fn rev_cursor_matches_iter_rev(tree in random_tree(64)) {
            let view = tree.pre_order();
            let mut reverse = view.rbegin();
            let mut seen = Vec::new();
            while reverse != view.rend() {
                seen.push(*reverse.current().unwrap());
                reverse.move_next();
            }
            let expected: Vec<u32> = view.iter().rev().copied().collect();
            prop_assert_eq!(seen, expected);
        }
    }
}
