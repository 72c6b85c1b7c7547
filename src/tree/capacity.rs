use super::Tree;
use crate::Arena;
use crate::raw::RawTree;

impl<T> Tree<T, Arena<T>> {
    /// Creates an empty tree with room for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let tree: Tree<i32> = Tree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            raw: RawTree::new_in(Arena::with_capacity(capacity)),
            len: 0,
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.allocator().capacity()
    }
}
