use core::fmt;
use core::hash::{Hash, Hasher};

use log::trace;
use smallvec::smallvec;

use crate::cursor::{Cursor, Position, deepest_last, predecessor};
use crate::node::link;
use crate::raw::{RawTree, Stack};
use crate::view::{Iter, PreOrderView};
use crate::{Arena, Insertion, Node, NodeAllocator, NodeId};

mod capacity;

/// An ordered multi-way tree.
///
/// Every node holds a value and any number of ordered children. Siblings keep the order they
/// were inserted in; there is no key and no balancing. The tree is traversed in pre-order: a
/// node first, then the full subtree of each child from left to right.
///
/// Nodes live in a [`NodeAllocator`], [`Arena`] by default, and are addressed by [`NodeId`]
/// handles. Places in the tree are named by [`Position`]s, which also describe the *end* of
/// the pre-order sequence. Mutating operations take a position and return the position of the
/// node they created.
///
/// Operations document their preconditions (a position that denotes a node, a node that has a
/// parent, ...). Violating one is a logic error and panics.
///
/// # Examples
///
/// ```
/// use multiway_tree::{Insertion, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(Insertion::Vertical, tree.end(), "html");
/// tree.append_child(root, "head");
/// let body = tree.append_child(root, "body");
/// let p = tree.append_child(body, "p");
///
/// let tags: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(tags, ["html", "head", "body", "p"]);
///
/// // Wrap the body's contents in a new element.
/// tree.insert(Insertion::Vertical, p, "div");
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["html", "head", "body", "div", "p"]);
///
/// assert_eq!(tree.erase_subtree(body), 3);
/// assert_eq!(tree.len(), 2);
/// ```
pub struct Tree<T, A: NodeAllocator<T> = Arena<T>> {
    raw: RawTree<T, A>,
    /// Number of live nodes.
    len: usize,
}

impl<T> Tree<T> {
    /// Creates an empty tree backed by an [`Arena`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let tree: Tree<i32> = Tree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Arena::new())
    }

    /// Creates a tree holding a single root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let tree = Tree::with_root(1);
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.front(), Some(&1));
    /// ```
    #[must_use]
    pub fn with_root(value: T) -> Self {
        Self::with_root_in(value, Arena::new())
    }
}

impl<T, A: NodeAllocator<T>> Tree<T, A> {
    /// Creates an empty tree that allocates its nodes through `alloc`.
    #[must_use]
    pub const fn new_in(alloc: A) -> Self {
        Tree {
            raw: RawTree::new_in(alloc),
            len: 0,
        }
    }

    /// Creates a tree holding a single root node, allocated through `alloc`.
    #[must_use]
    pub fn with_root_in(value: T, alloc: A) -> Self {
        let mut tree = Self::new_in(alloc);
        let root = tree.raw.create_node(value);
        tree.raw.set_root(Some(root));
        tree.len = 1;
        tree
    }

    /// Returns the allocator holding this tree's nodes.
    #[must_use]
    pub fn allocator(&self) -> &A {
        self.raw.nodes()
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.root().is_none()
    }

    /// Destroys every node, leaving the tree empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let mut tree = Tree::with_root(1);
    /// tree.append_child(tree.begin(), 2);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        let destroyed = self.raw.clear();
        trace!("cleared tree of {destroyed} nodes");
        self.len = 0;
    }

    /// Returns the root node's handle, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.raw.root()
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// May panic if `id` is not a live node of this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<T> {
        self.raw.node(id)
    }

    /// Returns the position of the first node in pre-order (the root).
    ///
    /// For an empty tree this equals [`end`](Self::end).
    #[must_use]
    pub fn begin(&self) -> Position {
        Position::new(self.raw.root(), None)
    }

    /// Returns the position past the last node in pre-order.
    #[must_use]
    pub fn end(&self) -> Position {
        Position::new(None, self.find_last_node())
    }

    /// Returns the position denoting `id`.
    ///
    /// The result compares equal to any position that reached `id` by stepping.
    #[must_use]
    pub fn position_of(&self, id: NodeId) -> Position {
        Position::new(Some(id), predecessor(self.raw.nodes(), id))
    }

    /// Returns the position one pre-order step after `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    #[must_use]
    pub fn next_position(&self, position: Position) -> Position {
        position.next_in(self.raw.nodes())
    }

    /// Returns the position one pre-order step before `position`.
    #[must_use]
    pub fn prev_position(&self, position: Position) -> Position {
        position.prev_in(self.raw.nodes())
    }

    /// Returns a cursor at `position`.
    #[must_use]
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, A> {
        Cursor::new(self.raw.nodes(), position)
    }

    /// Returns the value at `position`, or `None` at the end.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&T> {
        position.node().map(|id| self.raw.node(id).value())
    }

    /// Returns the value at `position` mutably, or `None` at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let mut tree = Tree::with_root(1);
    /// if let Some(value) = tree.get_mut(tree.begin()) {
    ///     *value = 10;
    /// }
    /// assert_eq!(tree.front(), Some(&10));
    /// ```
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        position.node().map(|id| self.raw.node_mut(id).value_mut())
    }

    /// Returns the first value in pre-order, i.e. the root's.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.begin())
    }

    /// Returns the last value in pre-order.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.find_last_node().map(|id| self.raw.node(id).value())
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.find_last_node().map(|id| self.raw.node_mut(id).value_mut())
    }

    /// Returns a read-only pre-order view of the tree.
    #[must_use]
    pub fn pre_order(&self) -> PreOrderView<'_, T, A> {
        PreOrderView::new(self)
    }

    /// Gets an iterator over the values of the tree, in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let mut tree = Tree::with_root(1);
    /// let two = tree.append_child(tree.begin(), 2);
    /// tree.append_child(two, 3);
    /// tree.append_child(tree.begin(), 4);
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self.raw.nodes(), self.begin(), self.end(), self.len)
    }

    /// Inserts `value` at `position` and returns the new node's position.
    ///
    /// With [`Insertion::Vertical`] the new node becomes an ancestor: it takes the place of the
    /// node at `position`, which becomes its only child. At the end, the new node is appended
    /// as a child of the last node, or becomes the root of an empty tree.
    ///
    /// With [`Insertion::Horizontal`] the new node becomes the sibling immediately before the
    /// node at `position`. At the end, it becomes the new last child of the last node's parent,
    /// or the root of an empty tree.
    ///
    /// # Panics
    ///
    /// Panics on a horizontal insertion that would give the root a sibling: at the root itself,
    /// or at the end of a tree whose only node is the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::{Insertion, Tree};
    ///
    /// let mut tree = Tree::with_root(1);
    /// let two = tree.append_child(tree.begin(), 2);
    /// tree.append_child(tree.begin(), 3);
    ///
    /// // 1 -> [2, 3] becomes 1 -> [9 -> [2], 3]
    /// let nine = tree.insert(Insertion::Vertical, two, 9);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 9, 2, 3]);
    ///
    /// // 1 -> [8, 9 -> [2], 3]
    /// tree.insert(Insertion::Horizontal, nine, 8);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 8, 9, 2, 3]);
    ///
    /// // At the end: a new last sibling of the last node.
    /// tree.insert(Insertion::Horizontal, tree.end(), 4);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 8, 9, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, mode: Insertion, position: Position, value: T) -> Position {
        let old = position.node();
        if mode == Insertion::Horizontal {
            self.check_horizontal(old);
        }

        let new = self.raw.create_node(value);
        match mode {
            Insertion::Vertical => self.link_vertical(old, new),
            Insertion::Horizontal => self.link_horizontal(old, new),
        }
        self.len += 1;
        trace!("{mode:?} insertion of {new:?} at {old:?}");

        self.position_of(new)
    }

    /// Appends `value` as the new last child of the node at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    pub fn append_child(&mut self, position: Position, value: T) -> Position {
        let Some(parent) = position.node() else {
            panic!("`Tree::append_child()` - position is at the end!");
        };

        let child = self.raw.create_node(value);
        link::append_child(self.raw.nodes_mut(), parent, child);
        self.len += 1;
        trace!("appended {child:?} to {parent:?}");

        self.position_of(child)
    }

    /// Prepends `value` as the new first child of the node at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    pub fn prepend_child(&mut self, position: Position, value: T) -> Position {
        let Some(parent) = position.node() else {
            panic!("`Tree::prepend_child()` - position is at the end!");
        };

        let child = self.raw.create_node(value);
        link::prepend_child(self.raw.nodes_mut(), parent, child);
        self.len += 1;
        trace!("prepended {child:?} to {parent:?}");

        self.position_of(child)
    }

    /// Removes the node at `position` together with all of its descendants.
    ///
    /// Returns the number of nodes removed.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end or denotes the root; use [`clear`](Self::clear) to
    /// empty the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::Tree;
    ///
    /// let mut tree = Tree::with_root(1);
    /// let two = tree.append_child(tree.begin(), 2);
    /// tree.append_child(two, 3);
    /// tree.append_child(tree.begin(), 4);
    ///
    /// assert_eq!(tree.erase_subtree(two), 2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 4]);
    /// ```
    pub fn erase_subtree(&mut self, position: Position) -> usize {
        let Some(id) = position.node() else {
            panic!("`Tree::erase_subtree()` - position is at the end!");
        };
        let Some(parent) = self.raw.node(id).parent() else {
            panic!("`Tree::erase_subtree()` - position denotes the root!");
        };

        link::unlink_child(self.raw.nodes_mut(), parent, id);
        let count = self.count_nodes(id);
        let destroyed = self.raw.clear_node(id);
        debug_assert_eq!(count, destroyed);
        self.len -= count;
        trace!("erased subtree {id:?} of {count} nodes");

        count
    }

    /// Returns the number of nodes in the subtree at `position`, the node itself included.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end.
    #[must_use]
    pub fn subtree_len(&self, position: Position) -> usize {
        let Some(id) = position.node() else {
            panic!("`Tree::subtree_len()` - position is at the end!");
        };
        self.count_nodes(id)
    }

    /// Returns the last node in pre-order: the end of the chain of last children from the root.
    pub(crate) fn find_last_node(&self) -> Option<NodeId> {
        let nodes = self.raw.nodes();
        self.raw.root().map(|root| deepest_last(nodes, root))
    }

    fn count_nodes(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack: Stack<NodeId> = smallvec![id];
        while let Some(id) = stack.pop() {
            count += 1;
            let mut child = self.raw.node(id).first_child();
            while let Some(c) = child {
                stack.push(c);
                child = self.raw.node(c).next_sibling();
            }
        }
        count
    }

    fn check_horizontal(&self, old: Option<NodeId>) {
        let anchor = match old {
            Some(old) => old,
            None => match self.find_last_node() {
                Some(last) => last,
                None => return,
            },
        };
        assert!(
            self.raw.node(anchor).parent().is_some(),
            "`Tree::insert()` - horizontal insertion would create a sibling of the root!"
        );
    }

    fn link_vertical(&mut self, old: Option<NodeId>, new: NodeId) {
        match old {
            Some(old) => {
                if self.raw.node(old).parent().is_some() {
                    link::replace(self.raw.nodes_mut(), old, new);
                } else {
                    self.raw.set_root(Some(new));
                }
                link::append_child(self.raw.nodes_mut(), new, old);
            }
            None => match self.find_last_node() {
                Some(last) => link::append_child(self.raw.nodes_mut(), last, new),
                None => self.raw.set_root(Some(new)),
            },
        }
    }

    fn link_horizontal(&mut self, old: Option<NodeId>, new: NodeId) {
        match old {
            Some(old) => link::insert_sibling(self.raw.nodes_mut(), old, new),
            None => match self.find_last_node() {
                Some(last) => {
                    let Some(parent) = self.raw.node(last).parent() else {
                        unreachable!("`Tree::insert()` - horizontal insertion at the end of a single-node tree!");
                    };
                    link::append_child(self.raw.nodes_mut(), parent, new);
                }
                None => self.raw.set_root(Some(new)),
            },
        }
    }

    /// Visits every node in pre-order.
    fn nodes_pre_order(&self) -> impl Iterator<Item = &Node<T>> {
        let nodes = self.raw.nodes();
        core::iter::successors(self.raw.root(), move |&id| Position::new(Some(id), None).next_in(nodes).node())
            .map(move |id| nodes.get(id))
    }
}

impl<T, A: NodeAllocator<T> + Default> Default for Tree<T, A> {
    fn default() -> Self {
        Tree::new_in(A::default())
    }
}

impl<T> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::with_root(value)
    }
}

impl<T: Clone, A: NodeAllocator<T> + Default> Clone for Tree<T, A> {
    /// Deep-copies every node into a fresh allocator, keeping the shape.
    fn clone(&self) -> Self {
        let mut tree = Tree::new_in(A::default());
        let Some(root) = self.raw.root() else {
            return tree;
        };

        let copy = tree.raw.create_node(self.raw.node(root).value().clone());
        tree.raw.set_root(Some(copy));
        let mut stack: Stack<(NodeId, NodeId)> = smallvec![(root, copy)];
        while let Some((source, target)) = stack.pop() {
            let mut child = self.raw.node(source).first_child();
            while let Some(c) = child {
                let node = self.raw.node(c);
                let copy = tree.raw.create_node(node.value().clone());
                link::append_child(tree.raw.nodes_mut(), target, copy);
                stack.push((c, copy));
                child = node.next_sibling();
            }
        }
        tree.len = self.len;
        tree
    }
}

// The pre-order sequence of (value, has first child, has next sibling) determines the shape.
impl<T: PartialEq, A: NodeAllocator<T>> PartialEq for Tree<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.nodes_pre_order().zip(other.nodes_pre_order()).all(|(a, b)| {
                a.value() == b.value()
                    && a.has_children() == b.has_children()
                    && a.next_sibling().is_some() == b.next_sibling().is_some()
            })
    }
}

impl<T: Eq, A: NodeAllocator<T>> Eq for Tree<T, A> {}

impl<T: Hash, A: NodeAllocator<T>> Hash for Tree<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for node in self.nodes_pre_order() {
            node.value().hash(state);
            node.has_children().hash(state);
            node.next_sibling().is_some().hash(state);
        }
    }
}

impl<T: fmt::Debug, A: NodeAllocator<T>> fmt::Debug for Tree<T, A> {
    /// Formats the tree as nested `{value: [children..]}` maps; childless nodes print bare.
    ///
    /// The nesting is always written on one line; `{:#?}` only affects how values print.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.raw.root() else {
            return f.write_str("{}");
        };

        f.write_str("{")?;
        fmt::Debug::fmt(self.raw.node(root).value(), f)?;
        f.write_str(": [")?;

        // Walks the links in pre-order, closing a map each time it climbs out of a parent.
        let mut next = self.raw.node(root).first_child();
        while let Some(id) = next {
            let node = self.raw.node(id);
            if node.prev_sibling().is_some() {
                f.write_str(", ")?;
            }
            if let Some(child) = node.first_child() {
                f.write_str("{")?;
                fmt::Debug::fmt(node.value(), f)?;
                f.write_str(": [")?;
                next = Some(child);
                continue;
            }
            fmt::Debug::fmt(node.value(), f)?;

            let mut at = id;
            next = loop {
                let node = self.raw.node(at);
                if node.next_sibling().is_some() {
                    break node.next_sibling();
                }
                let Some(parent) = node.parent() else {
                    break None;
                };
                f.write_str("]}")?;
                if parent == root {
                    break None;
                }
                at = parent;
            };
        }

        if !self.raw.node(root).has_children() {
            f.write_str("]}")?;
        }
        Ok(())
    }
}

impl<'a, T, A: NodeAllocator<T>> IntoIterator for &'a Tree<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
