use core::fmt;
use core::marker::PhantomData;

use crate::{Arena, Node, NodeAllocator, NodeId};

/// A detached location in the pre-order sequence of a tree.
///
/// A position is the pair `(current, trailing)`: `current` is the node it denotes, or `None`
/// past the last node, and `trailing` is the node visited immediately before `current`. The
/// trailing node is what lets a position step backwards from the end without a sentinel node.
///
/// Positions do not borrow the tree, so they can be handed to mutating operations such as
/// [`Tree::insert`](crate::Tree::insert). Any structural mutation may invalidate positions
/// taken before it; using a stale position is a logic error that can panic.
///
/// Two positions are equal iff both components are equal.
///
/// # Examples
///
/// ```
/// use multiway_tree::Tree;
///
/// let mut tree = Tree::with_root(1);
/// tree.append_child(tree.begin(), 2);
///
/// let mut position = tree.begin();
/// position = tree.next_position(position);
/// assert_eq!(tree.get(position), Some(&2));
///
/// position = tree.next_position(position);
/// assert!(position.is_end());
/// assert_eq!(position, tree.end());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    current: Option<NodeId>,
    trailing: Option<NodeId>,
}

impl Position {
    pub(crate) const fn new(current: Option<NodeId>, trailing: Option<NodeId>) -> Self {
        Self { current, trailing }
    }

    /// Returns the node this position denotes, or `None` at the end.
    #[inline]
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.current
    }

    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the position one step further in pre-order.
    ///
    /// Descends into the first child when there is one. Otherwise climbs until an ancestor (or
    /// the node itself) has a next sibling and moves there; the end is reached when the climb
    /// runs out of ancestors. The departed node always becomes the trailing node.
    ///
    /// # Panics
    ///
    /// Panics if this position is at the end.
    pub(crate) fn next_in<T, A>(self, nodes: &A) -> Self
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let Some(current) = self.current else {
            panic!("`Position::next_in()` - position is at the end!");
        };

        let next = match nodes.get(current).first_child() {
            Some(child) => Some(child),
            None => next_uncle(nodes, current),
        };
        Self::new(next, Some(current))
    }

    /// Returns the position one step back in pre-order.
    ///
    /// The trailing node becomes current and its own pre-order predecessor becomes trailing,
    /// which mirrors [`next_in`](Self::next_in) exactly.
    pub(crate) fn prev_in<T, A>(self, nodes: &A) -> Self
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let trailing = self.trailing.and_then(|id| predecessor(nodes, id));
        Self::new(self.trailing, trailing)
    }
}

/// Returns the next sibling of `id` or of its nearest ancestor that has one.
fn next_uncle<T, A>(nodes: &A, id: NodeId) -> Option<NodeId>
where
    A: NodeAllocator<T> + ?Sized,
{
    let mut ancestor = Some(id);
    while let Some(id) = ancestor {
        let node = nodes.get(id);
        if node.next_sibling().is_some() {
            return node.next_sibling();
        }
        ancestor = node.parent();
    }
    None
}

/// Returns the node visited immediately before `id` in pre-order.
pub(crate) fn predecessor<T, A>(nodes: &A, id: NodeId) -> Option<NodeId>
where
    A: NodeAllocator<T> + ?Sized,
{
    let node = nodes.get(id);
    match node.prev_sibling() {
        Some(prev) => Some(deepest_last(nodes, prev)),
        None => node.parent(),
    }
}

/// Follows `last_child` links from `id` until reaching a childless node.
pub(crate) fn deepest_last<T, A>(nodes: &A, mut id: NodeId) -> NodeId
where
    A: NodeAllocator<T> + ?Sized,
{
    while let Some(child) = nodes.get(id).last_child() {
        id = child;
    }
    id
}

/// A bidirectional pre-order cursor over a tree.
///
/// This `struct` is created by [`PreOrderView::begin`](crate::PreOrderView::begin),
/// [`PreOrderView::end`](crate::PreOrderView::end) and [`Tree::cursor`](crate::Tree::cursor).
/// Unlike an [`Iterator`] it can be stepped in both directions from anywhere, including from
/// the end, and its [`position`](Self::position) can be fed back into the tree's mutating
/// operations once the borrow ends.
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
/// let view = tree.pre_order();
/// let mut cursor = view.end();
/// cursor.move_prev();
/// assert_eq!(cursor.current(), Some(&3));
/// cursor.move_prev();
/// assert_eq!(cursor.current(), Some(&2));
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor, view.end());
/// ```
pub struct Cursor<'a, T, A = Arena<T>> {
    nodes: &'a A,
    position: Position,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, A: NodeAllocator<T>> Cursor<'a, T, A> {
    pub(crate) const fn new(nodes: &'a A, position: Position) -> Self {
        Self {
            nodes,
            position,
            _marker: PhantomData,
        }
    }

    /// Returns the detached position of this cursor.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the node the cursor denotes, or `None` at the end.
    #[must_use]
    pub const fn node(&self) -> Option<NodeId> {
        self.position.node()
    }

    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Returns the value the cursor denotes, or `None` at the end.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        self.current_node().map(Node::value)
    }

    /// Returns the node the cursor denotes, with its links.
    #[must_use]
    pub fn current_node(&self) -> Option<&'a Node<T>> {
        let nodes: &'a A = self.nodes;
        self.position.node().map(|id| nodes.get(id))
    }

    /// Advances the cursor one step in pre-order.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    pub fn move_next(&mut self) {
        self.position = self.position.next_in(self.nodes);
    }

    /// Moves the cursor one step back in pre-order.
    ///
    /// Stepping back from the end lands on the last node. Stepping back from the first node
    /// leaves a cursor that denotes nothing and has nothing behind it.
    pub fn move_prev(&mut self) {
        self.position = self.position.prev_in(self.nodes);
    }

    /// Returns the position one step further, leaving the cursor in place.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[must_use]
    pub fn next_position(&self) -> Position {
        self.position.next_in(self.nodes)
    }

    /// Returns the position one step back, leaving the cursor in place.
    #[must_use]
    pub fn prev_position(&self) -> Position {
        self.position.prev_in(self.nodes)
    }
}

impl<T, A> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Cursor<'_, T, A> {}

impl<T, A> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.nodes, other.nodes) && self.position == other.position
    }
}

impl<T, A> Eq for Cursor<'_, T, A> {}

impl<T: fmt::Debug, A: NodeAllocator<T>> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("current", &self.current())
            .finish()
    }
}

/// A cursor that walks the pre-order sequence backwards.
///
/// This is the reverse adapter over [`Cursor`]: it wraps a base cursor and denotes the element
/// one step *before* the base. [`PreOrderView::rbegin`](crate::PreOrderView::rbegin) wraps the
/// end and denotes the last node; [`PreOrderView::rend`](crate::PreOrderView::rend) wraps the
/// beginning and denotes nothing.
///
/// # Examples
///
/// ```
/// use multiway_tree::Tree;
///
/// let mut tree = Tree::with_root(1);
/// tree.append_child(tree.begin(), 2);
///
/// let view = tree.pre_order();
/// let mut reverse = view.rbegin();
/// assert_eq!(reverse.current(), Some(&2));
/// reverse.move_next();
/// assert_eq!(reverse.current(), Some(&1));
/// reverse.move_next();
/// assert_eq!(reverse, view.rend());
/// ```
pub struct RevCursor<'a, T, A = Arena<T>> {
    base: Cursor<'a, T, A>,
}

impl<'a, T, A: NodeAllocator<T>> RevCursor<'a, T, A> {
    pub(crate) const fn new(base: Cursor<'a, T, A>) -> Self {
        Self { base }
    }

    /// Returns the underlying forward cursor, one step after the element this one denotes.
    #[must_use]
    pub const fn base(&self) -> Cursor<'a, T, A> {
        self.base
    }

    /// Returns the value one step before the base, or `None` past the first node.
    #[must_use]
    pub fn current(&self) -> Option<&'a T> {
        let mut before = self.base;
        before.move_prev();
        before.current()
    }

    /// Moves one step towards the first node.
    pub fn move_next(&mut self) {
        self.base.move_prev();
    }

    /// Moves one step towards the last node.
    ///
    /// # Panics
    ///
    /// Panics if the base cursor is at the end, i.e. this cursor denotes the last node.
    pub fn move_prev(&mut self) {
        self.base.move_next();
    }
}

impl<T, A> Clone for RevCursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for RevCursor<'_, T, A> {}

impl<T, A> PartialEq for RevCursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T, A> Eq for RevCursor<'_, T, A> {}

impl<T: fmt::Debug, A: NodeAllocator<T>> fmt::Debug for RevCursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevCursor").field("base", &self.base).finish()
    }
}
