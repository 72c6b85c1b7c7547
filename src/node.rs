use crate::NodeId;

pub(crate) mod link;

/// A single tree element: a value plus its links into the surrounding tree.
///
/// Siblings form an intrusive doubly-linked list. A parent records the head and tail of its
/// children's list, and every child records its parent. The links are read-only outside the
/// crate; they change only through the structural operations on [`Tree`](crate::Tree).
///
/// # Examples
///
/// ```
/// use multiway_tree::Tree;
///
/// let mut tree = Tree::with_root("root");
/// let root = tree.root().unwrap();
/// tree.append_child(tree.position_of(root), "leaf");
///
/// let node = tree.node(root);
/// assert!(node.is_root());
/// assert_eq!(node.first_child(), node.last_child());
/// assert_eq!(*tree.node(node.first_child().unwrap()).value(), "leaf");
/// ```
#[derive(Debug)]
pub struct Node<T> {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    value: T,
}

impl<T> Node<T> {
    /// Creates an unlinked node holding `value`.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self::with_links(value, None, None, None, None, None)
    }

    /// Creates a node with every link given explicitly.
    pub(crate) const fn with_links(
        value: T,
        parent: Option<NodeId>,
        prev_sibling: Option<NodeId>,
        next_sibling: Option<NodeId>,
        first_child: Option<NodeId>,
        last_child: Option<NodeId>,
    ) -> Self {
        Self {
            parent,
            prev_sibling,
            next_sibling,
            first_child,
            last_child,
            value,
        }
    }

    /// Returns the parent of this node, or `None` for a root.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the sibling immediately before this node.
    #[inline]
    #[must_use]
    pub const fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    /// Returns the sibling immediately after this node.
    #[inline]
    #[must_use]
    pub const fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Returns the head of this node's child list.
    #[inline]
    #[must_use]
    pub const fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Returns the tail of this node's child list.
    #[inline]
    #[must_use]
    pub const fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consumes the node, returning its value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns true if this node has no parent.
    #[inline]
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Returns true if the node is attached to neither a parent nor siblings.
    pub(crate) const fn is_unlinked(&self) -> bool {
        self.parent.is_none() && self.prev_sibling.is_none() && self.next_sibling.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn set_prev_sibling(&mut self, prev: Option<NodeId>) {
        self.prev_sibling = prev;
    }

    pub(crate) fn set_next_sibling(&mut self, next: Option<NodeId>) {
        self.next_sibling = next;
    }

    pub(crate) fn set_first_child(&mut self, child: Option<NodeId>) {
        self.first_child = child;
    }

    pub(crate) fn set_last_child(&mut self, child: Option<NodeId>) {
        self.last_child = child;
    }

    /// Resets the parent and sibling links, leaving the children untouched.
    pub(crate) fn detach(&mut self) {
        self.parent = None;
        self.prev_sibling = None;
        self.next_sibling = None;
    }
}

impl<T: Clone> Clone for Node<T> {
    /// Clones the value and every link verbatim.
    fn clone(&self) -> Self {
        Self::with_links(
            self.value.clone(),
            self.parent,
            self.prev_sibling,
            self.next_sibling,
            self.first_child,
            self.last_child,
        )
    }
}
