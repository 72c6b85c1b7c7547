use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::{Node, NodeAllocator, NodeId};

/// Explicit stack used by the iterative subtree walks.
pub(crate) type Stack<E> = SmallVec<[E; 32]>;

/// Owns the root of a tree and every node reachable from it.
///
/// Nodes are created and destroyed exclusively through the allocator held here. Dropping the
/// storage destroys the whole tree.
pub(crate) struct RawTree<T, A: NodeAllocator<T>> {
    /// Allocator holding every node of the tree.
    nodes: A,
    /// The root node, if the tree is non-empty.
    root: Option<NodeId>,
    _marker: PhantomData<T>,
}

impl<T, A: NodeAllocator<T>> RawTree<T, A> {
    pub(crate) const fn new_in(nodes: A) -> Self {
        Self {
            nodes,
            root: None,
            _marker: PhantomData,
        }
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn nodes(&self) -> &A {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut A {
        &mut self.nodes
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes.get(id)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.nodes.get_mut(id)
    }

    /// Allocates an unlinked node holding `value`.
    pub(crate) fn create_node(&mut self, value: T) -> NodeId {
        self.nodes.allocate(Node::new(value))
    }

    /// Destroys the subtree rooted at `id`, children before their parent.
    ///
    /// `id` must already be detached from any parent. Returns the number of nodes destroyed.
    pub(crate) fn clear_node(&mut self, id: NodeId) -> usize {
        let mut destroyed = 0;
        // `true` marks a node whose children are already on the stack above it.
        let mut stack: Stack<(NodeId, bool)> = SmallVec::new();
        stack.push((id, false));

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                drop(self.nodes.deallocate(id));
                destroyed += 1;
                continue;
            }

            stack.push((id, true));
            // Pushed back to front so the first child is destroyed first. The sibling links are
            // read here, before anything below this node is released.
            let mut child = self.nodes.get(id).last_child();
            while let Some(c) = child {
                child = self.nodes.get(c).prev_sibling();
                stack.push((c, false));
            }
        }

        destroyed
    }

    /// Destroys every node; the tree becomes empty.
    pub(crate) fn clear(&mut self) -> usize {
        match self.root.take() {
            Some(root) => self.clear_node(root),
            None => 0,
        }
    }
}

impl<T, A: NodeAllocator<T>> Drop for RawTree<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}
