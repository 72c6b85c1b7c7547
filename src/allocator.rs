use crate::{Node, NodeId};

mod arena;

pub use arena::Arena;

/// The storage capability a [`Tree`](crate::Tree) allocates its nodes through.
///
/// A tree never stores nodes itself. Every node is handed to the allocator on creation and
/// addressed by the [`NodeId`] it returns from then on, so the allocator decides where nodes
/// live and how freed slots are reused. [`Arena`] is the default implementation.
///
/// # Contract
///
/// - [`allocate`](NodeAllocator::allocate) must return a handle that is not live.
/// - A handle stays valid, and keeps denoting the same node, until it is passed to
///   [`deallocate`](NodeAllocator::deallocate).
/// - [`get`](NodeAllocator::get), [`get_mut`](NodeAllocator::get_mut) and `deallocate` may
///   panic when given a handle that is not live.
///
/// # Examples
///
/// A wrapper that counts live nodes:
///
/// ```
/// use multiway_tree::{Arena, Node, NodeAllocator, NodeId, Tree};
///
/// #[derive(Default)]
/// struct Counting<T> {
///     inner: Arena<T>,
///     live: usize,
/// }
///
/// impl<T> NodeAllocator<T> for Counting<T> {
///     fn allocate(&mut self, node: Node<T>) -> NodeId {
///         self.live += 1;
///         self.inner.allocate(node)
///     }
///
///     fn deallocate(&mut self, id: NodeId) -> Node<T> {
///         self.live -= 1;
///         self.inner.deallocate(id)
///     }
///
///     fn get(&self, id: NodeId) -> &Node<T> {
///         self.inner.get(id)
///     }
///
///     fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
///         self.inner.get_mut(id)
///     }
/// }
///
/// let mut tree = Tree::with_root_in(1, Counting::default());
/// let root = tree.begin();
/// tree.append_child(root, 2);
/// assert_eq!(tree.allocator().live, 2);
///
/// tree.clear();
/// assert_eq!(tree.allocator().live, 0);
/// ```
pub trait NodeAllocator<T> {
    /// Moves `node` into freshly allocated storage and returns its handle.
    fn allocate(&mut self, node: Node<T>) -> NodeId;

    /// Releases the storage behind `id` and returns the node that lived there.
    ///
    /// Dropping the returned node destroys the value.
    fn deallocate(&mut self, id: NodeId) -> Node<T>;

    /// Returns the node behind `id`.
    fn get(&self, id: NodeId) -> &Node<T>;

    /// Returns the node behind `id` mutably.
    fn get_mut(&mut self, id: NodeId) -> &mut Node<T>;
}
