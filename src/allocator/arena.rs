use alloc::vec::Vec;

use super::NodeAllocator;
use crate::{Node, NodeId};

/// The default [`NodeAllocator`]: a growable slot vector with a free list.
///
/// Freed slots are reused before the vector grows, most recently freed first.
///
/// # Examples
///
/// ```
/// use multiway_tree::{Arena, Node, NodeAllocator};
///
/// let mut arena = Arena::new();
/// let a = arena.allocate(Node::new('a'));
/// let b = arena.allocate(Node::new('b'));
/// assert_eq!(arena.len(), 2);
///
/// assert_eq!(arena.deallocate(a).into_value(), 'a');
/// // The freed slot is handed out again.
/// assert_eq!(arena.allocate(Node::new('c')), a);
/// assert_eq!(*arena.get(b).value(), 'b');
/// ```
pub struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    /// Creates an empty arena without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Creates an empty arena with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> NodeAllocator<T> for Arena<T> {
    fn allocate(&mut self, node: Node<T>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.to_index()] = Some(node);
            id
        } else {
            let Some(id) = NodeId::new(self.slots.len()) else {
                panic!("`Arena::allocate()` - arena is at maximum capacity ({})", NodeId::MAX + 1);
            };
            self.slots.push(Some(node));
            id
        }
    }

    fn deallocate(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id.to_index()].take().expect("`Arena::deallocate()` - `id` is not live!");
        self.free.push(id);
        node
    }

    #[inline]
    fn get(&self, id: NodeId) -> &Node<T> {
        self.slots[id.to_index()].as_ref().expect("`Arena::get()` - `id` is not live!")
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.to_index()].as_mut().expect("`Arena::get_mut()` - `id` is not live!")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arena_capacity() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `id` is not live!")]
    fn get_after_deallocate() {
        let mut arena = Arena::new();
        let id = arena.allocate(Node::new(1));
        let _ = arena.deallocate(id);
        let _ = arena.get(id);
    }

    #[test]
    #[should_panic(expected = "`Arena::deallocate()` - `id` is not live!")]
    fn double_deallocate() {
        let mut arena = Arena::new();
        let id = arena.allocate(Node::new(1));
        let _ = arena.deallocate(id);
        let _ = arena.deallocate(id);
    }

    #[test]
    #[should_panic(expected = "`Arena::allocate()` - arena is at maximum capacity")]
    fn allocate_past_max() {
        // Ids are 16 bits wide under test.
        let mut arena = Arena::new();
        for i in 0..=NodeId::MAX + 1 {
            arena.allocate(Node::new(i));
        }
    }

    #[test]
    fn reuse_is_lifo() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.allocate(Node::new(i))).collect();
        let _ = arena.deallocate(ids[1]);
        let _ = arena.deallocate(ids[3]);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.allocate(Node::new(10)), ids[3]);
        assert_eq!(arena.allocate(Node::new(11)), ids[1]);
        assert_eq!(arena.allocate(Node::new(12)), NodeId::from_index(4));
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(NodeId, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Allocate(value) => {
                        let id = arena.allocate(Node::new(value));
                        prop_assert!(model.iter().all(|&(live, _)| live != id));
                        model.push((id, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0).value_mut() = value;
                        model[index].1 = value;
                    }
                    Operation::Deallocate(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (id, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.deallocate(id).into_value(), expected);
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());

                for &(id, value) in &model {
                    prop_assert_eq!(*arena.get(id).value(), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Allocate(u32),
        GetMut(usize, u32),
        Deallocate(usize),
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Allocate),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            10 => any::<usize>().prop_map(Operation::Deallocate),
        ]
    }
}
