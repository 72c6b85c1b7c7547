//! Structural primitives over node links.
//!
//! Every tree mutation is composed from these operations. None of them allocates, frees or
//! touches values, and each one leaves the sibling lists it touches doubly consistent.

use crate::{NodeAllocator, NodeId};

/// Makes `child` the new last child of `parent`.
///
/// `child` must be unlinked (no parent, no siblings); its own children are kept.
pub(crate) fn append_child<T, A>(nodes: &mut A, parent: NodeId, child: NodeId)
where
    A: NodeAllocator<T> + ?Sized,
{
    debug_assert!(nodes.get(child).is_unlinked(), "`append_child()` - `child` is still linked!");

    let last = nodes.get(parent).last_child();
    if let Some(last) = last {
        nodes.get_mut(last).set_next_sibling(Some(child));
    } else {
        nodes.get_mut(parent).set_first_child(Some(child));
    }

    let node = nodes.get_mut(child);
    node.set_prev_sibling(last);
    node.set_parent(Some(parent));
    nodes.get_mut(parent).set_last_child(Some(child));
}

/// Makes `child` the new first child of `parent`.
///
/// `child` must be unlinked (no parent, no siblings); its own children are kept.
pub(crate) fn prepend_child<T, A>(nodes: &mut A, parent: NodeId, child: NodeId)
where
    A: NodeAllocator<T> + ?Sized,
{
    debug_assert!(nodes.get(child).is_unlinked(), "`prepend_child()` - `child` is still linked!");

    let first = nodes.get(parent).first_child();
    if let Some(first) = first {
        nodes.get_mut(first).set_prev_sibling(Some(child));
    } else {
        nodes.get_mut(parent).set_last_child(Some(child));
    }

    let node = nodes.get_mut(child);
    node.set_next_sibling(first);
    node.set_parent(Some(parent));
    nodes.get_mut(parent).set_first_child(Some(child));
}

/// Removes `child` from the child list of `parent`.
///
/// Afterwards `child` is the root of its own detached subtree.
pub(crate) fn unlink_child<T, A>(nodes: &mut A, parent: NodeId, child: NodeId)
where
    A: NodeAllocator<T> + ?Sized,
{
    debug_assert_eq!(nodes.get(child).parent(), Some(parent), "`unlink_child()` - `parent` does not own `child`!");

    let (prev, next) = {
        let node = nodes.get(child);
        (node.prev_sibling(), node.next_sibling())
    };

    match prev {
        Some(prev) => nodes.get_mut(prev).set_next_sibling(next),
        None => nodes.get_mut(parent).set_first_child(next),
    }
    match next {
        Some(next) => nodes.get_mut(next).set_prev_sibling(prev),
        None => nodes.get_mut(parent).set_last_child(prev),
    }

    nodes.get_mut(child).detach();
}

/// Puts `new` in the place `old` occupies among its siblings and detaches `old`.
///
/// Only positions move: the children of both nodes stay where they are. When `old` is a root,
/// `new` becomes parentless too and the caller must re-point the tree's root. `new` must be
/// unlinked.
pub(crate) fn replace<T, A>(nodes: &mut A, old: NodeId, new: NodeId)
where
    A: NodeAllocator<T> + ?Sized,
{
    debug_assert!(nodes.get(new).is_unlinked(), "`replace()` - `new` is still linked!");

    let (parent, prev, next) = {
        let node = nodes.get(old);
        (node.parent(), node.prev_sibling(), node.next_sibling())
    };

    if let Some(parent) = parent {
        let parent = nodes.get_mut(parent);
        if parent.first_child() == Some(old) {
            parent.set_first_child(Some(new));
        }
        if parent.last_child() == Some(old) {
            parent.set_last_child(Some(new));
        }
    }
    if let Some(prev) = prev {
        nodes.get_mut(prev).set_next_sibling(Some(new));
    }
    if let Some(next) = next {
        nodes.get_mut(next).set_prev_sibling(Some(new));
    }

    let node = nodes.get_mut(new);
    node.set_parent(parent);
    node.set_prev_sibling(prev);
    node.set_next_sibling(next);
    nodes.get_mut(old).detach();
}

/// Links `new` as the sibling immediately before `old`.
///
/// `old` must have a parent: this never creates a second root.
pub(crate) fn insert_sibling<T, A>(nodes: &mut A, old: NodeId, new: NodeId)
where
    A: NodeAllocator<T> + ?Sized,
{
    debug_assert!(nodes.get(new).is_unlinked(), "`insert_sibling()` - `new` is still linked!");

    let (parent, prev) = {
        let node = nodes.get(old);
        (node.parent(), node.prev_sibling())
    };
    let Some(parent) = parent else {
        panic!("`insert_sibling()` - `old` has no parent!");
    };

    match prev {
        Some(prev) => nodes.get_mut(prev).set_next_sibling(Some(new)),
        None => nodes.get_mut(parent).set_first_child(Some(new)),
    }
    nodes.get_mut(old).set_prev_sibling(Some(new));

    let node = nodes.get_mut(new);
    node.set_parent(Some(parent));
    node.set_prev_sibling(prev);
    node.set_next_sibling(Some(old));
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::{Arena, Node};

    /// Collects the child list of `parent` front to back, checking both directions agree.
    fn children(nodes: &Arena<u32>, parent: NodeId) -> Vec<u32> {
        let mut forward = Vec::new();
        let mut prev = None;
        let mut cursor = nodes.get(parent).first_child();
        while let Some(id) = cursor {
            let node = nodes.get(id);
            assert_eq!(node.parent(), Some(parent), "child {id:?} has a stale parent");
            assert_eq!(node.prev_sibling(), prev, "child {id:?} has a stale prev_sibling");
            forward.push(*node.value());
            prev = Some(id);
            cursor = node.next_sibling();
        }
        assert_eq!(nodes.get(parent).last_child(), prev, "last_child is not the tail of the list");

        let mut backward = Vec::new();
        let mut cursor = nodes.get(parent).last_child();
        while let Some(id) = cursor {
            let node = nodes.get(id);
            backward.push(*node.value());
            cursor = node.prev_sibling();
        }
        backward.reverse();
        assert_eq!(forward, backward);
        forward
    }

    fn arena_with(values: &[u32]) -> (Arena<u32>, Vec<NodeId>) {
        let mut nodes = Arena::new();
        let ids = values.iter().map(|&v| nodes.allocate(Node::new(v))).collect();
        (nodes, ids)
    }

    #[test]
    fn append_to_childless_parent() {
        let (mut nodes, ids) = arena_with(&[0, 1]);
        append_child(&mut nodes, ids[0], ids[1]);
        assert_eq!(nodes.get(ids[0]).first_child(), Some(ids[1]));
        assert_eq!(nodes.get(ids[0]).last_child(), Some(ids[1]));
        assert_eq!(children(&nodes, ids[0]), [1]);
    }

    #[test]
    fn prepend_to_childless_parent() {
        let (mut nodes, ids) = arena_with(&[0, 1]);
        prepend_child(&mut nodes, ids[0], ids[1]);
        assert_eq!(nodes.get(ids[0]).first_child(), Some(ids[1]));
        assert_eq!(nodes.get(ids[0]).last_child(), Some(ids[1]));
    }

    #[test]
    fn unlink_then_reappend() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2, 3]);
        for &child in &ids[1..] {
            append_child(&mut nodes, ids[0], child);
        }

        unlink_child(&mut nodes, ids[0], ids[2]);
        let unlinked = nodes.get(ids[2]);
        assert_eq!(unlinked.parent(), None);
        assert_eq!(unlinked.prev_sibling(), None);
        assert_eq!(unlinked.next_sibling(), None);
        assert_eq!(children(&nodes, ids[0]), [1, 3]);

        append_child(&mut nodes, ids[0], ids[2]);
        assert_eq!(children(&nodes, ids[0]), [1, 3, 2]);
    }

    #[test]
    fn unlink_only_child() {
        let (mut nodes, ids) = arena_with(&[0, 1]);
        append_child(&mut nodes, ids[0], ids[1]);
        unlink_child(&mut nodes, ids[0], ids[1]);
        assert_eq!(nodes.get(ids[0]).first_child(), None);
        assert_eq!(nodes.get(ids[0]).last_child(), None);
    }

    #[test]
    fn unlink_keeps_grandchildren() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2]);
        append_child(&mut nodes, ids[0], ids[1]);
        append_child(&mut nodes, ids[1], ids[2]);
        unlink_child(&mut nodes, ids[0], ids[1]);
        assert_eq!(children(&nodes, ids[1]), [2]);
    }

    #[test]
    fn replace_middle_child() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2, 3, 9, 10]);
        for &child in &ids[1..4] {
            append_child(&mut nodes, ids[0], child);
        }
        // The replaced node's children do not follow it.
        append_child(&mut nodes, ids[2], ids[5]);

        replace(&mut nodes, ids[2], ids[4]);
        assert_eq!(children(&nodes, ids[0]), [1, 9, 3]);
        assert!(nodes.get(ids[2]).is_unlinked());
        assert_eq!(children(&nodes, ids[2]), [10]);
        assert_eq!(children(&nodes, ids[4]), Vec::<u32>::new());
    }

    #[test]
    fn replace_first_and_last_child() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2, 8, 9]);
        append_child(&mut nodes, ids[0], ids[1]);
        append_child(&mut nodes, ids[0], ids[2]);

        replace(&mut nodes, ids[1], ids[3]);
        replace(&mut nodes, ids[2], ids[4]);
        assert_eq!(nodes.get(ids[0]).first_child(), Some(ids[3]));
        assert_eq!(nodes.get(ids[0]).last_child(), Some(ids[4]));
        assert_eq!(children(&nodes, ids[0]), [8, 9]);
    }

    #[test]
    fn replace_root() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2]);
        append_child(&mut nodes, ids[0], ids[1]);

        replace(&mut nodes, ids[0], ids[2]);
        assert!(nodes.get(ids[2]).is_unlinked());
        assert_eq!(children(&nodes, ids[0]), [1]);
    }

    #[test]
    fn insert_sibling_before_first() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2, 7]);
        append_child(&mut nodes, ids[0], ids[1]);
        append_child(&mut nodes, ids[0], ids[2]);

        insert_sibling(&mut nodes, ids[1], ids[3]);
        assert_eq!(nodes.get(ids[0]).first_child(), Some(ids[3]));
        assert_eq!(children(&nodes, ids[0]), [7, 1, 2]);
    }

    #[test]
    fn insert_sibling_before_last() {
        let (mut nodes, ids) = arena_with(&[0, 1, 2, 7]);
        append_child(&mut nodes, ids[0], ids[1]);
        append_child(&mut nodes, ids[0], ids[2]);

        insert_sibling(&mut nodes, ids[2], ids[3]);
        assert_eq!(nodes.get(ids[0]).last_child(), Some(ids[2]));
        assert_eq!(children(&nodes, ids[0]), [1, 7, 2]);
    }

    #[test]
    #[should_panic(expected = "`insert_sibling()` - `old` has no parent!")]
    fn insert_sibling_of_root() {
        let (mut nodes, ids) = arena_with(&[0, 1]);
        insert_sibling(&mut nodes, ids[0], ids[1]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Append(u32),
        Prepend(u32),
        Unlink(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => any::<u32>().prop_map(Op::Append),
            3 => any::<u32>().prop_map(Op::Prepend),
            2 => any::<usize>().prop_map(Op::Unlink),
        ]
    }

    proptest! {
        #[test]
        fn child_list_matches_deque(ops in prop::collection::vec(op_strategy(), 0..128)) {
            let mut nodes = Arena::new();
            let parent = nodes.allocate(Node::new(u32::MAX));
            let mut model: alloc::collections::VecDeque<(NodeId, u32)> = alloc::collections::VecDeque::new();

            for op in ops {
                match op {
                    Op::Append(value) => {
                        let id = nodes.allocate(Node::new(value));
                        append_child(&mut nodes, parent, id);
                        model.push_back((id, value));
                    }
                    Op::Prepend(value) => {
                        let id = nodes.allocate(Node::new(value));
                        prepend_child(&mut nodes, parent, id);
                        model.push_front((id, value));
                    }
                    Op::Unlink(which) => {
                        if model.is_empty() {
                            continue;
                        }
                        let (id, _) = model.remove(which % model.len()).unwrap();
                        unlink_child(&mut nodes, parent, id);
                        prop_assert!(nodes.get(id).is_unlinked());
                        let _ = nodes.deallocate(id);
                    }
                }

                let expected: Vec<u32> = model.iter().map(|&(_, value)| value).collect();
                prop_assert_eq!(children(&nodes, parent), expected);
                prop_assert_eq!(nodes.get(parent).first_child(), model.front().map(|&(id, _)| id));
                prop_assert_eq!(nodes.get(parent).last_child(), model.back().map(|&(id, _)| id));
            }
        }
    }
}
