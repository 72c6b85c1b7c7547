/// Where [`Tree::insert`](crate::Tree::insert) places a new node relative to a position.
///
/// # Examples
///
/// ```
/// use multiway_tree::{Insertion, Tree};
///
/// let mut tree = Tree::with_root('b');
/// // 'a' becomes the new root and 'b' its only child.
/// tree.insert(Insertion::Vertical, tree.begin(), 'a');
///
/// let child = tree.next_position(tree.begin());
/// // 'c' goes immediately before 'b'.
/// tree.insert(Insertion::Horizontal, child, 'c');
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ['a', 'c', 'b']);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Insertion {
    /// Insert as a new ancestor: the node at the position becomes the new node's only child.
    Vertical,
    /// Insert as a new sibling immediately before the node at the position.
    Horizontal,
}
