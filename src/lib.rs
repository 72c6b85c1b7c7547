//! An allocator-aware ordered multi-way tree for Rust.
//!
//! This crate provides [`Tree`], a general tree in which every node holds a value and any
//! number of ordered children, together with bidirectional pre-order traversal:
//!
//! - [`Tree::insert`] - Insert a new ancestor ([`Insertion::Vertical`]) or a new sibling
//!   ([`Insertion::Horizontal`]) at a [`Position`]
//! - [`Tree::append_child`] / [`Tree::prepend_child`] - Grow a node's child list at either end
//! - [`Tree::erase_subtree`] - Remove a node with all of its descendants
//! - [`Tree::pre_order`] - A [`PreOrderView`] with forward and reverse [`Cursor`]s
//!
//! # Example
//!
//! ```
//! use multiway_tree::{Insertion, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(Insertion::Vertical, tree.end(), 1);
//! let two = tree.append_child(root, 2);
//! tree.append_child(root, 3);
//! tree.append_child(two, 4);
//!
//! // Pre-order: a node, then each child's subtree from left to right.
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 4, 3]);
//!
//! // Walk backwards from the end with a cursor.
//! let view = tree.pre_order();
//! let mut cursor = view.end();
//! cursor.move_prev();
//! assert_eq!(cursor.current(), Some(&3));
//!
//! // Give 2 a new parent without disturbing its subtree.
//! tree.insert(Insertion::Vertical, two, 5);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 5, 2, 4, 3]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Pluggable storage** - Nodes live in any [`NodeAllocator`]; [`Arena`] is the default
//! - **Sentinel-free end** - The end of the traversal remembers the last node, so cursors step
//!   back from it without a dummy node
//! - **No recursion** - Teardown, counting, cloning, comparison and `Debug` walk the tree
//!   without recursing, so deep trees are safe to drop, copy and print
//!
//! # Implementation
//!
//! Nodes form an intrusive linked structure: each records its parent, both neighbouring
//! siblings and both ends of its child list, addressed by [`NodeId`] handles into the
//! allocator. A [`Position`] is the pair of the node it denotes and the node visited just
//! before it, which is all a pre-order step needs in either direction.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod allocator;
mod cursor;
mod insertion;
mod node;
mod node_id;
mod raw;
mod tree;
mod view;

pub use allocator::{Arena, NodeAllocator};
pub use cursor::{Cursor, Position, RevCursor};
pub use insertion::Insertion;
pub use node::Node;
pub use node_id::NodeId;
pub use tree::Tree;
pub use view::{Iter, PreOrderView};
