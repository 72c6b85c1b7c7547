use core::num::NonZero;

#[cfg(test)]
type RawId = u16;
#[cfg(not(test))]
type RawId = u32;

/// An opaque handle to a node stored in a [`NodeAllocator`](crate::NodeAllocator).
///
/// Handles replace the parent, sibling and child pointers of a linked tree. They stay valid
/// until the node they denote is deallocated, after which the allocator may hand the same
/// handle out again.
///
/// `NodeId` is niche-optimized: `Option<NodeId>` has the same size as `NodeId`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(NonZero<RawId>);

impl NodeId {
    /// The largest index a `NodeId` can represent.
    pub const MAX: usize = (RawId::MAX - 1) as usize;

    /// Returns the handle for the zero-based slot `index`, or `None` past [`NodeId::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use multiway_tree::NodeId;
    ///
    /// assert_eq!(NodeId::new(3).map(NodeId::to_index), Some(3));
    /// assert_eq!(NodeId::new(NodeId::MAX + 1), None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Option<Self> {
        if index > Self::MAX {
            return None;
        }
        // Slot `i` is stored as `i + 1`, which leaves zero as the niche for `None`.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawId) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Like [`new`](Self::new), for indices known to be in range.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than [`NodeId::MAX`].
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        match Self::new(index) {
            Some(id) => id,
            None => panic!("`NodeId::from_index()` - `index` > `NodeId::MAX`!"),
        }
    }

    /// Returns the zero-based slot index this handle denotes.
    #[inline]
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
