//! Node handle.
//!
//! Handles are arena indices: the `n`-th node inserted into a graph gets
//! `NodeId(n)`.  Callers keep their own string keys; the graph maps those to
//! handles once and everything downstream (search state, paths) works on
//! integers.  Because handles follow insertion order, ordering by `NodeId` is
//! the same as ordering by insertion; search engines rely on that for
//! deterministic tie-breaking.

use std::fmt;

/// Index of a node in a graph's arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel meaning "no node".  Fills unset predecessor slots.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized handles are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.index()
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;

    /// Fails for indices that do not fit in `u32`.
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}
