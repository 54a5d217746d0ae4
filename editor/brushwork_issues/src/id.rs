//! Handles into the issue arena.

use std::fmt;

/// Handle to a node in an [`IssueArena`](crate::IssueArena).
///
/// A handle is an arena slot index plus the generation the slot had when the
/// node was allocated. Disposing a node bumps its slot's generation, so a
/// handle kept past disposal never aliases the node that reuses the slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct IssueId {
    index: u32,
    generation: u32,
}

impl IssueId {
    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        IssueId { index, generation }
    }

    /// Get the slot index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) const fn raw_index(self) -> u32 {
        self.index
    }

    /// Get the slot generation this handle was issued for.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IssueId({}@{})", self.index, self.generation)
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "issue {}", self.index)
    }
}
