//! Transition identifiers and the generation counter that guards completions.

use serde::{Deserialize, Serialize};

/// Generation of a primary-scalar transition. Later transitions always carry
/// a strictly greater id than earlier ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TransitionId(pub u64);

/// Monotonic allocator for [`TransitionId`].
///
/// Generation 0 is reserved for the construction-time state, which never
/// animates; the first allocated transition is 1.
#[derive(Default, Debug)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next generation and make it current.
    #[inline]
    pub fn advance(&mut self) -> TransitionId {
        self.current = self.current.wrapping_add(1);
        TransitionId(self.current)
    }

    #[inline]
    pub fn current(&self) -> TransitionId {
        TransitionId(self.current)
    }

    #[inline]
    pub fn is_current(&self, id: TransitionId) -> bool {
        id.0 == self.current
    }
}
