use serde::{Deserialize, Serialize};

/// Travel direction inferred from which half of the frame a vehicle was counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Right half of the frame
    Incoming,
    /// Left half of the frame
    Outgoing,
}

/// Counting status of a track. `Counted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountState {
    /// Not yet seen inside its direction's strip
    #[default]
    Uncounted,
    /// Counted once, in the given direction
    Counted(Direction),
}

impl CountState {
    #[inline]
    pub fn is_counted(&self) -> bool {
        matches!(self, CountState::Counted(_))
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            CountState::Counted(direction) => Some(*direction),
            CountState::Uncounted => None,
        }
    }
}
