//! Vote state machine
//!
//! A viewer holds at most one vote per target. Each input either sets,
//! flips, or clears that vote, and the displayed count moves by a fixed delta:
//!
//! | current | input | next | delta |
//! |---------|-------|------|-------|
//! | none    | up    | up   | +1    |
//! | none    | down  | down | -1    |
//! | up      | up    | none | -1    |
//! | up      | down  | down | -2    |
//! | down    | down  | none | +1    |
//! | down    | up    | up   | +2    |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Snowflake;

/// Direction of a single vote input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Signed weight of a standing vote in this direction
    #[inline]
    pub const fn weight(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown vote direction: {other}")),
        }
    }
}

/// A viewer's standing vote on one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

impl VoteState {
    /// Signed weight this state contributes to the target's count
    #[inline]
    pub const fn weight(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Apply an input and report the next state with the count delta
    pub const fn apply(self, direction: VoteDirection) -> VoteTransition {
        let next = match (self, direction) {
            (Self::Up, VoteDirection::Up) | (Self::Down, VoteDirection::Down) => Self::None,
            (_, VoteDirection::Up) => Self::Up,
            (_, VoteDirection::Down) => Self::Down,
        };
        VoteTransition {
            previous: self,
            next,
            delta: next.weight() - self.weight(),
        }
    }
}

impl fmt::Display for VoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Result of applying one vote input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub previous: VoteState,
    pub next: VoteState,
    pub delta: i32,
}

/// What a vote is cast on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum VoteTarget {
    Question(Snowflake),
    Answer(Snowflake),
}

impl VoteTarget {
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Question(id) | Self::Answer(id) => *id,
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question(id) => write!(f, "question:{id}"),
            Self::Answer(id) => write!(f, "answer:{id}"),
        }
    }
}

/// Displayed tally for one target as seen by the current viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub state: VoteState,
    pub count: i32,
}

impl VoteTally {
    /// Fresh tally: no vote, count taken from the stored record
    pub const fn new(baseline: i32) -> Self {
        Self {
            state: VoteState::None,
            count: baseline,
        }
    }

    pub const fn with_state(state: VoteState, count: i32) -> Self {
        Self { state, count }
    }

    /// Apply an input, returning the updated tally and the transition taken
    pub const fn apply(self, direction: VoteDirection) -> (Self, VoteTransition) {
        let transition = self.state.apply(direction);
        (
            Self {
                state: transition.next,
                count: self.count + transition.delta,
            },
            transition,
        )
    }
}
