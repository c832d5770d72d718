use serde::{Deserialize, Serialize};

/// Position of a card on the board, also used as the card id.
pub type CardIndex = u8;

/// Count type used for pair counts and matched-pair counts.
pub type PairCount = u8;

/// Whole seconds, used for time limits and the countdown.
pub type Seconds = u16;

/// Resolved two-card flips.
pub type MoveCount = u32;

/// Identifier of a card face. A board holds exactly two cards per symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub u8);

impl Symbol {
    pub const fn id(self) -> u8 {
        self.0
    }
}
