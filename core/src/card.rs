use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardIndex,
    pub symbol: Symbol,
}

/// Player-visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CardFace {
    Hidden,
    Revealed,
    Matched,
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}
