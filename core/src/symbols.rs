use serde::{Deserialize, Serialize};

use crate::*;

/// Glyph table used to draw card faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolSet {
    Animals,
    Fruits,
    Letters,
}

const ANIMALS: [&str; 18] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵", "🐔",
    "🐧", "🐙",
];

const FRUITS: [&str; 18] = [
    "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍈", "🍒", "🍑", "🥭", "🍍", "🥥", "🥝",
    "🍅", "🥑",
];

const LETTERS: [&str; 18] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "J", "K", "L", "M", "N", "P", "R", "S", "T", "W",
];

const _: () = assert!(ANIMALS.len() >= Level::max_pairs() as usize);
const _: () = assert!(FRUITS.len() >= Level::max_pairs() as usize);
const _: () = assert!(LETTERS.len() >= Level::max_pairs() as usize);

impl SymbolSet {
    pub const ALL: [SymbolSet; 3] = [SymbolSet::Animals, SymbolSet::Fruits, SymbolSet::Letters];

    pub const fn name(self) -> &'static str {
        use SymbolSet::*;
        match self {
            Animals => "Animals",
            Fruits => "Fruits",
            Letters => "Letters",
        }
    }

    const fn glyphs(self) -> &'static [&'static str] {
        use SymbolSet::*;
        match self {
            Animals => &ANIMALS,
            Fruits => &FRUITS,
            Letters => &LETTERS,
        }
    }

    /// Face text for `symbol`, `"?"` for ids outside the table.
    pub fn glyph(self, symbol: Symbol) -> &'static str {
        self.glyphs()
            .get(usize::from(symbol.id()))
            .copied()
            .unwrap_or("?")
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::Animals
    }
}
