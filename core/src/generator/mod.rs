use crate::*;
use rand::Rng;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, level: Level) -> Deck;
}

/// In-place Durstenfeld shuffle, every permutation is equally likely given a uniform `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
