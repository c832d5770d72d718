use super::*;
use alloc::vec::Vec;

/// Picks `pairs` symbols out of the full symbol pool, doubles them and shuffles the result.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, level: Level) -> Deck {
        use rand::prelude::*;

        let pairs = level.pairs();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut pool: Vec<Symbol> = (0..Level::max_pairs()).map(Symbol).collect();
        shuffle(&mut pool, &mut rng);
        pool.truncate(pairs.into());

        let mut symbols: Vec<Symbol> = pool.iter().flat_map(|&symbol| [symbol; 2]).collect();
        shuffle(&mut symbols, &mut rng);
        log::debug!("dealt {} cards for {} (seed {})", symbols.len(), level, self.seed);

        debug_assert!(Deck::from_symbols(&symbols).is_ok());
        Deck::new_unchecked(&symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn generated_deck_holds_every_symbol_twice() {
        for level in Level::ALL {
            for seed in 0..20 {
                let deck = RandomDeckGenerator::new(seed).generate(level);
                assert_eq!(deck.len(), level.config().card_count());

                let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
                for card in deck.cards() {
                    *counts.entry(card.symbol).or_default() += 1;
                }
                assert_eq!(counts.len(), usize::from(level.pairs()));
                assert!(counts.values().all(|&count| count == 2));
            }
        }
    }

    #[test]
    fn same_seed_deals_same_deck() {
        let a = RandomDeckGenerator::new(42).generate(Level::Hard);
        let b = RandomDeckGenerator::new(42).generate(Level::Hard);
        let c = RandomDeckGenerator::new(43).generate(Level::Hard);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shuffle_keeps_all_items() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..100).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }

    #[test]
    fn shuffle_handles_tiny_slices() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn shuffle_permutations_are_roughly_uniform() {
        const TRIALS: u32 = 60_000;
        let mut rng = SmallRng::seed_from_u64(1234);
        let mut seen: BTreeMap<[u8; 3], u32> = BTreeMap::new();

        for _ in 0..TRIALS {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        let expected = TRIALS / 6;
        for (perm, &count) in &seen {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "permutation {:?} seen {} times, expected about {}",
                perm,
                count,
                expected
            );
        }
    }
}
