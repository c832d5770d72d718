use alloc::collections::BTreeSet;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

/// Delay before a mismatched pair is turned face down again.
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Length of the shuffle-in animation, the board stays locked meanwhile.
pub const DEAL_ANIMATION_MS: u32 = 600;

/// Interval between timer ticks.
pub const TICK_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub enum EngineState {
    Dealing,
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Dealing
    }
}

/// Only constructible through [`PlayEngine::new`], so it is not deserializable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayEngine {
    level: Level,
    mode: Mode,
    deck: Deck,
    flipped: SmallVec<[CardIndex; 2]>,
    matched: BTreeSet<Symbol>,
    moves: MoveCount,
    time_left: Option<Seconds>,
    elapsed: Seconds,
    locked: bool,
    state: EngineState,
}

impl PlayEngine {
    pub fn new(level: Level, mode: Mode, deck: Deck) -> Result<Self> {
        if deck.pair_count() != level.pairs() || deck.len() != level.config().card_count() {
            return Err(GameError::InvalidDeck);
        }

        Ok(Self {
            level,
            mode,
            deck,
            flipped: SmallVec::new(),
            matched: BTreeSet::new(),
            moves: 0,
            time_left: mode.is_timed().then_some(level.time_limit()),
            elapsed: 0,
            locked: true,
            state: Default::default(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    /// Remaining seconds, `None` when no time limit applies.
    pub fn time_left(&self) -> Option<Seconds> {
        self.time_left
    }

    pub fn elapsed(&self) -> Seconds {
        self.elapsed
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn flipped(&self) -> &[CardIndex] {
        &self.flipped
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.matched.len().try_into().unwrap_or(PairCount::MAX)
    }

    pub fn card(&self, index: CardIndex) -> Result<Card> {
        let index = self.deck.validate_index(index)?;
        Ok(self.deck[index])
    }

    pub fn face_at(&self, index: CardIndex) -> CardFace {
        let Ok(card) = self.card(index) else {
            return CardFace::Hidden;
        };

        if self.matched.contains(&card.symbol) {
            CardFace::Matched
        } else if self.flipped.contains(&index) {
            CardFace::Revealed
        } else {
            CardFace::Hidden
        }
    }

    pub fn can_flip_at(&self, index: CardIndex) -> bool {
        self.state.is_playing()
            && !self.locked
            && self.deck.validate_index(index).is_ok()
            && self.face_at(index) == CardFace::Hidden
    }

    /// Ends the shuffle-in phase and unlocks the board.
    pub fn finish_dealing(&mut self) -> bool {
        if !matches!(self.state, EngineState::Dealing) {
            return false;
        }

        self.state = EngineState::Playing;
        self.locked = false;
        true
    }

    pub fn flip(&mut self, index: CardIndex) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        self.check_not_finished()?;
        let index = self.deck.validate_index(index)?;

        if !self.can_flip_at(index) {
            return Ok(NoChange);
        }

        self.flipped.push(index);
        let [first, second] = self.flipped[..] else {
            return Ok(Flipped);
        };

        self.locked = true;
        self.moves = self.moves.saturating_add(1);

        let symbol = self.deck[first].symbol;
        if symbol != self.deck[second].symbol {
            log::trace!("mismatch: {} vs {}", first, second);
            return Ok(Mismatched);
        }

        self.matched.insert(symbol);
        self.flipped.clear();
        self.locked = false;
        log::trace!(
            "matched {:?}, {} of {}",
            symbol,
            self.matched.len(),
            self.level.pairs()
        );

        if self.matched_pairs() == self.level.pairs() {
            self.end_game(true);
            Ok(Won)
        } else {
            Ok(Matched)
        }
    }

    /// Turns a mismatched pair face down again and unlocks the board.
    pub fn resolve_mismatch(&mut self) -> bool {
        if self.state.is_finished() || self.flipped.len() < 2 {
            return false;
        }

        self.flipped.clear();
        self.locked = false;
        true
    }

    /// Advances the clock by one second, only while playing.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_playing() {
            return TickOutcome::NoChange;
        }

        self.elapsed = self.elapsed.saturating_add(1);

        let Some(time_left) = self.time_left.as_mut() else {
            return TickOutcome::Ticked;
        };

        *time_left = time_left.saturating_sub(1);
        if *time_left == 0 {
            self.end_game(false);
            TickOutcome::TimedOut
        } else {
            TickOutcome::Ticked
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        self.locked = true;
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Deck laid out as `0 0 1 1 2 2 ...`.
    fn ordered_deck(level: Level) -> Deck {
        let symbols: Vec<Symbol> = (0..level.pairs()).flat_map(|id| [Symbol(id); 2]).collect();
        Deck::from_symbols(&symbols).unwrap()
    }

    fn playing(level: Level, mode: Mode) -> PlayEngine {
        let mut engine = PlayEngine::new(level, mode, ordered_deck(level)).unwrap();
        assert!(engine.finish_dealing());
        engine
    }

    #[test]
    fn rejects_deck_of_wrong_size() {
        let result = PlayEngine::new(Level::Medium, Mode::Timed, ordered_deck(Level::Easy));
        assert_eq!(result, Err(GameError::InvalidDeck));
    }

    #[test]
    fn board_is_locked_while_dealing() {
        let mut engine =
            PlayEngine::new(Level::Easy, Mode::Timed, ordered_deck(Level::Easy)).unwrap();

        assert_eq!(engine.state(), EngineState::Dealing);
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.tick(), TickOutcome::NoChange);
        assert_eq!(engine.time_left(), Some(Level::Easy.time_limit()));

        assert!(engine.finish_dealing());
        assert!(!engine.finish_dealing());
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::Flipped);
    }

    #[test]
    fn repeat_click_on_single_flipped_card_is_ignored() {
        let mut engine = playing(Level::Easy, Mode::Timed);

        assert_eq!(engine.flip(3).unwrap(), FlipOutcome::Flipped);
        assert_eq!(engine.flip(3).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.flipped(), &[3]);
        assert_eq!(engine.moves(), 0);
        assert!(!engine.is_locked());
    }

    #[test]
    fn match_unlocks_immediately_and_keeps_cards_face_up() {
        let mut engine = playing(Level::Easy, Mode::Timed);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(1).unwrap(), FlipOutcome::Matched);

        assert_eq!(engine.moves(), 1);
        assert!(!engine.is_locked());
        assert!(engine.flipped().is_empty());
        assert_eq!(engine.face_at(0), CardFace::Matched);
        assert_eq!(engine.face_at(1), CardFace::Matched);
        assert_eq!(engine.flip(0).unwrap(), FlipOutcome::NoChange);
        assert!(!engine.resolve_mismatch());
    }

    #[test]
    fn mismatch_locks_until_resolved() {
        let mut engine = playing(Level::Easy, Mode::Timed);

        engine.flip(0).unwrap();
        assert_eq!(engine.flip(2).unwrap(), FlipOutcome::Mismatched);

        assert_eq!(engine.moves(), 1);
        assert!(engine.is_locked());
        assert_eq!(engine.face_at(0), CardFace::Revealed);
        assert_eq!(engine.face_at(2), CardFace::Revealed);
        assert_eq!(engine.flip(4).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.matched_pairs(), 0);

        assert!(engine.resolve_mismatch());
        assert!(!engine.is_locked());
        assert!(engine.flipped().is_empty());
        assert_eq!(engine.face_at(0), CardFace::Hidden);
        assert!(!engine.resolve_mismatch());
    }

    #[test]
    fn moves_count_once_per_resolution() {
        let mut engine = playing(Level::Easy, Mode::Timed);

        engine.flip(0).unwrap();
        engine.flip(0).unwrap();
        assert_eq!(engine.moves(), 0);

        engine.flip(2).unwrap();
        assert_eq!(engine.moves(), 1);
        engine.flip(4).unwrap();
        assert_eq!(engine.moves(), 1);
        engine.resolve_mismatch();

        engine.flip(4).unwrap();
        engine.flip(5).unwrap();
        assert_eq!(engine.moves(), 2);
    }

    #[test]
    fn matching_every_pair_wins() {
        let mut engine = playing(Level::Easy, Mode::Timed);
        let pairs = Level::Easy.pairs();

        for pair in 0..pairs {
            let outcome_first = engine.flip(2 * pair).unwrap();
            let outcome_second = engine.flip(2 * pair + 1).unwrap();
            assert_eq!(outcome_first, FlipOutcome::Flipped);
            if pair + 1 == pairs {
                assert_eq!(outcome_second, FlipOutcome::Won);
            } else {
                assert_eq!(outcome_second, FlipOutcome::Matched);
            }
        }

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.matched_pairs(), pairs);
        assert_eq!(engine.moves(), MoveCount::from(pairs));
        assert!(engine.is_locked());
        assert_eq!(engine.flip(0), Err(GameError::AlreadyEnded));
        assert_eq!(engine.flip(200), Err(GameError::AlreadyEnded));
        assert!(engine.is_finished());
    }

    #[test]
    fn timer_counts_down_to_loss() {
        let mut engine = playing(Level::Easy, Mode::Timed);
        let limit = Level::Easy.time_limit();

        for expected in (1..limit).rev() {
            assert_eq!(engine.tick(), TickOutcome::Ticked);
            assert_eq!(engine.time_left(), Some(expected));
        }
        assert_eq!(engine.tick(), TickOutcome::TimedOut);
        assert_eq!(engine.time_left(), Some(0));
        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.elapsed(), limit);

        assert_eq!(engine.tick(), TickOutcome::NoChange);
        assert_eq!(engine.flip(0), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn loss_during_mismatch_reveal_keeps_cards_shown() {
        let mut engine = playing(Level::Easy, Mode::Timed);
        engine.flip(0).unwrap();
        engine.flip(2).unwrap();

        while engine.tick() != TickOutcome::TimedOut {}

        assert!(!engine.resolve_mismatch());
        assert_eq!(engine.face_at(0), CardFace::Revealed);
    }

    #[test]
    fn no_loss_after_win() {
        let mut engine = playing(Level::Easy, Mode::Timed);
        for _ in 1..Level::Easy.time_limit() {
            engine.tick();
        }
        assert_eq!(engine.time_left(), Some(1));

        for index in 0..Level::Easy.config().card_count() as CardIndex {
            engine.flip(index).unwrap();
        }

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.tick(), TickOutcome::NoChange);
        assert_eq!(engine.state(), EngineState::Won);
    }

    #[test]
    fn relaxed_mode_never_times_out() {
        let mut engine = playing(Level::Easy, Mode::Relaxed);
        assert_eq!(engine.time_left(), None);

        for _ in 0..1000 {
            assert_eq!(engine.tick(), TickOutcome::Ticked);
        }
        assert_eq!(engine.elapsed(), 1000);
        assert_eq!(engine.state(), EngineState::Playing);
    }

    #[test]
    fn invalid_index_is_an_error() {
        let mut engine = playing(Level::Easy, Mode::Timed);

        assert_eq!(engine.flip(200), Err(GameError::InvalidIndex));
        assert_eq!(engine.face_at(200), CardFace::Hidden);
        assert!(!engine.can_flip_at(200));
    }
}
