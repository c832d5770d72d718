use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Entries kept per level.
pub const MAX_HIGH_SCORES: usize = 10;

pub const MAX_NAME_CHARS: usize = 16;

pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub moves: MoveCount,
    pub recorded_at: DateTime<Utc>,
}

/// Per-level records, each list ordered ascending by moves.
///
/// Stored tables are re-sorted and capped when loaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Level, Vec<HighScore>>",
    into = "BTreeMap<Level, Vec<HighScore>>"
)]
pub struct HighScoreTable {
    levels: BTreeMap<Level, Vec<HighScore>>,
}

impl From<BTreeMap<Level, Vec<HighScore>>> for HighScoreTable {
    fn from(mut levels: BTreeMap<Level, Vec<HighScore>>) -> Self {
        levels.retain(|_, entries| !entries.is_empty());
        for entries in levels.values_mut() {
            entries.sort_by_key(|entry| entry.moves);
            entries.truncate(MAX_HIGH_SCORES);
        }
        Self { levels }
    }
}

impl From<HighScoreTable> for BTreeMap<Level, Vec<HighScore>> {
    fn from(table: HighScoreTable) -> Self {
        table.levels
    }
}

impl HighScoreTable {
    pub fn entries(&self, level: Level) -> &[HighScore] {
        self.levels
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn best(&self, level: Level) -> Option<&HighScore> {
        self.entries(level).first()
    }

    /// Whether `moves` beats every stored record for `level`.
    pub fn qualifies(&self, level: Level, moves: MoveCount) -> bool {
        self.best(level).is_none_or(|best| moves < best.moves)
    }

    /// Whether a finished game earns the name prompt.
    pub fn qualifies_game(&self, engine: &PlayEngine) -> bool {
        matches!(engine.state(), EngineState::Won)
            && engine.mode().is_timed()
            && self.qualifies(engine.level(), engine.moves())
    }

    /// Inserts a record after any entries with equal moves, returns its rank or `None` if it fell off the table.
    pub fn record(
        &mut self,
        level: Level,
        name: &str,
        moves: MoveCount,
        recorded_at: DateTime<Utc>,
    ) -> Option<usize> {
        let entries = self.levels.entry(level).or_default();
        let rank = entries.partition_point(|entry| entry.moves <= moves);
        if rank >= MAX_HIGH_SCORES {
            return None;
        }

        entries.insert(
            rank,
            HighScore {
                name: sanitize_name(name),
                moves,
                recorded_at,
            },
        );
        entries.truncate(MAX_HIGH_SCORES);
        log::debug!("recorded {} moves for {} at rank {}", moves, level, rank);
        Some(rank)
    }

    pub fn clear(&mut self, level: Level) -> bool {
        self.levels.remove(&level).is_some_and(|entries| !entries.is_empty())
    }
}

fn sanitize_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.chars().take(MAX_NAME_CHARS).collect()
    }
}
