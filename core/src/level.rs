use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Difficulty preset controlling board size and time limit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Master,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub name: &'static str,
    pub pairs: PairCount,
    pub time_limit: Seconds,
    pub columns: u8,
}

impl LevelConfig {
    pub const fn card_count(&self) -> usize {
        2 * self.pairs as usize
    }
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Easy, Level::Medium, Level::Hard, Level::Master];

    pub const fn config(self) -> LevelConfig {
        use Level::*;
        match self {
            Easy => LevelConfig {
                name: "easy",
                pairs: 6,
                time_limit: 60,
                columns: 4,
            },
            Medium => LevelConfig {
                name: "medium",
                pairs: 8,
                time_limit: 75,
                columns: 4,
            },
            Hard => LevelConfig {
                name: "hard",
                pairs: 12,
                time_limit: 100,
                columns: 6,
            },
            Master => LevelConfig {
                name: "master",
                pairs: 18,
                time_limit: 150,
                columns: 6,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        self.config().name
    }

    pub const fn pairs(self) -> PairCount {
        self.config().pairs
    }

    pub const fn time_limit(self) -> Seconds {
        self.config().time_limit
    }

    /// Largest pair count over all levels, symbol sets must cover at least this many glyphs.
    pub const fn max_pairs() -> PairCount {
        let mut max = 0;
        let mut i = 0;
        while i < Self::ALL.len() {
            let pairs = Self::ALL[i].pairs();
            if pairs > max {
                max = pairs;
            }
            i += 1;
        }
        max
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownLevel)
    }
}

/// Whether the level's time limit applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Timed,
    Relaxed,
}

impl Mode {
    pub const fn is_timed(self) -> bool {
        matches!(self, Self::Timed)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Timed
    }
}
