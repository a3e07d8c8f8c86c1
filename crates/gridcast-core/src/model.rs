// Data model shared by the scoring, clock, projection and aggregation
// modules. Everything here is constructed fresh per aggregation call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Seconds in a regulation game (four 15-minute quarters).
pub const REGULATION_SECONDS: u32 = 3600;

/// Seconds in one quarter.
pub const QUARTER_SECONDS: u32 = 900;

/// League stat code → fantasy point multiplier.
pub type ScoringSettings = HashMap<String, f64>;

// ---------------------------------------------------------------------------
// Stat totals
// ---------------------------------------------------------------------------

/// Which source a stat mapping came from. Actual and projected totals are
/// always scored separately and never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Actual,
    Projected,
}

/// One player's stat values for one week, tagged by source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatTotals {
    pub kind: StatKind,
    pub values: HashMap<String, f64>,
}

impl StatTotals {
    pub fn new(kind: StatKind, values: HashMap<String, f64>) -> Self {
        Self { kind, values }
    }

    pub fn empty(kind: StatKind) -> Self {
        Self::new(kind, HashMap::new())
    }

    /// Build totals from an open JSON stat document, keeping only numeric
    /// values. Providers occasionally mix strings and nulls into stat blobs.
    pub fn from_document(
        kind: StatKind,
        doc: &serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let values = doc
            .iter()
            .filter_map(|(code, v)| v.as_f64().map(|n| (code.clone(), n)))
            .collect();
        Self { kind, values }
    }
}

/// A player's stat entry for the week: the game it belongs to plus the stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub game_id: String,
    pub stats: StatTotals,
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

/// Coarse game status derived from the provider's status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    PreGame,
    InProgress,
    Complete,
}

impl GameStatus {
    /// `"complete"` and `"pre_game"` map to their variants; any other value
    /// (`"in_game"`, `"in_progress"`, halftime markers) is an in-progress game.
    pub fn from_provider(s: &str) -> Self {
        match s {
            "complete" => GameStatus::Complete,
            "pre_game" => GameStatus::PreGame,
            _ => GameStatus::InProgress,
        }
    }
}

/// Estimated status and time left in a game. Never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClockState {
    pub status: GameStatus,
    /// Always within `[0, REGULATION_SECONDS]`.
    pub seconds_remaining: u32,
}

impl GameClockState {
    pub fn pre_game() -> Self {
        Self {
            status: GameStatus::PreGame,
            seconds_remaining: REGULATION_SECONDS,
        }
    }

    pub fn complete() -> Self {
        Self {
            status: GameStatus::Complete,
            seconds_remaining: 0,
        }
    }

    pub fn in_progress(seconds_remaining: u32) -> Self {
        Self {
            status: GameStatus::InProgress,
            seconds_remaining: seconds_remaining.min(REGULATION_SECONDS),
        }
    }

    /// 1.0 at kickoff, 0.0 at the final whistle.
    pub fn fraction_left(&self) -> f64 {
        f64::from(self.seconds_remaining) / f64::from(REGULATION_SECONDS)
    }
}

/// Game metadata the clock estimator reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub quarter_num: i32,
    /// `"MM:SS"` left in the current quarter.
    pub time_remaining: String,
}

/// One game's score snapshot as delivered by the fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub status: String,
    pub metadata: GameMetadata,
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

/// One roster's side of a weekly matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    /// Rosters sharing a matchup id play each other. `None` on bye weeks.
    pub matchup_id: Option<u32>,
    pub roster_id: u32,
    pub starters: Vec<String>,
    pub players: Vec<String>,
}

impl Matchup {
    /// Starter ids with empty slots removed (the provider fills open slots
    /// with `"0"`).
    pub fn active_starters(&self) -> impl Iterator<Item = &str> {
        self.starters
            .iter()
            .map(String::as_str)
            .filter(|id| !id.is_empty() && *id != "0")
    }
}

/// Live projection breakdown for a single starter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarterProjection {
    pub player_id: String,
    pub actual_points: f64,
    pub projected_points: f64,
    pub clock: GameClockState,
    pub live_projection: f64,
}

/// Live projection for one roster's side of a matchup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupProjection {
    pub matchup_id: Option<u32>,
    pub roster_id: u32,
    /// Sum of every counted starter's `live_projection`.
    pub projected_total: f64,
    /// Sum of every counted starter's scored actual points.
    pub actual_total: f64,
    pub starters: Vec<StarterProjection>,
}
