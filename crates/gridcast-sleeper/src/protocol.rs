// Sleeper wire types.
//
// Field sets follow what the REST and GraphQL endpoints return. Provider
// blobs whose shape we never read (metadata, roster settings) stay as open
// JSON values. Fields Sleeper is known to send as `null` are `Option`.

use std::collections::HashMap;

use gridcast_core::{GameMetadata, GameScore, Matchup, PlayerStatLine, StatKind, StatTotals};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Every NFL player Sleeper knows about, keyed by player id.
pub type AllPlayers = HashMap<String, PlayerInfo>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub years_exp: Option<u32>,
    #[serde(default)]
    pub metadata: Option<Value>,
    /// Cross-provider ids and other fields we never read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerInfo {
    /// Full name when present, otherwise first + last (team defenses only
    /// carry those), otherwise the raw id.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.is_empty()) {
            return full.to_string();
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.player_id.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// Direction for the trending-players endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingType {
    Add,
    Drop,
}

impl TrendingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingType::Add => "add",
            TrendingType::Drop => "drop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingPlayer {
    pub player_id: String,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Season state
// ---------------------------------------------------------------------------

/// Current state of the NFL fantasy season (`/state/nfl`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SportState {
    pub week: u32,
    pub season_type: String,
    pub season_start_date: Option<String>,
    pub season: String,
    pub previous_season: String,
    pub leg: u32,
    pub league_season: String,
    pub league_create_season: String,
    pub display_week: u32,
}

// ---------------------------------------------------------------------------
// League, rosters, users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueInfo {
    pub league_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub total_rosters: u32,
    #[serde(default)]
    pub roster_positions: Vec<String>,
    /// Stat code → point multiplier.
    #[serde(default)]
    pub scoring_settings: HashMap<String, f64>,
    #[serde(default)]
    pub settings: LeagueSettings,
    #[serde(default)]
    pub previous_league_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default)]
    pub playoff_week_start: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub league_id: String,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub reserve: Option<Vec<String>>,
    #[serde(default)]
    pub settings: Value,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_owner: Option<bool>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl User {
    /// The custom team name from user metadata, if the owner set one.
    pub fn team_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()?
            .get("team_name")?
            .as_str()
            .filter(|s| !s.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchupEntry {
    #[serde(default)]
    pub matchup_id: Option<u32>,
    pub roster_id: u32,
    #[serde(default)]
    pub starters: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub custom_points: Option<f64>,
}

impl MatchupEntry {
    pub fn to_core(&self) -> Matchup {
        Matchup {
            matchup_id: self.matchup_id,
            roster_id: self.roster_id,
            starters: self.starters.clone().unwrap_or_default(),
            players: self.players.clone().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// GraphQL envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `batch_scores` query result: one entry per game of the week.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchScores {
    #[serde(default)]
    pub scores: Vec<GameScoreEntry>,
}

/// Time shown for games whose metadata carries no clock.
const FULL_QUARTER: &str = "15:00";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameScoreEntry {
    pub game_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_type: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Kickoff, epoch milliseconds.
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl GameScoreEntry {
    /// Current quarter. Sleeper sends this as a number or a numeric string.
    pub fn quarter_num(&self) -> i32 {
        match self.metadata.as_ref().and_then(|m| m.get("quarter_num")) {
            Some(Value::Number(n)) => n.as_i64().map_or(0, |q| q as i32),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn time_remaining(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("time_remaining"))
            .and_then(Value::as_str)
            .unwrap_or(FULL_QUARTER)
            .to_string()
    }

    pub fn to_core(&self) -> GameScore {
        GameScore {
            status: self.status.clone(),
            metadata: GameMetadata {
                quarter_num: self.quarter_num(),
                time_remaining: self.time_remaining(),
            },
        }
    }
}

/// `get_player_score_and_projections_batch` result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStatsBatch {
    #[serde(default)]
    pub actual: Vec<PlayerWeekStats>,
    #[serde(default)]
    pub projected: Vec<PlayerWeekStats>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerWeekStats {
    pub player_id: String,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub stats: Option<Map<String, Value>>,
}

impl PlayerWeekStats {
    pub fn to_core(&self, kind: StatKind) -> PlayerStatLine {
        let stats = match &self.stats {
            Some(doc) => StatTotals::from_document(kind, doc),
            None => StatTotals::empty(kind),
        };
        PlayerStatLine {
            game_id: self.game_id.clone().unwrap_or_default(),
            stats,
        }
    }
}
