// Live snapshot: one poll's worth of game scores and player stats,
// converted into projection-core inputs.

use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gridcast_core::{
    build_projections, GameScore, Matchup, MatchupProjection, PlayerStatLine, ProjectionError,
    ScoringSettings, StatKind,
};
use tracing::{debug, warn};

use crate::client::SleeperApi;
use crate::protocol::{BatchScores, MatchupEntry, PlayerStatsBatch, PlayerWeekStats};

#[derive(Debug, Clone)]
pub struct LiveSnapshot {
    pub week: u32,
    pub season: String,
    pub fetched_at: DateTime<Utc>,
    pub matchups: Vec<Matchup>,
    pub actual: HashMap<String, PlayerStatLine>,
    pub projected: HashMap<String, PlayerStatLine>,
    pub games: HashMap<String, GameScore>,
}

impl LiveSnapshot {
    /// Fetch the week's game scores and every starter's stats concurrently.
    pub async fn fetch<A: SleeperApi + ?Sized>(
        api: &A,
        entries: &[MatchupEntry],
        week: u32,
        season: &str,
    ) -> Result<Self> {
        let starters = starter_ids(entries);
        debug!(week, starters = starters.len(), "fetching live snapshot");

        let stats = async {
            if starters.is_empty() {
                Ok(PlayerStatsBatch::default())
            } else {
                api.player_stats(&starters, week, season).await
            }
        };
        let (scores, stats) = tokio::try_join!(api.batch_scores(week, season), stats)
            .with_context(|| format!("failed to fetch live data for week {week}"))?;

        Ok(Self::from_parts(entries, scores, stats, week, season))
    }

    /// Build a snapshot from already-fetched payloads.
    pub fn from_parts(
        entries: &[MatchupEntry],
        scores: BatchScores,
        stats: PlayerStatsBatch,
        week: u32,
        season: &str,
    ) -> Self {
        let games = scores
            .scores
            .iter()
            .map(|g| (g.game_id.clone(), g.to_core()))
            .collect();

        Self {
            week,
            season: season.to_string(),
            fetched_at: Utc::now(),
            matchups: entries.iter().map(MatchupEntry::to_core).collect(),
            actual: index_stats(&stats.actual, StatKind::Actual),
            projected: index_stats(&stats.projected, StatKind::Projected),
            games,
        }
    }

    /// Run the projection core over this snapshot.
    pub fn project(
        &self,
        scoring: &ScoringSettings,
    ) -> Result<Vec<MatchupProjection>, ProjectionError> {
        build_projections(
            &self.matchups,
            &self.actual,
            &self.projected,
            &self.games,
            scoring,
        )
    }
}

/// Distinct non-empty starter ids across all entries, sorted so repeated
/// polls issue identical queries.
fn starter_ids(entries: &[MatchupEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.starters.iter().flatten())
        .filter(|id| !id.is_empty() && id.as_str() != "0")
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn index_stats(rows: &[PlayerWeekStats], kind: StatKind) -> HashMap<String, PlayerStatLine> {
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        if row.game_id.is_none() {
            debug!(player_id = %row.player_id, ?kind, "stat row without game id");
        }
        if map.insert(row.player_id.clone(), row.to_core(kind)).is_some() {
            warn!(player_id = %row.player_id, ?kind, "duplicate stat row, keeping the last one");
        }
    }
    map
}
