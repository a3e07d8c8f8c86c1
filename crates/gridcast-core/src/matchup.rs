// Per-matchup aggregation of live starter projections.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::clock::estimate_clock;
use crate::error::ProjectionError;
use crate::model::{
    GameClockState, GameScore, Matchup, MatchupProjection, PlayerStatLine, ScoringSettings,
    StarterProjection,
};
use crate::projection::project;
use crate::scoring::score;

/// Build one live projection per matchup entry for the current week.
///
/// A starter with no projected-stat entry is excluded (contributes nothing).
/// A starter whose game is missing from `games` keeps its pre-game
/// projection. A malformed game clock aborts the whole call.
pub fn build_projections(
    matchups: &[Matchup],
    actual_stats: &HashMap<String, PlayerStatLine>,
    projected_stats: &HashMap<String, PlayerStatLine>,
    games: &HashMap<String, GameScore>,
    scoring: &ScoringSettings,
) -> Result<Vec<MatchupProjection>, ProjectionError> {
    let mut clocks = ClockCache::new(games);

    matchups
        .iter()
        .map(|m| {
            let mut starters = Vec::with_capacity(m.starters.len());
            for player_id in m.active_starters() {
                let Some(projected) = projected_stats.get(player_id) else {
                    trace!(player_id, roster_id = m.roster_id, "no projection, starter excluded");
                    continue;
                };
                let clock = clocks.get(&projected.game_id)?;
                let actual = actual_stats.get(player_id);

                let projected_points = score(&projected.stats, scoring);
                let actual_points = actual.map_or(0.0, |a| score(&a.stats, scoring));
                let live_projection = project(Some(actual_points), Some(projected_points), &clock);

                starters.push(StarterProjection {
                    player_id: player_id.to_string(),
                    actual_points,
                    projected_points,
                    clock,
                    live_projection,
                });
            }

            Ok(MatchupProjection {
                matchup_id: m.matchup_id,
                roster_id: m.roster_id,
                projected_total: starters.iter().map(|s| s.live_projection).sum(),
                actual_total: starters.iter().map(|s| s.actual_points).sum(),
                starters,
            })
        })
        .collect()
}

/// Clock estimates for the games touched during one aggregation call.
struct ClockCache<'a> {
    games: &'a HashMap<String, GameScore>,
    estimated: HashMap<&'a str, GameClockState>,
}

impl<'a> ClockCache<'a> {
    fn new(games: &'a HashMap<String, GameScore>) -> Self {
        Self {
            games,
            estimated: HashMap::new(),
        }
    }

    fn get(&mut self, game_id: &str) -> Result<GameClockState, ProjectionError> {
        let games = self.games;
        let Some((key, game)) = games.get_key_value(game_id) else {
            debug!(game_id, "game missing from scores, treating as pre-game");
            return Ok(GameClockState::pre_game());
        };
        if let Some(clock) = self.estimated.get(key.as_str()) {
            return Ok(*clock);
        }
        let clock = estimate_clock(
            &game.status,
            game.metadata.quarter_num,
            &game.metadata.time_remaining,
        )
        .map_err(|source| ProjectionError::Clock {
            game_id: game_id.to_string(),
            source,
        })?;
        self.estimated.insert(key.as_str(), clock);
        Ok(clock)
    }
}
