// In-memory SleeperApi used by the bootstrap and snapshot tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ClientError, SleeperApi};
use crate::protocol::*;

#[derive(Default)]
pub(crate) struct FakeSleeper {
    pub state: SportState,
    pub players: AllPlayers,
    pub info: LeagueInfo,
    pub rosters: Vec<Roster>,
    pub users: Vec<User>,
    pub matchups: HashMap<u32, Vec<MatchupEntry>>,
    pub scores: BatchScores,
    pub stats: PlayerStatsBatch,
    /// Player ids passed to each `player_stats` call.
    pub stat_requests: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl SleeperApi for FakeSleeper {
    async fn nfl_state(&self) -> Result<SportState, ClientError> {
        Ok(self.state.clone())
    }

    async fn all_players(&self) -> Result<AllPlayers, ClientError> {
        Ok(self.players.clone())
    }

    async fn league_info(&self, _league_id: &str) -> Result<LeagueInfo, ClientError> {
        Ok(self.info.clone())
    }

    async fn league_rosters(&self, _league_id: &str) -> Result<Vec<Roster>, ClientError> {
        Ok(self.rosters.clone())
    }

    async fn league_users(&self, _league_id: &str) -> Result<Vec<User>, ClientError> {
        Ok(self.users.clone())
    }

    async fn league_matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<MatchupEntry>, ClientError> {
        self.matchups.get(&week).cloned().ok_or(ClientError::Status {
            url: format!("/league/{league_id}/matchups/{week}"),
            status: 404,
        })
    }

    async fn batch_scores(&self, _week: u32, _season: &str) -> Result<BatchScores, ClientError> {
        Ok(self.scores.clone())
    }

    async fn player_stats(
        &self,
        player_ids: &[String],
        _week: u32,
        _season: &str,
    ) -> Result<PlayerStatsBatch, ClientError> {
        if let Ok(mut requests) = self.stat_requests.lock() {
            requests.push(player_ids.to_vec());
        }
        Ok(self.stats.clone())
    }
}
