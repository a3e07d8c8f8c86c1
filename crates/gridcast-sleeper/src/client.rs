// Read-only Sleeper API client.
//
// REST endpoints are plain GETs against `api.sleeper.app`. Live scores and
// per-player stats only come from the GraphQL endpoint, which requires the
// caller's Sleeper token.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::protocol::{
    AllPlayers, BatchScores, GraphqlResponse, LeagueInfo, MatchupEntry, PlayerStatsBatch, Roster,
    SportState, TrendingPlayer, TrendingType, User,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";
pub const SLEEPER_GRAPHQL_URL: &str = "https://sleeper.com/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("cannot send GraphQL requests without a Sleeper token")]
    MissingToken,

    #[error("GraphQL {operation} failed: {message}")]
    Graphql { operation: String, message: String },
}

// ---------------------------------------------------------------------------
// SleeperApi
// ---------------------------------------------------------------------------

/// The subset of Sleeper the league bootstrap and live snapshot depend on.
#[async_trait]
pub trait SleeperApi: Send + Sync {
    async fn nfl_state(&self) -> Result<SportState, ClientError>;
    async fn all_players(&self) -> Result<AllPlayers, ClientError>;
    async fn league_info(&self, league_id: &str) -> Result<LeagueInfo, ClientError>;
    async fn league_rosters(&self, league_id: &str) -> Result<Vec<Roster>, ClientError>;
    async fn league_users(&self, league_id: &str) -> Result<Vec<User>, ClientError>;
    async fn league_matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<MatchupEntry>, ClientError>;
    async fn batch_scores(&self, week: u32, season: &str) -> Result<BatchScores, ClientError>;
    async fn player_stats(
        &self,
        player_ids: &[String],
        week: u32,
        season: &str,
    ) -> Result<PlayerStatsBatch, ClientError>;
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
    graphql_url: String,
    graphql_token: Option<String>,
}

impl SleeperClient {
    /// Client against the public Sleeper endpoints.
    pub fn new(graphql_token: Option<String>) -> Result<Self, ClientError> {
        Self::with_endpoints(SLEEPER_BASE_URL, SLEEPER_GRAPHQL_URL, graphql_token, DEFAULT_TIMEOUT)
    }

    pub fn with_endpoints(
        base_url: &str,
        graphql_url: &str,
        graphql_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            graphql_url: graphql_url.to_string(),
            graphql_token: graphql_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn has_graphql_token(&self) -> bool {
        self.graphql_token.is_some()
    }

    /// Players with the most adds or drops over the last day.
    pub async fn trending_players(
        &self,
        kind: TrendingType,
    ) -> Result<Vec<TrendingPlayer>, ClientError> {
        self.get(&format!("/players/nfl/trending/{}", kind.as_str())).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;
        decode_response(url, response).await
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: String,
    ) -> Result<T, ClientError> {
        let token = self.graphql_token.as_deref().ok_or(ClientError::MissingToken)?;
        let body = json!({
            "operationName": operation,
            "variables": {},
            "query": query,
        });
        debug!(operation, "GraphQL POST");

        let url = self.graphql_url.clone();
        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("authorization", token)
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let envelope: GraphqlResponse<T> = decode_response(url, response).await?;
        if let Some(first) = envelope.errors.first() {
            return Err(ClientError::Graphql {
                operation: operation.to_string(),
                message: first.message.clone(),
            });
        }
        envelope.data.ok_or_else(|| ClientError::Graphql {
            operation: operation.to_string(),
            message: "response carried no data".to_string(),
        })
    }
}

#[async_trait]
impl SleeperApi for SleeperClient {
    async fn nfl_state(&self) -> Result<SportState, ClientError> {
        self.get("/state/nfl").await
    }

    async fn all_players(&self) -> Result<AllPlayers, ClientError> {
        self.get("/players/nfl").await
    }

    async fn league_info(&self, league_id: &str) -> Result<LeagueInfo, ClientError> {
        self.get(&format!("/league/{league_id}")).await
    }

    async fn league_rosters(&self, league_id: &str) -> Result<Vec<Roster>, ClientError> {
        self.get(&format!("/league/{league_id}/rosters")).await
    }

    async fn league_users(&self, league_id: &str) -> Result<Vec<User>, ClientError> {
        self.get(&format!("/league/{league_id}/users")).await
    }

    async fn league_matchups(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<MatchupEntry>, ClientError> {
        self.get(&format!("/league/{league_id}/matchups/{week}")).await
    }

    async fn batch_scores(&self, week: u32, season: &str) -> Result<BatchScores, ClientError> {
        self.graphql("batch_scores", batch_scores_query(week, season)).await
    }

    async fn player_stats(
        &self,
        player_ids: &[String],
        week: u32,
        season: &str,
    ) -> Result<PlayerStatsBatch, ClientError> {
        self.graphql(
            "get_player_score_and_projections_batch",
            player_stats_query(player_ids, week, season),
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject statuses outside `[200, 400)`, then decode the body as JSON.
async fn decode_response<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status().as_u16();
    if !(200..400).contains(&status) {
        return Err(ClientError::Status { url, status });
    }
    let bytes = response.bytes().await.map_err(|source| ClientError::Request {
        url: url.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { url, source })
}

pub(crate) fn batch_scores_query(week: u32, season: &str) -> String {
    format!(
        "query batch_scores {{scores: scores(sport: \"nfl\",season_type: \"regular\",\
         season: \"{season}\",week: {week}){{\
         date game_id metadata season season_type sport status week start_time}}}}"
    )
}

pub(crate) fn player_stats_query(player_ids: &[String], week: u32, season: &str) -> String {
    // A JSON string array is also a valid GraphQL list literal.
    let ids = serde_json::to_string(player_ids).unwrap_or_else(|_| "[]".to_string());
    let fields = "game_id opponent player_id stats team week season";
    let selection = |alias: &str, category: &str| {
        format!(
            "{alias}: stats_for_players_in_week(sport: \"nfl\",season: \"{season}\",\
             category: \"{category}\",season_type: \"regular\",week: {week},\
             player_ids: {ids}){{ {fields} }}"
        )
    };
    format!(
        "query get_player_score_and_projections_batch {{ {} {} }}",
        selection("actual", "stat"),
        selection("projected", "proj")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
