// League bootstrap: league info, roster and user lookup tables, and every
// regular-season week's matchups.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use futures_util::future::try_join_all;
use gridcast_core::ScoringSettings;
use tracing::info;

use crate::client::SleeperApi;
use crate::protocol::{LeagueInfo, MatchupEntry, Roster, User};

pub struct League {
    pub id: String,
    pub info: LeagueInfo,
    pub rosters: HashMap<u32, Roster>,
    pub users: HashMap<String, User>,
    /// Index 0 is week 1. Covers weeks before `playoff_week_start`.
    pub matchups: Vec<Vec<MatchupEntry>>,
}

impl League {
    /// Fetch everything needed to describe a league's regular season.
    ///
    /// Weekly matchups are requested concurrently and stored by week index.
    pub async fn load<A: SleeperApi + ?Sized>(api: &A, league_id: &str) -> Result<Self> {
        let info = api
            .league_info(league_id)
            .await
            .with_context(|| format!("failed to fetch league {league_id}"))?;

        let (rosters, users) =
            tokio::try_join!(api.league_rosters(league_id), api.league_users(league_id))
                .context("failed to fetch rosters and users")?;

        let rosters: HashMap<u32, Roster> =
            rosters.into_iter().map(|r| (r.roster_id, r)).collect();
        let users: HashMap<String, User> =
            users.into_iter().map(|u| (u.user_id.clone(), u)).collect();

        // Regular season only. Playoff pairings live in the bracket endpoints.
        let last_regular_week = info.settings.playoff_week_start.saturating_sub(1);
        let matchups = try_join_all(
            (1..=last_regular_week).map(|week| api.league_matchups(league_id, week)),
        )
        .await
        .context("failed to fetch weekly matchups")?;

        info!(
            league = %info.name,
            rosters = rosters.len(),
            users = users.len(),
            weeks = matchups.len(),
            "league loaded"
        );

        Ok(Self {
            id: league_id.to_string(),
            info,
            rosters,
            users,
            matchups,
        })
    }

    pub fn scoring(&self) -> &ScoringSettings {
        &self.info.scoring_settings
    }

    pub fn regular_season_weeks(&self) -> u32 {
        self.matchups.len() as u32
    }

    pub fn week_matchups(&self, week: u32) -> Option<&[MatchupEntry]> {
        let idx = usize::try_from(week.checked_sub(1)?).ok()?;
        self.matchups.get(idx).map(Vec::as_slice)
    }

    /// Re-fetch one week's matchups (starters change until lineups lock)
    /// and return the fresh entries.
    pub async fn refresh_week<A: SleeperApi + ?Sized>(
        &mut self,
        api: &A,
        week: u32,
    ) -> Result<&[MatchupEntry]> {
        if week == 0 || week > self.regular_season_weeks() {
            bail!(
                "week {week} is outside the regular season (weeks 1-{})",
                self.regular_season_weeks()
            );
        }
        let fresh = api
            .league_matchups(&self.id, week)
            .await
            .with_context(|| format!("failed to fetch week {week} matchups"))?;
        let idx = (week - 1) as usize;
        self.matchups[idx] = fresh;
        Ok(self.matchups[idx].as_slice())
    }

    /// Owner's team name, then owner's display name, then `Roster N`.
    pub fn team_name(&self, roster_id: u32) -> String {
        self.rosters
            .get(&roster_id)
            .and_then(|r| r.owner_id.as_ref())
            .and_then(|owner| self.users.get(owner))
            .map(|u| {
                u.team_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| u.display_name.clone())
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Roster {roster_id}"))
    }
}
