// Polling loop: resolve the week, refresh matchups, fetch live data,
// project, render.

use anyhow::{bail, Context, Result};
use gridcast_sleeper::{League, LiveSnapshot, SleeperApi, SleeperClient};
use tracing::{error, info, warn};

use crate::config::{Config, LeagueConfig};
use crate::report::{self, PlayerNames, ReportInput};

/// The week and season a poll projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub week: u32,
    pub season: String,
}

/// Pinned values from config win; anything unpinned follows `/state/nfl`.
pub async fn resolve_target<A: SleeperApi + ?Sized>(
    api: &A,
    league_config: &LeagueConfig,
    league: &League,
) -> Result<Target> {
    if let (Some(week), Some(season)) = (league_config.week, league_config.season.as_ref()) {
        return Ok(Target {
            week,
            season: season.clone(),
        });
    }

    let state = api.nfl_state().await.context("failed to fetch NFL state")?;
    let week = league_config.week.unwrap_or(state.week);
    if week == 0 {
        bail!("the NFL season has not started (state week is 0); pin league.week to override");
    }
    let season = league_config
        .season
        .clone()
        .or_else(|| (!state.season.is_empty()).then(|| state.season.clone()))
        .unwrap_or_else(|| league.info.season.clone());

    Ok(Target { week, season })
}

/// One refresh: re-fetch the week's matchups, pull live data, project and
/// render the report text.
pub async fn poll_once<A: SleeperApi + ?Sized>(
    api: &A,
    league: &mut League,
    target: &Target,
    names: Option<&PlayerNames>,
) -> Result<String> {
    let entries = league.refresh_week(api, target.week).await?.to_vec();
    let snapshot = LiveSnapshot::fetch(api, &entries, target.week, &target.season).await?;
    let projections = snapshot
        .project(league.scoring())
        .with_context(|| format!("failed to project week {}", target.week))?;

    info!(
        week = target.week,
        matchups = projections.len(),
        "projections updated"
    );

    Ok(report::render(
        league,
        &ReportInput {
            week: target.week,
            projections: &projections,
            fetched_at: snapshot.fetched_at,
            names,
        },
    ))
}

/// Run until a single pass completes (no poll interval) or Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let client = SleeperClient::with_endpoints(
        &config.api.base_url,
        &config.api.graphql_url,
        config.credentials.graphql_token.clone(),
        config.api.timeout(),
    )
    .context("failed to build Sleeper client")?;
    if !client.has_graphql_token() {
        warn!("no GraphQL token configured; live scores and stats will be unavailable");
    }

    let mut league = League::load(&client, &config.league.id).await?;

    let names = if config.report.show_starters {
        let players = client
            .all_players()
            .await
            .context("failed to fetch NFL player list")?;
        info!("loaded {} player names", players.len());
        Some(report::player_names(&players))
    } else {
        None
    };

    loop {
        let outcome = match resolve_target(&client, &config.league, &league).await {
            Ok(target) => poll_once(&client, &mut league, &target, names.as_ref()).await,
            Err(e) => Err(e),
        };

        match (outcome, config.poll.interval()) {
            (Ok(text), _) => println!("{text}"),
            (Err(e), Some(_)) => error!("poll failed: {e:#}"),
            (Err(e), None) => return Err(e),
        }

        let Some(interval) = config.poll.interval() else {
            break;
        };
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}
