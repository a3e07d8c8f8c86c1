// Plain-text rendering of live matchup projections.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use chrono::{DateTime, Utc};
use gridcast_core::{GameClockState, GameStatus, MatchupProjection, StarterProjection};
use gridcast_sleeper::protocol::AllPlayers;
use gridcast_sleeper::League;

/// Player id → display name.
pub type PlayerNames = HashMap<String, String>;

pub fn player_names(players: &AllPlayers) -> PlayerNames {
    players
        .iter()
        .map(|(id, p)| (id.clone(), p.display_name()))
        .collect()
}

/// Everything a report needs besides the league itself.
pub struct ReportInput<'a> {
    pub week: u32,
    pub projections: &'a [MatchupProjection],
    pub fetched_at: DateTime<Utc>,
    /// When present, each side lists its starters.
    pub names: Option<&'a PlayerNames>,
}

/// Width of the team-name column; totals line up to its right.
const NAME_WIDTH: usize = 24;

/// Render head-to-head pairings ordered by matchup id; rosters without a
/// matchup id are listed last, one per line.
pub fn render(league: &League, input: &ReportInput<'_>) -> String {
    let mut paired: BTreeMap<u32, Vec<&MatchupProjection>> = BTreeMap::new();
    let mut unpaired = Vec::new();
    for p in input.projections {
        match p.matchup_id {
            Some(id) => paired.entry(id).or_default().push(p),
            None => unpaired.push(p),
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}, week {} (updated {})",
        league.info.name,
        input.week,
        input.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for (id, sides) in &mut paired {
        sides.sort_by_key(|side| side.roster_id);
        let _ = writeln!(out, "\nMatchup {id}");
        for pair in sides.chunks(2) {
            match pair {
                [home, away] => render_pair(&mut out, league, home, away, input.names),
                [side] => render_single(&mut out, league, side, input.names),
                _ => {}
            }
        }
    }

    if !unpaired.is_empty() {
        let _ = writeln!(out, "\nNo matchup");
        for side in unpaired {
            render_single(&mut out, league, side, input.names);
        }
    }

    out
}

/// `Team A  102.35  vs  95.10  Team B`, the actual totals beneath, then each
/// side's starters.
fn render_pair(
    out: &mut String,
    league: &League,
    home: &MatchupProjection,
    away: &MatchupProjection,
    names: Option<&PlayerNames>,
) {
    let away_name = league.team_name(away.roster_id);
    let _ = writeln!(
        out,
        "  {:>w$}  {:>7.2}  vs  {:<7.2}  {}",
        league.team_name(home.roster_id),
        home.projected_total,
        away.projected_total,
        away_name,
        w = NAME_WIDTH
    );
    let actual = format!(
        "  {:>w$}  {:>7.2}      {:<7.2}",
        "actual",
        home.actual_total,
        away.actual_total,
        w = NAME_WIDTH
    );
    let _ = writeln!(out, "{}", actual.trim_end());

    if let Some(names) = names {
        render_starters(out, league, home, names);
        render_starters(out, league, away, names);
    }
}

fn render_single(
    out: &mut String,
    league: &League,
    side: &MatchupProjection,
    names: Option<&PlayerNames>,
) {
    let _ = writeln!(
        out,
        "  {:>w$}  {:>7.2}",
        league.team_name(side.roster_id),
        side.projected_total,
        w = NAME_WIDTH
    );
    let _ = writeln!(
        out,
        "  {:>w$}  {:>7.2}",
        "actual",
        side.actual_total,
        w = NAME_WIDTH
    );

    if let Some(names) = names {
        render_starters(out, league, side, names);
    }
}

fn render_starters(
    out: &mut String,
    league: &League,
    side: &MatchupProjection,
    names: &PlayerNames,
) {
    let _ = writeln!(out, "    {}", league.team_name(side.roster_id));
    for starter in &side.starters {
        render_starter(out, starter, names);
    }
}

fn render_starter(out: &mut String, starter: &StarterProjection, names: &PlayerNames) {
    let name = names
        .get(&starter.player_id)
        .map_or(starter.player_id.as_str(), String::as_str);
    let _ = writeln!(
        out,
        "      {:<24} {:<10} {:>7.2}",
        name,
        clock_label(&starter.clock),
        starter.live_projection
    );
}

fn clock_label(clock: &GameClockState) -> String {
    match clock.status {
        GameStatus::PreGame => "pre".to_string(),
        GameStatus::Complete => "final".to_string(),
        GameStatus::InProgress => {
            let s = clock.seconds_remaining;
            format!("{}:{:02} left", s / 60, s % 60)
        }
    }
}
