// End-to-end checks of the projection core through its public API: scoring,
// clock estimation, blending and matchup aggregation working together.

use std::collections::HashMap;

use gridcast_core::*;

// ===========================================================================
// Fixtures
// ===========================================================================

fn half_ppr() -> ScoringSettings {
    [
        ("pass_yd", 0.04),
        ("pass_td", 4.0),
        ("pass_int", -2.0),
        ("rush_yd", 0.1),
        ("rush_td", 6.0),
        ("rec", 0.5),
        ("rec_yd", 0.1),
        ("rec_td", 6.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn stat_line(kind: StatKind, game_id: &str, pairs: &[(&str, f64)]) -> PlayerStatLine {
    PlayerStatLine {
        game_id: game_id.into(),
        stats: StatTotals::new(kind, pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
    }
}

fn act(game_id: &str, pairs: &[(&str, f64)]) -> PlayerStatLine {
    stat_line(StatKind::Actual, game_id, pairs)
}

fn proj(game_id: &str, pairs: &[(&str, f64)]) -> PlayerStatLine {
    stat_line(StatKind::Projected, game_id, pairs)
}

fn game(status: &str, quarter_num: i32, time_remaining: &str) -> GameScore {
    GameScore {
        status: status.into(),
        metadata: GameMetadata {
            quarter_num,
            time_remaining: time_remaining.into(),
        },
    }
}

struct Week {
    matchups: Vec<Matchup>,
    actual: HashMap<String, PlayerStatLine>,
    projected: HashMap<String, PlayerStatLine>,
    games: HashMap<String, GameScore>,
}

/// A Sunday afternoon: one game final, one in the third quarter, one not
/// started. Two rosters face each other; a third is on bye.
fn sunday() -> Week {
    let matchups = vec![
        Matchup {
            matchup_id: Some(1),
            roster_id: 1,
            starters: vec!["qb1".into(), "rb1".into(), "wr1".into(), "0".into()],
            players: vec!["qb1".into(), "rb1".into(), "wr1".into(), "bench1".into()],
        },
        Matchup {
            matchup_id: Some(1),
            roster_id: 2,
            starters: vec!["qb2".into(), "rb2".into(), "inactive".into()],
            players: vec!["qb2".into(), "rb2".into(), "inactive".into()],
        },
        Matchup {
            matchup_id: None,
            roster_id: 3,
            starters: vec![],
            players: vec![],
        },
    ];

    let actual = HashMap::from([
        ("qb1".into(), act("DAL_NYG", &[("pass_yd", 312.0), ("pass_td", 3.0), ("pass_int", 1.0)])),
        ("rb1".into(), act("KC_BUF", &[("rush_yd", 54.0), ("rec", 2.0), ("rec_yd", 11.0)])),
        ("qb2".into(), act("KC_BUF", &[("pass_yd", 180.0), ("pass_td", 1.0)])),
        ("bench1".into(), act("DAL_NYG", &[("rec_td", 2.0)])),
    ]);

    let projected = HashMap::from([
        ("qb1".into(), proj("DAL_NYG", &[("pass_yd", 265.0), ("pass_td", 1.8), ("pass_int", 0.7)])),
        (
            "rb1".into(),
            proj("KC_BUF", &[("rush_yd", 70.0), ("rush_td", 0.5), ("rec", 3.0), ("rec_yd", 20.0)]),
        ),
        ("wr1".into(), proj("SF_SEA", &[("rec", 6.0), ("rec_yd", 80.0), ("rec_td", 0.5)])),
        ("qb2".into(), proj("KC_BUF", &[("pass_yd", 280.0), ("pass_td", 2.0)])),
        ("rb2".into(), proj("SF_SEA", &[("rush_yd", 60.0), ("rush_td", 0.4)])),
    ]);

    let games = HashMap::from([
        ("DAL_NYG".into(), game("complete", 4, "00:00")),
        ("KC_BUF".into(), game("in_game", 3, "06:12")),
        ("SF_SEA".into(), game("pre_game", 0, "15:00")),
    ]);

    Week {
        matchups,
        actual,
        projected,
        games,
    }
}

fn run(week: &Week) -> Vec<MatchupProjection> {
    build_projections(
        &week.matchups,
        &week.actual,
        &week.projected,
        &week.games,
        &half_ppr(),
    )
    .expect("projection should succeed")
}

// ===========================================================================
// Scoring and clock properties
// ===========================================================================

#[test]
fn score_properties() {
    let settings: ScoringSettings =
        HashMap::from([("pass_yd".into(), 0.04), ("pass_td".into(), 4.0)]);
    assert_eq!(score(&StatTotals::empty(StatKind::Actual), &settings), 0.0);

    let line = StatTotals::new(
        StatKind::Actual,
        HashMap::from([("pass_yd".into(), 300.0), ("pass_td".into(), 3.0)]),
    );
    assert!((score(&line, &settings) - 24.0).abs() < 1e-9);

    let only_yards: ScoringSettings = HashMap::from([("pass_yd".into(), 0.04)]);
    let line = StatTotals::new(
        StatKind::Actual,
        HashMap::from([("pass_yd".into(), 300.0), ("unknown_stat".into(), 999.0)]),
    );
    assert!((score(&line, &only_yards) - 12.0).abs() < 1e-9);
}

#[test]
fn clock_properties() {
    assert_eq!(estimate_clock("complete", 3, "11:11").unwrap().seconds_remaining, 0);
    assert_eq!(estimate_clock("pre_game", 1, "bogus").unwrap().seconds_remaining, 3600);
    assert_eq!(estimate_clock("in_progress", 2, "05:00").unwrap().seconds_remaining, 2100);
    assert_eq!(estimate_clock("in_progress", 5, "02:00").unwrap().seconds_remaining, 120);
    assert!(estimate_clock("in_progress", 2, "notatime").is_err());
}

// ===========================================================================
// Aggregation
// ===========================================================================

#[test]
fn matchup_total_is_sum_of_individual_projections() {
    let week = sunday();
    let settings = half_ppr();
    let results = run(&week);
    assert_eq!(results.len(), 3);

    for (m, result) in week.matchups.iter().zip(&results) {
        let mut expected = 0.0;
        for id in m.active_starters() {
            let Some(proj) = week.projected.get(id) else {
                continue;
            };
            let g = &week.games[&proj.game_id];
            let clock =
                estimate_clock(&g.status, g.metadata.quarter_num, &g.metadata.time_remaining)
                    .unwrap();
            let actual = week.actual.get(id).map_or(0.0, |a| score(&a.stats, &settings));
            expected += project(Some(actual), Some(score(&proj.stats, &settings)), &clock);
        }
        assert!(
            (result.projected_total - expected).abs() < 1e-9,
            "roster {}: {} != {}",
            m.roster_id,
            result.projected_total,
            expected
        );
    }
}

#[test]
fn breakdown_matches_totals() {
    let results = run(&sunday());

    let home = &results[0];
    let ids: Vec<&str> = home.starters.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(ids, vec!["qb1", "rb1", "wr1"]);
    let sum: f64 = home.starters.iter().map(|s| s.live_projection).sum();
    assert!((home.projected_total - sum).abs() < 1e-9);

    // qb1's game is final: 312*0.04 + 3*4 - 2 = 22.48
    assert!((home.starters[0].live_projection - 22.48).abs() < 1e-9);
    assert_eq!(home.starters[0].clock.status, GameStatus::Complete);

    // rb1 is mid-game: 3rd quarter, 6:12 left -> 900 + 372 = 1272s
    assert_eq!(home.starters[1].clock.seconds_remaining, 1272);

    // wr1 has not kicked off: projection stands (3 + 8 + 3 = 14)
    assert!((home.starters[2].live_projection - 14.0).abs() < 1e-9);

    // bench points never count
    assert!((home.actual_total - (22.48 + 5.4 + 1.0 + 1.1)).abs() < 1e-9);
}

#[test]
fn inactive_starter_and_bye_roster() {
    let results = run(&sunday());
    let away = &results[1];
    assert_eq!(away.starters.len(), 2);
    assert!(away.starters.iter().all(|s| s.player_id != "inactive"));

    let bye = &results[2];
    assert_eq!(bye.matchup_id, None);
    assert_eq!(bye.projected_total, 0.0);
    assert!(bye.starters.is_empty());
}

#[test]
fn totals_do_not_depend_on_starter_order() {
    let week = sunday();
    let forward = run(&week);

    let mut reversed = sunday();
    for m in &mut reversed.matchups {
        m.starters.reverse();
    }
    let backward = run(&reversed);

    for (a, b) in forward.iter().zip(&backward) {
        assert!((a.projected_total - b.projected_total).abs() < 1e-9);
    }
}

#[test]
fn clocks_are_recomputed_per_call() {
    let mut week = sunday();
    let before = run(&week);

    week.games.insert("KC_BUF".into(), game("complete", 4, "00:00"));
    let after = run(&week);

    let rb1_before = &before[0].starters[1];
    let rb1_after = &after[0].starters[1];
    assert_eq!(rb1_before.clock.status, GameStatus::InProgress);
    assert_eq!(rb1_after.clock.status, GameStatus::Complete);
    assert!((rb1_after.live_projection - rb1_after.actual_points).abs() < 1e-9);
}

#[test]
fn malformed_clock_fails_the_call() {
    let mut week = sunday();
    week.games.insert("KC_BUF".into(), game("in_game", 3, "notatime"));

    let err = build_projections(
        &week.matchups,
        &week.actual,
        &week.projected,
        &week.games,
        &half_ppr(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("KC_BUF"));
}
