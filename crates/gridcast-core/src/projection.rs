// Live projection blending.
//
// Three regimes keyed on game status. Before kickoff the pre-game projection
// is authoritative; after the final whistle the actual score is. In between,
// a pace extrapolation of the actual score is blended against a floor of
// max(projected, actual), weighted by how much of the game has been played.

use crate::model::{GameClockState, GameStatus};

const GAME_MINUTES: f64 = 60.0;

const CONSERVATIVE_WEIGHT: f64 = 0.2;
const INTERPOLATED_BASE: f64 = 0.35;
const INTERPOLATED_PLAYED_WEIGHT: f64 = 0.65;
const UPSIDE_WEIGHT: f64 = 0.45;

/// Blend one player's actual and projected point totals into a single live
/// projection for the given game clock.
///
/// Absent totals count as 0.0. In progress, the result equals the floor at
/// kickoff and the actual score with no time left.
pub fn project(
    actual_total: Option<f64>,
    projected_total: Option<f64>,
    clock: &GameClockState,
) -> f64 {
    let actual = actual_total.unwrap_or(0.0);
    let projected = projected_total.unwrap_or(0.0);

    match clock.status {
        GameStatus::PreGame => projected,
        GameStatus::Complete => actual,
        GameStatus::InProgress => blend_in_progress(actual, projected, clock),
    }
}

fn blend_in_progress(actual: f64, projected: f64, clock: &GameClockState) -> f64 {
    let fraction_left = clock.fraction_left();
    let minutes_left = f64::from(clock.seconds_remaining) / 60.0;
    let minutes_played = GAME_MINUTES - minutes_left;

    // The remaining-time fraction is applied twice: once through
    // minutes_left, once explicitly. Early small samples get squashed hard.
    let pace = actual
        + (actual / minutes_played.max(1.0)) * minutes_left * (minutes_left / GAME_MINUTES);

    let conservative = CONSERVATIVE_WEIGHT * fraction_left * pace;
    let interpolated =
        (INTERPOLATED_BASE + INTERPOLATED_PLAYED_WEIGHT * (1.0 - fraction_left)) * pace;
    let upside = UPSIDE_WEIGHT * fraction_left * pace;
    let pace_blend = (conservative + interpolated + upside).max(actual);

    let floor_value = projected.max(actual);
    floor_value + (1.0 - fraction_left) * (pace_blend - floor_value)
}
