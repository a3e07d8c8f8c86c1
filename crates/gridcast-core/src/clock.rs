// Game-clock estimation.
//
// Assumes 15-minute quarters and ignores stoppage nuances (kneel-downs,
// two-minute warnings). Overtime reports quarter 5+, which leaves no full
// quarters beyond the current one.

use crate::error::ClockParseError;
use crate::model::{GameClockState, GameStatus, QUARTER_SECONDS, REGULATION_SECONDS};

/// Estimate how much of a game remains from its status, quarter and the
/// `MM:SS` left in that quarter.
///
/// The time string is only read for in-progress games; finished and
/// not-yet-started games never fail.
pub fn estimate_clock(
    status: &str,
    quarter_num: i32,
    time_remaining: &str,
) -> Result<GameClockState, ClockParseError> {
    match GameStatus::from_provider(status) {
        GameStatus::Complete => Ok(GameClockState::complete()),
        GameStatus::PreGame => Ok(GameClockState::pre_game()),
        GameStatus::InProgress => {
            let quarters_left = (4 - i64::from(quarter_num)).max(0) as u64;
            let in_quarter = parse_clock(time_remaining)?;
            let total = quarters_left * u64::from(QUARTER_SECONDS) + u64::from(in_quarter);
            let seconds = total.min(u64::from(REGULATION_SECONDS)) as u32;
            Ok(GameClockState::in_progress(seconds))
        }
    }
}

/// Parse `"MM:SS"` into seconds. Exactly two fields of ASCII digits; only
/// whitespace around the whole string is tolerated.
fn parse_clock(s: &str) -> Result<u32, ClockParseError> {
    let err = || ClockParseError {
        value: s.to_string(),
    };
    let (mm, ss) = s.trim().split_once(':').ok_or_else(err)?;
    let minutes = parse_field(mm).ok_or_else(err)?;
    let seconds = parse_field(ss).ok_or_else(err)?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(err)
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
