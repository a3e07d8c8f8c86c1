// Fantasy point scoring from raw stat totals.

use crate::model::{ScoringSettings, StatTotals};

/// Apply a league's multiplier table to one player's stats.
///
/// Only stat codes present in both `stats` and `settings` contribute; a code
/// with no configured multiplier scores zero.
pub fn score(stats: &StatTotals, settings: &ScoringSettings) -> f64 {
    stats
        .values
        .iter()
        .filter_map(|(code, value)| settings.get(code).map(|mult| mult * value))
        .sum()
}
