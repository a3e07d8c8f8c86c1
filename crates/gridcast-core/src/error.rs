// Error types raised inside the projection core.

use thiserror::Error;

/// A game's `time_remaining` field could not be read as `MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed time remaining {value:?}: expected MM:SS")]
pub struct ClockParseError {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The clock of a game some starter plays in could not be estimated.
    /// Aborts the whole aggregation rather than defaulting.
    #[error("game {game_id}: {source}")]
    Clock {
        game_id: String,
        #[source]
        source: ClockParseError,
    },
}
