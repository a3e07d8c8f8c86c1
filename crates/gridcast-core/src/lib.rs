// Live fantasy projection core: scoring, game-clock estimation, projection
// blending and per-matchup aggregation. Pure functions over already-fetched
// data; no I/O happens here.

pub mod clock;
pub mod error;
pub mod matchup;
pub mod model;
pub mod projection;
pub mod scoring;

pub use clock::estimate_clock;
pub use error::{ClockParseError, ProjectionError};
pub use matchup::build_projections;
pub use model::*;
pub use projection::project;
pub use scoring::score;
