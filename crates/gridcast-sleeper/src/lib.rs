// Sleeper API collaborator: wire types, HTTP/GraphQL client, league
// bootstrap, and the adapter that turns live payloads into projection inputs.

pub mod client;
pub mod league;
pub mod live;
pub mod protocol;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ClientError, SleeperApi, SleeperClient};
pub use league::League;
pub use live::LiveSnapshot;
