// Library root for the gridcast binary: configuration, the polling runner,
// and report rendering. Exposed so integration tests can drive a poll
// against an in-memory API.

pub mod config;
pub mod report;
pub mod runner;
