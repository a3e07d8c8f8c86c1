// gridcast entry point.
//
// 1. Initialize tracing (stderr; stdout carries the report)
// 2. Load config
// 3. Hand off to the polling runner

use anyhow::Context;
use gridcast_app::{config, runner};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        league = %config.league.id,
        interval_secs = config.poll.interval_secs,
        "config loaded"
    );

    runner::run(config).await?;

    info!("gridcast shut down cleanly");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridcast=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
