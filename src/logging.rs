//! Tracing subscriber setup for the command line entry point.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a compact stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) -> Result<()> {
  let level = if verbose { Level::DEBUG } else { Level::INFO };
  let env_filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(format!("asset_manifest_bridge={level}")))
    .context("failed to create log filter")?;

  let fmt_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact();

  tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt_layer)
    .try_init()
    .context("failed to install tracing subscriber")
}
