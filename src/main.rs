//! Command line entry point translating a bundler manifest into an asset lookup table.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use asset_manifest_bridge::{
  BridgeConfig, BridgeContext, ManifestBridge, OutputFormat, logging, write_output,
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "asset-manifest-bridge")]
#[command(version, about = "Translate Mix, Vite and Bun manifests into a normalized asset lookup", long_about = None)]
struct Cli {
  /// Manifest to translate (default: ./public/mix-manifest.json)
  #[arg(short = 'm', long = "manifest", value_name = "PATH")]
  manifest: Option<PathBuf>,

  /// Bundler that produced the manifest: mix, vite or bun (anything else reads as mix)
  #[arg(short = 'b', long = "build-system", value_name = "NAME")]
  build_system: Option<String>,

  /// Output format
  #[arg(short = 'f', long = "format", value_enum)]
  format: Option<OutputFormat>,

  /// Write output to this file instead of stdout
  #[arg(short = 'o', long = "output", value_name = "PATH")]
  output: Option<PathBuf>,

  /// Configuration file (default: ./asset-manifest.config.json when present)
  #[arg(short = 'c', long = "config", value_name = "PATH")]
  config: Option<PathBuf>,

  /// Retries while waiting for the manifest to appear
  #[arg(long = "retries", value_name = "N")]
  retries: Option<u32>,

  /// Delay between retries in seconds
  #[arg(long = "retry-delay", value_name = "SECS")]
  retry_delay: Option<f64>,

  /// Enable debug logging
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  if let Err(err) = logging::init_logging(cli.verbose) {
    eprintln!("warning: {err:#}");
  }

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let mut config = match &cli.config {
    Some(path) => BridgeConfig::from_path(path)?,
    None => BridgeConfig::discover(&std::env::current_dir().context("failed to read current directory")?),
  };
  config.apply_env();
  apply_cli_overrides(&mut config, &cli);

  let descriptor = config
    .descriptor()
    .with_context(|| format!("failed to resolve manifest path {}", config.manifest_path))?;
  let bridge = ManifestBridge::new(BridgeContext {
    descriptor,
    retry_policy: config.retry_policy(),
    output_format: config.output_format,
  });

  let artifacts = bridge.run()?;

  match config.output_path() {
    Some(path) => {
      if write_output(&path, &artifacts.rendered)? {
        info!(path = %path.display(), "wrote asset lookup");
      }
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout
        .write_all(artifacts.rendered.as_bytes())
        .context("failed to write to stdout")?;
      stdout.flush().context("failed to flush stdout")?;
    }
  }

  Ok(())
}

fn apply_cli_overrides(config: &mut BridgeConfig, cli: &Cli) {
  if let Some(manifest) = &cli.manifest {
    config.manifest_path = manifest.to_string_lossy().into_owned();
  }
  if let Some(build_system) = &cli.build_system {
    config.build_system = build_system.clone();
  }
  if let Some(format) = cli.format {
    config.output_format = format;
  }
  if let Some(output) = &cli.output {
    config.output_path = Some(output.to_string_lossy().into_owned());
  }
  if let Some(retries) = cli.retries {
    config.retries = retries;
  }
  if let Some(delay) = cli.retry_delay {
    config.retry_delay_secs = delay;
  }
}
