// SPDX-License-Identifier: MPL-2.0

//! Loop a directory of still images on an RGB LED matrix.

mod catalog;
mod display;
mod player;
mod render;
mod signal;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use eyre::{WrapErr, bail};
use matrix_frames_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{catalog::Catalog, player::Player};

#[derive(Debug, Parser)]
#[command(name = "matrix-frames", about = "Frame sequence player for RGB LED matrices")]
struct Args {
    /// Directory containing the frame images
    #[arg(long)]
    frames: Option<PathBuf>,

    /// RON configuration file; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per panel
    #[arg(long)]
    rows: Option<u32>,

    /// Columns per panel
    #[arg(long)]
    cols: Option<u32>,

    /// Daisy-chained panels per chain
    #[arg(long)]
    chain_length: Option<u32>,

    /// Parallel chains
    #[arg(long)]
    parallel: Option<u32>,

    /// Brightness in percent, 1-100
    #[arg(long)]
    brightness: Option<u8>,

    /// GPIO wiring name, e.g. "regular" or "adafruit-hat"
    #[arg(long)]
    hardware_mapping: Option<String>,

    /// Keep root privileges after GPIO initialization
    #[arg(long)]
    no_drop_privileges: bool,

    /// Fixed per-frame pacing budget in milliseconds
    #[arg(long)]
    frame_interval_ms: Option<u64>,
}

impl Args {
    /// Layer the explicitly passed flags over `config`.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(frames) = &self.frames {
            config = config.frames(frames.clone());
        }
        if let Some(interval) = self.frame_interval_ms {
            config = config.frame_interval_ms(interval);
        }

        let mut panel = config.panel;
        if let Some(rows) = self.rows {
            panel = panel.rows(rows);
        }
        if let Some(cols) = self.cols {
            panel = panel.cols(cols);
        }
        if let Some(chain_length) = self.chain_length {
            panel = panel.chain_length(chain_length);
        }
        if let Some(parallel) = self.parallel {
            panel = panel.parallel(parallel);
        }
        if let Some(brightness) = self.brightness {
            panel = panel.brightness(brightness);
        }
        if let Some(mapping) = &self.hardware_mapping {
            panel = panel.hardware_mapping(mapping.clone());
        }
        if self.no_drop_privileges {
            panel = panel.drop_privileges(false);
        }
        config.panel = panel;

        config
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?,
        None => Config::default(),
    };
    let config = args.apply_to(base);

    let catalog = Catalog::scan(&config.frames);
    if catalog.is_empty() {
        bail!("no frames found in {}", config.frames.display());
    }
    info!(frames = catalog.len(), dir = %config.frames.display(), "frame catalog built");

    let player = Player::new(catalog, Duration::from_millis(config.frame_interval_ms))?;
    let shutdown = signal::install_shutdown_flag()?;

    run(&config, &player, shutdown)
}

#[cfg(feature = "hardware")]
fn run(
    config: &Config,
    player: &Player,
    shutdown: &std::sync::atomic::AtomicBool,
) -> eyre::Result<()> {
    let mut matrix = display::hardware::HardwareMatrix::open(&config.panel)?;
    player.run(&mut matrix, shutdown);
    Ok(())
}

#[cfg(not(feature = "hardware"))]
fn run(
    _config: &Config,
    _player: &Player,
    _shutdown: &std::sync::atomic::AtomicBool,
) -> eyre::Result<()> {
    bail!("built without the `hardware` feature; no panel driver is available")
}
