//! Drives a simulated SPI bus from the command line.
//!
//! ```bash
//! # Loop two payloads through the bus at 4 MHz, mode 2
//! spiwave run --speed 4000000 --mode 2 0102 deadbeef
//!
//! # Read 8 bytes with nothing driving MOSI
//! spiwave run --rx-only 8
//!
//! # Show the effective settings
//! spiwave settings
//! ```

mod settings;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use settings::Settings;
use spiwave_core::{Direction, SpiDriver, SpiError, MAX_TRANSFER_LEN};
use spiwave_decode::{ClockMode, SpiFrame};

#[derive(Parser)]
#[command(name = "spiwave")]
#[command(version)]
#[command(about = "Loopback session on a simulated SPI bus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: <config dir>/spiwave/settings.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the bus, apply settings and transfer payloads
    Run {
        /// Clock rate in Hz (overrides the settings file)
        #[arg(long)]
        speed: Option<u32>,

        /// SPI mode 0-3 (overrides the settings file)
        #[arg(long)]
        mode: Option<u8>,

        /// Read this many bytes with no transmit data
        #[arg(long)]
        rx_only: Option<usize>,

        /// Prefix capture lines with a timestamp
        #[arg(short, long)]
        timestamps: bool,

        /// Hex-encoded payloads, one transfer each
        payloads: Vec<String>,
    },

    /// Print the effective settings as JSON
    Settings,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            speed,
            mode,
            rx_only,
            timestamps,
            payloads,
        } => {
            apply_overrides(&mut settings, speed, mode);
            let mut out = io::stdout().lock();
            run_session(&settings, rx_only, &payloads, timestamps, &mut out)
        }
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

/// Command-line values win over the settings file.
fn apply_overrides(settings: &mut Settings, speed: Option<u32>, mode: Option<u8>) {
    if let Some(speed) = speed {
        settings.speed_hz = speed;
    }
    if let Some(mode) = mode {
        settings.mode = mode;
    }
}

fn run_session(
    settings: &Settings,
    rx_only: Option<usize>,
    payloads: &[String],
    timestamps: bool,
    out: &mut impl Write,
) -> Result<()> {
    if payloads.is_empty() && rx_only.is_none() {
        bail!("nothing to transfer: give hex payloads or --rx-only <len>");
    }

    let mut spi = SpiDriver::with_capture(settings.capture_limit);
    check("init", spi.init())?;
    check("set_config", spi.set_config(Some(settings.spi_config())))?;
    log::info!(
        "bus ready at {} Hz, mode {}",
        settings.speed_hz,
        settings.mode
    );

    for payload in payloads {
        let digits = payload.strip_prefix("0x").unwrap_or(payload.as_str());
        let tx = hex::decode(digits)
            .map_err(|e| anyhow!("invalid hex payload {payload:?}: {e}"))?;
        let mut rx = vec![0u8; tx.len()];
        let result = spi.transfer(Some(tx.as_slice()), Some(rx.as_mut_slice()), tx.len());
        check("transfer", result)?;
        writeln!(out, "TX {} -> RX {}", hex::encode(&tx), hex::encode(&rx))?;
    }

    if let Some(len) = rx_only {
        // The driver's length gate rejects anything past the bus limit.
        let mut rx = vec![0u8; len.min(MAX_TRANSFER_LEN)];
        check("transfer", spi.transfer(None, Some(rx.as_mut_slice()), len))?;
        writeln!(out, "RX {}", hex::encode(&rx))?;
    }

    let store = spi
        .take_capture()
        .ok_or_else(|| anyhow!("capture was detached during the session"))?;
    write!(out, "{}", store.to_text(timestamps))?;

    let clock = ClockMode::from_mode(settings.mode)
        .ok_or_else(|| anyhow!("mode {} has no clock mapping", settings.mode))?;
    let frames: Vec<SpiFrame> = store
        .entries()
        .filter(|entry| entry.direction == Direction::Miso)
        .map(|entry| SpiFrame::new(clock, entry.data.clone()))
        .collect();
    writeln!(out, "{}", serde_json::to_string_pretty(&frames)?)?;

    Ok(())
}

fn check(op: &str, result: Result<(), SpiError>) -> Result<()> {
    result.map_err(|e| anyhow!("{op} failed: {e} (status {})", e.code()))
}
