//! Command-line configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tilesmith", about = "Headless edge-to-edge tiling editor")]
pub struct Cli {
    /// Piece library (JSON).
    #[arg(long, env = "TILESMITH_PIECES")]
    pub pieces: PathBuf,

    /// Propagation depth after each confirmed placement.
    #[arg(long, env = "TILESMITH_PROPAGATE", default_value_t = tiling::consts::DEFAULT_PROPAGATE)]
    pub propagate: usize,

    /// Viewport size as WIDTHxHEIGHT; the first tile is centred in it.
    #[arg(long, default_value = "1280x800")]
    pub viewport: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the piece library and describe each piece.
    Check,
    /// Replay a scripted session and export the result.
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script of input events (JSON array).
    #[arg(long)]
    pub script: PathBuf,

    /// SVG written on every export request and at the end of the run.
    #[arg(long)]
    pub out: PathBuf,

    /// Optional JSON dump of tiles, pieces and history.
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid viewport `{0}`, expected WIDTHxHEIGHT")]
pub struct ViewportError(String);

/// Viewport dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl FromStr for Viewport {
    type Err = ViewportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ViewportError(s.to_owned());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: f64 = w.trim().parse().map_err(|_| invalid())?;
        let height: f64 = h.trim().parse().map_err(|_| invalid())?;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}
