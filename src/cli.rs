use clap::Parser;
use std::path::PathBuf;

use crate::aspect::AspectPreset;
use crate::display::DisplayMode;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "htcalc")]
#[command(author, version, about = "Home theater layout calculator")]
pub struct Args {
    /// Display mode: terminal (interactive form) or print (one-shot)
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Viewing angle in degrees, between 0 and 180 exclusive
    #[arg(short, long)]
    pub angle: Option<f64>,

    /// Aspect ratio: 4:3, 16:9 or 2.391:1
    #[arg(short = 'r', long)]
    pub aspect: Option<AspectPreset>,

    /// Screen diagonal
    #[arg(short, long)]
    pub size: Option<f64>,

    /// Viewing distance, in the same unit as the screen size
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Unit label shown next to sizes and distances
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Color scheme: spectrum, fire, ocean, monochrome
    #[arg(long)]
    pub colors: Option<String>,

    /// Write a commented default config file and exit
    #[arg(long)]
    pub init_config: bool,
}
