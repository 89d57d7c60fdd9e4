use std::path::PathBuf;

use clap::Parser;

/// Astro Hoops - basketball players by Venus cycle and zodiac sign
///
/// Loads a player table and charts how the players spread over the twenty
/// Venus intervals and the twelve signs of each body, filtered by
/// performance thresholds.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Player table to load (.csv, .json or .parquet)
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "players_astro3.csv",
        env = "ASTRO_HOOPS_DATA"
    )]
    pub data: PathBuf,
}
