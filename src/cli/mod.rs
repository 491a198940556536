//! Command line interface.

pub mod command;

use std::path::PathBuf;
use std::time::Duration;

use clap::{command, Parser};
use indicatif::ProgressBar;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cleaned data set in the warehouse to analyse
    pub data_set: String,

    /// Label used in figure filenames and chart titles
    pub label: String,

    /// Perform temperature analysis
    #[arg(short, long)]
    pub temperature: bool,

    /// Perform precipitation analysis
    #[arg(short, long)]
    pub precipitation: bool,

    /// Perform extreme events analysis
    #[arg(short, long)]
    pub extreme: bool,

    /// Perform all analyses
    #[arg(short, long)]
    pub all: bool,

    /// Directory holding the batch query files
    #[arg(long, default_value = "sql")]
    pub queries_dir: PathBuf,

    /// Directory for cached query results
    #[arg(long, default_value = "cache")]
    pub cache_dir: PathBuf,

    /// Directory for rendered charts
    #[arg(long, default_value = "visualizations")]
    pub out_dir: PathBuf,

    /// Warehouse query endpoint
    #[arg(long, env = "CLIMVIZ_WAREHOUSE_URL")]
    pub warehouse_url: String,
}

impl Cli {
    /// True when at least one analysis domain was selected.
    pub fn any_analysis(&self) -> bool {
        self.temperature || self.precipitation || self.extreme || self.all
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------
