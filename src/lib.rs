#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary)
pub use app::App;
pub use config::{PERSISTENCE, RunSettings, SplitPolicy, TestFraction, TrainYears};
pub use data::{DiskCache, MarketDataProvider, SeriesOrigin, YahooChartProvider};
pub use domain::{FEATURE_NAMES, FetchKey, Label, PricePoint};
pub use engine::{PipelineError, PipelineRun, Stage, run_from_source, run_pipeline};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip the local price cache for the first run and download fresh bars
    #[arg(long, default_value_t = false)]
    pub refresh: bool,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
