//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod debug;
mod persistence;
mod pipeline;
mod settings;
mod source;
mod types;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use debug::{DF, LOG_PERFORMANCE};
pub use persistence::{PERSISTENCE, price_cache_filename};
pub use pipeline::PIPELINE;
pub use plot::PLOT_CONFIG;
pub use settings::{RangeWarning, RunSettings};
pub use source::{YAHOO, YahooConfig};
pub use types::{SplitPolicy, TestFraction, TrainYears};
