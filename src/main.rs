//! Ashlar demo gallery - entry point.

use ashlar::config::{loader, GridConfig};
use ashlar::source::ItemFeed;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Terminal-cell scale defaults for the demo: the engine's pixel defaults
/// assume a browser-sized container, a terminal is ~200 cells wide.
fn demo_grid_defaults() -> GridConfig {
    GridConfig {
        min_column_width: 24.0,
        gutter_size: 1.0,
        overscan: 40.0,
        hysteresis: 4.0,
        scroll_threshold: 60.0,
        ..GridConfig::default()
    }
}

/// Masonry gallery demo for the ashlar layout engine
#[derive(Parser, Debug)]
#[command(name = "ashlar")]
#[command(version)]
#[command(about = "Masonry layout + virtualization demo gallery")]
pub struct Args {
    /// Load items from a JSON file instead of the simulated feed
    pub items: Option<PathBuf>,

    /// Items per simulated fetch (default 40)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Simulated fetch latency in milliseconds (default 400)
    #[arg(long)]
    pub fetch_delay_ms: Option<u64>,

    /// Total item cap for the simulated feed (0 scrolls forever)
    #[arg(long, default_value = "0")]
    pub limit: usize,

    /// Seed for the simulated feed
    #[arg(long, default_value = "7")]
    pub seed: u64,

    /// Maximum column count
    #[arg(long)]
    pub max_columns: Option<usize>,

    /// Minimum column count
    #[arg(long)]
    pub min_columns: Option<usize>,

    /// Minimum column width in cells
    #[arg(long)]
    pub column_width: Option<f64>,

    /// Gutter between columns and cards, in cells
    #[arg(long)]
    pub gutter: Option<f64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to log file (tail it from another terminal)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults -> config file -> CLI flags.
    let file = loader::load_config_with_precedence(args.config.clone())?.unwrap_or_default();

    let mut grid = demo_grid_defaults();
    if let Some(section) = &file.grid {
        grid = section.apply(grid);
    }
    if let Some(v) = args.max_columns {
        grid.max_column_count = v;
    }
    if let Some(v) = args.min_columns {
        grid.min_column_count = v;
    }
    if let Some(v) = args.column_width {
        grid.min_column_width = v;
    }
    if let Some(v) = args.gutter {
        grid.gutter_size = v;
    }
    grid.validate()?;

    let log_path = args
        .log_file
        .clone()
        .or(file.log_file_path.clone())
        .unwrap_or_else(loader::default_log_path);
    ashlar::logging::init(&log_path)?;

    info!(config = ?grid, "grid configuration resolved");

    let (cards, feed) = match &args.items {
        Some(path) => (ashlar::source::load_cards(path)?, None),
        None => {
            let page_size = args.page_size.or(file.page_size).unwrap_or(40);
            let delay = Duration::from_millis(
                args.fetch_delay_ms.or(file.fetch_delay_ms).unwrap_or(400),
            );
            let limit = (args.limit > 0).then_some(args.limit);
            let feed = ItemFeed::new(args.seed, page_size, delay, limit);
            (Vec::new(), Some(feed))
        }
    };

    ashlar::view::run_demo(grid, cards, feed)?;

    Ok(())
}
