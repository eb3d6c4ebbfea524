//! Inventory Stack Example
//!
//! Loads an inventory report, buckets it by its month-range label and prints
//! the height of every stacked layer per bucket, the way a chart renderer
//! would consume them.
//!
//! Run with: cargo run --example inventory_stack [report.json] [config.toml]
//!
//! Without arguments the bundled sample report and default configuration are used.

use stackline_inventory::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_REPORT: &str = include_str!("../tests/data/inventory_report.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,stackline_inventory=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let report = match args.next() {
        Some(path) => {
            info!("Loading report from {}", path);
            std::fs::read_to_string(path)?
        }
        None => SAMPLE_REPORT.to_string(),
    };
    let config = match args.next() {
        Some(path) => StackConfig::from_file(path)?,
        None => StackConfig::default(),
    };

    let chart = StackedChart::from_json(&report, &config)?;

    println!("{} report, views: {}", chart.report_type(), chart.views().join(", "));
    for group in chart.group() {
        match group.value.total() {
            Some(total) => println!("bucket {:>12}: total {total}", group.key),
            None => println!("bucket {:>12}: total out of range", group.key),
        }
    }
    for series in chart.series() {
        let points: Vec<String> = series
            .points
            .iter()
            .map(|(label, height)| format!("{label}={height}"))
            .collect();
        println!("layer {:>12}: {}", series.key, points.join("  "));
    }

    Ok(())
}
