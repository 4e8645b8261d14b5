//! CLI logic for the orgchart tool.
//!
//! Reads rows from a JSON file, runs them through the chart pipeline and
//! writes the exported chart as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use orgchart::{ChartBuilder, OrgChartError, row::RawRow};

/// Run the orgchart CLI application
///
/// This function processes the input rows through the chart pipeline
/// and writes the resulting chart JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `OrgChartError` for:
/// - File I/O errors
/// - Input that is not a JSON array of rows
/// - Configuration loading errors
/// - Row validation errors
/// - Hierarchy errors
pub fn run(args: &Args) -> Result<(), OrgChartError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing rows"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ChartBuilder::new(app_config)?;

    let source = fs::read_to_string(&args.input)?;
    let rows: Vec<RawRow> = serde_json::from_str(&source).map_err(OrgChartError::Input)?;
    debug!(rows = rows.len(); "Rows read");

    let chart = builder.build(&rows)?;
    let json = builder.render_json(&chart)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Chart exported successfully");

    Ok(())
}
