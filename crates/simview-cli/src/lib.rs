//! SimView CLI library
//!
//! This module contains the core CLI logic for rendering conversion service
//! responses to SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use simview::{DiagramBuilder, SimviewError, geometry::Size};

/// Run the SimView CLI application
///
/// Reads a conversion response from the input file, lays out its diagram and
/// writes the resulting SVG to the output file. The generated C source is
/// written as well when a code output path is given.
///
/// # Errors
///
/// Returns `SimviewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed responses or failed conversions
/// - Invalid style colors
pub fn run(args: &Args) -> Result<(), SimviewError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing conversion response"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;

    if args.width.is_some() || args.height.is_some() {
        let canvas = app_config.layout().canvas();
        let canvas = Size::new(
            args.width.unwrap_or(canvas.width()),
            args.height.unwrap_or(canvas.height()),
        );
        if canvas.is_degenerate() {
            warn!(
                width = canvas.width(),
                height = canvas.height();
                "Degenerate canvas size, positions on that axis collapse to zero"
            );
        }
        app_config.layout_mut().set_canvas(canvas);
    }

    let body = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let result = builder.decode(&body)?;

    let stats = result.stats();
    info!(
        blocks = stats.block_count(),
        connections = stats.connection_count(),
        code_lines = stats.code_lines();
        "Conversion succeeded"
    );

    if let Some(code_output) = &args.code_output {
        fs::write(code_output, result.c_code())?;
        info!(code_file = code_output.as_str(); "C source written");
    }

    let svg = builder.render_svg(result.diagram())?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
