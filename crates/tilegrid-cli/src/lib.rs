//! CLI logic for the Tilegrid layout tool.
//!
//! This module contains the core CLI logic: load a scene, lay it out and
//! write the SVG drawing or text report.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::fs;

use log::info;

use tilegrid::{LayoutBuilder, TilegridError, scene::Scene};

/// Run the Tilegrid CLI application
///
/// This function lays out the input scene and writes the requested output
/// format to the output file.
///
/// # Errors
///
/// Returns `TilegridError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TilegridError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let scene = Scene::from_toml(&source)?;
    let workspace = builder.build(&scene)?;
    let output = match args.format {
        Format::Svg => builder.render_svg(&workspace)?,
        Format::Text => builder.render_report(&workspace, args.diagnostics)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Output written successfully");

    Ok(())
}
