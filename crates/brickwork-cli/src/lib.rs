//! CLI logic for the Brickwork masonry tool.
//!
//! Reads a scene description, lays it out with a [`Grid`](brickwork::Grid)
//! in simulated time, and writes the result as SVG.

pub mod error_adapter;

mod args;
mod config;
mod scene_file;
mod simulate;

pub use args::Args;
pub use scene_file::SceneFile;
pub use simulate::Simulation;

use std::fs;

use log::info;

use brickwork::BrickworkError;

/// Run the Brickwork CLI application
///
/// This function lays out the input scene and writes the resulting SVG to
/// the output file.
///
/// # Errors
///
/// Returns `BrickworkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed scene files
/// - Invalid grid options
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), BrickworkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = SceneFile::from_toml(&source)?;

    let mut simulation = Simulation::start(&scene, scene.grid_config(app_config.grid()))?;
    simulation.await_items()?;

    if let Some(width) = args.width {
        info!(width; "Resizing viewport");
        simulation.resize(width);
    }

    let svg = simulation.render(app_config.style())?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
