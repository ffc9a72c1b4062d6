//! ShapeInk command line entry point.

use clap::Parser;
use shapeink_app::{run, Cli, CliError};

fn main() -> Result<(), CliError> {
    env_logger::init();
    log::info!("Starting ShapeInk");

    let output = run(Cli::parse())?;
    print!("{output}");
    Ok(())
}
