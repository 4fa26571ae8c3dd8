use anyhow::Result;
use clap::Parser;

use crate::cli::{App, Commands};
use crate::config::Config;

mod cli;
mod config;
mod deps;
mod gn;
mod layout;
mod logging;
mod patch;
mod pipeline;
mod toolchain;

fn main() -> Result<()> {
    let app = App::parse();
    let config = Config::load(app.config.as_deref(), app.overrides())?;
    logging::init(config.verbose);

    match app.cmd {
        Commands::Build(args) => pipeline::build(&config.resolve()?, &args),
        Commands::Repack(args) => pipeline::repack(&config, &args),
    }
}
