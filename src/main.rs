use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{self, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Generate(args) => commands::generate_command(&cli, args)?,
        Commands::List(args) => commands::list_command(&Context::new(&cli), args)?,
        Commands::Show(args) => commands::show_command(&Context::new(&cli), args)?,
        Commands::Search(args) => commands::search_command(&Context::new(&cli), args)?,
        Commands::Related(args) => commands::related_command(&Context::new(&cli), args)?,
        Commands::Validate(args) => commands::validate_command(&Context::new(&cli), args)?,
    }
    Ok(())
}

/// `-v` raises the level to debug, `-q` lowers it to error; `RUST_LOG` wins when set
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
