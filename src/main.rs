//! seapay - sea duty service record extractor

mod commands;

use anyhow::Result;
use clap::Parser;

use seapay::cli::{Cli, Commands, ConfigCommands, ShipsCommands};
use seapay::logging::{init_tracing, level_for};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json, level_for(cli.verbose));

    match cli.command {
        Commands::Extract(args) => commands::extract::handle(&args),
        Commands::Ships(ShipsCommands::Check { path }) => commands::ships::handle_check(&path),
        Commands::Ships(ShipsCommands::List { ships }) => {
            commands::ships::handle_list(ships.as_deref())
        }
        Commands::Config(ConfigCommands::Show) => commands::config::handle_show(),
        Commands::Config(ConfigCommands::Path) => commands::config::handle_path(),
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
