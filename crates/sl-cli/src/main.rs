//! Snowline CLI - identifier-safe SQL for compute pools, services and schema objects

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

use cli::Cli;
use commands::{compute_pool, connection, ident, object, service};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match &cli.command {
        cli::Commands::Connection(args) => connection::execute(args, &cli.global),
        cli::Commands::ComputePool(args) => compute_pool::execute(args, &cli.global),
        cli::Commands::Service(args) => service::execute(args, &cli.global),
        cli::Commands::Object(args) => object::execute(args, &cli.global),
        cli::Commands::Ident(args) => ident::execute(args, &cli.global),
    }
}
