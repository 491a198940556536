mod chart;
mod cli;
mod query;
mod stats;
mod store;
mod table;
mod warehouse;

use anyhow::{Error, Result};
use clap::{CommandFactory, Parser};
use cli::{command, command::AnalysisContext, Cli};
use warehouse::Warehouse;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    if !cli.any_analysis() {
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    command::prepare_directories(&cli.cache_dir, &cli.out_dir)?;

    let warehouse = Warehouse::from_env(cli.warehouse_url.clone());
    let ctx = AnalysisContext {
        executor: &warehouse,
        data_set: &cli.data_set,
        label: &cli.label,
        queries_dir: &cli.queries_dir,
        cache_dir: &cli.cache_dir,
        out_dir: &cli.out_dir,
    };

    // a failed domain is reported and the remaining domains still run
    if cli.temperature || cli.all {
        match command::temperature(&ctx).await {
            Ok(()) => println!(
                "Temperature charts saved to `{}`",
                cli.out_dir.join("temperature").display()
            ),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if cli.precipitation || cli.all {
        match command::precipitation(&ctx).await {
            Ok(()) => println!(
                "Precipitation charts saved to `{}`",
                cli.out_dir.join("precipitation").display()
            ),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if cli.extreme || cli.all {
        match command::extreme(&ctx).await {
            Ok(()) => println!(
                "Extreme events charts saved to `{}`",
                cli.out_dir.join("extreme_events").display()
            ),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}
