use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    yield_tracker::logging::init(cli.verbose);

    match cli.command {
        cli::Command::Schema => yield_tracker::schema::run(),
        cli::Command::Chart {
            base_value,
            title,
            height,
            color,
            seed,
            as_of,
            output,
        } => commands::chart(&commands::ChartArgs {
            base_value,
            title,
            height,
            color,
            seed,
            as_of,
            output,
        }),
        cli::Command::Yields {
            timeframe,
            seed,
            as_of,
            json,
        } => commands::yields(&timeframe, seed, as_of.as_deref(), json),
        cli::Command::Dashboard {
            conn,
            timeframe,
            output,
        } => runtime()?.block_on(commands::dashboard(&conn, &timeframe, output.as_deref())),
        cli::Command::Positions {
            conn,
            address,
            json,
        } => runtime()?.block_on(commands::positions(&conn, address.as_deref(), json)),
    }
}

/// Single-threaded runtime; the dashboard never needs parallelism.
fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")
}
