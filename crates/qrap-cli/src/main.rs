use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod exit;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("qrap error: {error:#}");
        std::process::exit(exit::code_for(&error));
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = bootstrap::load_config(&flags)?;
    context::warn_unconfigured(&config);

    // Pure computations never open the database.
    match &cli.command {
        cli::Commands::Hndl(args) => return commands::hndl::handle(args, &config, &flags),
        cli::Commands::MigrationPlan(args) => return commands::migration_plan::handle(args, &flags),
        cli::Commands::Score(args) => return commands::score::handle(args, &flags),
        _ => {}
    }

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize qrap application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QRAP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
