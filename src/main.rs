mod config;
mod context;
mod error;
mod interrupt;
mod logging;
mod monte_carlo;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Config};
use context::SharedContext;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::try_from(Cli::parse())?;
    let ctx = Arc::new(SharedContext::new(config.total_points));

    let sigint = interrupt::install().context("install SIGINT handler")?;
    let (tx, rx) = mpsc::channel(8);
    let forwarder = tokio::spawn(interrupt::forward_interrupts(sigint, tx));
    let listener = tokio::spawn(interrupt::listen(
        Arc::clone(&ctx),
        rx,
        std::io::stdout(),
    ));

    let summary = monte_carlo::run(&config, ctx).await?;

    // Aborting the forwarder drops the sender, which ends the listener.
    forwarder.abort();
    match listener.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!("failed to write interrupt report: {}", err),
        Err(err) => warn!("interrupt listener did not finish cleanly: {}", err),
    }

    println!("elapsed time = {} ns", summary.elapsed.as_nanos());
    println!("pi = {:.6}", summary.estimate());
    Ok(())
}
