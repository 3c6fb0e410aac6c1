//! A CLI tool for loading a CSV object from S3 into PostgreSQL.

#![warn(rust_2018_idioms, unused_extern_crates, clippy::all)]

use anyhow::Result;
use clap::Parser;
use futures::try_join;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod clouds;
mod cmd;
mod common;
mod context;
mod csv_data;
mod drivers;
mod if_exists;
mod schema;
mod table;
mod tls;
mod tokio_glue;

use crate::context::Context;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, because stdout is reserved for the data preview.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tls::install_default_crypto_provider();

    let opt = cmd::Opt::parse();
    debug!("{:?}", opt);

    // Run the command alongside the background-worker future, so that an
    // error reported by a background task (such as the PostgreSQL
    // connection) fails the whole run.
    let (ctx, worker_fut) = Context::create();
    let cmd_fut = cmd::run(ctx, opt);
    try_join!(cmd_fut, worker_fut)?;
    Ok(())
}
