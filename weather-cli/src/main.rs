//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the interactive search menu
//! - Human-friendly output formatting
//!
//! All weather data comes through the weather proxy.

use clap::Parser;

mod cli;
mod configure;
mod interactive;
mod locate;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::init_from_env(env);

    let cmd = cli::Cli::parse();
    cmd.run().await
}
