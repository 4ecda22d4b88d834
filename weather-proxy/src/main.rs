//! HTTP proxy between weather clients and the OpenWeather API.
//!
//! The proxy holds the API key; clients only ever see the relayed payloads.

use clap::Parser;

mod cli;
mod routes;
mod service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args = cli::Args::parse();
    args.run().await
}
