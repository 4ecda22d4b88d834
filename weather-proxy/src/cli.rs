use anyhow::Context;
use clap::Parser;
use std::{net::SocketAddr, sync::Arc};
use weather_core::{Config, provider::provider_from_config};

use crate::{routes, service::ProxyService};

/// Command-line arguments. Each one falls back to the config file when unset.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "Weather API proxy")]
pub struct Args {
    /// Address to listen on, e.g. 127.0.0.1:5001.
    #[arg(long, env = "WEATHER_PROXY_BIND")]
    pub bind: Option<SocketAddr>,

    /// OpenWeather API key.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenWeather data API.
    #[arg(long, env = "OPENWEATHER_BASE_URL")]
    pub upstream: Option<String>,
}

impl Args {
    /// Merge arguments over the on-disk config.
    fn into_config(self, mut config: Config) -> Config {
        if let Some(bind) = self.bind {
            config.proxy.bind = Some(bind.to_string());
        }
        if let Some(api_key) = self.api_key {
            config.set_provider_api_key(api_key);
        }
        if let Some(upstream) = self.upstream {
            config.provider.base_url = Some(upstream);
        }
        config
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.into_config(Config::load()?);

        let provider = provider_from_config(&config)?;
        let service = ProxyService::new(Arc::from(provider));

        let addr: SocketAddr = config
            .proxy_bind()
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", config.proxy_bind()))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        log::info!(
            "Weather proxy listening on {addr}, upstream {}",
            config.upstream_base_url()
        );

        axum::serve(listener, routes::create_router(service))
            .await
            .context("HTTP server stopped unexpectedly")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_override_config_file() {
        let mut file = Config::default();
        file.set_provider_api_key("FROM_FILE".into());
        file.proxy.bind = Some("0.0.0.0:8080".into());

        let args = Args::try_parse_from([
            "weather-proxy",
            "--api-key",
            "FROM_ARGS",
            "--upstream",
            "http://localhost:9999",
        ])
        .unwrap();

        let config = args.into_config(file);
        assert_eq!(config.provider_api_key(), Some("FROM_ARGS"));
        assert_eq!(config.upstream_base_url(), "http://localhost:9999");
        assert_eq!(config.proxy_bind(), "0.0.0.0:8080");
    }

    #[test]
    fn rejects_invalid_bind_address() {
        let parsed = Args::try_parse_from(["weather-proxy", "--bind", "not-an-address"]);
        assert!(parsed.is_err());
    }
}
