use crate::{Config, LocationQuery, UnitSystem, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Which upstream dataset a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Current,
    Forecast,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Current => "current weather",
            Dataset::Forecast => "5-day forecast",
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that went wrong talking to the upstream provider.
///
/// These are for logs only. Transport errors have their URL stripped because
/// it carries the API key.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request for {dataset} failed: {source}")]
    Transport {
        dataset: Dataset,
        #[source]
        source: reqwest::Error,
    },

    #[error("{dataset} request failed with status {status}: {body}")]
    Status {
        dataset: Dataset,
        status: StatusCode,
        body: String,
    },

    #[error("{dataset} response was not valid JSON: {source}")]
    MalformedBody {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },
}

/// Upstream weather source. Bodies come back exactly as the provider sent them.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ProviderError>;

    async fn forecast(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ProviderError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.provider_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: set OPENWEATHER_API_KEY, pass --api-key, or run `weather configure`."
        )
    })?;

    let provider = OpenWeatherProvider::with_base_url(api_key, config.upstream_base_url())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_provider_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
