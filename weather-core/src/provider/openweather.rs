use async_trait::async_trait;
use reqwest::Client;
use serde::de::IgnoredAny;
use std::time::Duration;

use crate::model::{LocationQuery, UnitSystem};

use super::{Dataset, ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> reqwest::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, dataset: Dataset) -> String {
        let path = match dataset {
            Dataset::Current => "weather",
            Dataset::Forecast => "forecast",
        };
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch(
        &self,
        dataset: Dataset,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ProviderError> {
        let mut params: Vec<(&str, String)> = match location {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coords(coords) => vec![
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
            ],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", units.as_str().to_string()));

        let transport = |source: reqwest::Error| ProviderError::Transport {
            dataset,
            source: source.without_url(),
        };

        let res = self
            .http
            .get(self.endpoint(dataset))
            .query(&params)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                dataset,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str::<IgnoredAny>(&body)
            .map_err(|source| ProviderError::MalformedBody { dataset, source })?;

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ProviderError> {
        self.fetch(Dataset::Current, location, units).await
    }

    async fn forecast(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<String, ProviderError> {
        self.fetch(Dataset::Forecast, location, units).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
