//! HTTP client for the weather proxy.
//!
//! This is the only way the presentation layer reaches weather data; it never
//! talks to the upstream provider itself.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;

use crate::model::{CurrentWeather, ForecastResponse, LocationQuery, UnitSystem};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to weather proxy failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather proxy answered with status {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /weather` or `GET /weather/coords`.
    pub async fn current(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<CurrentWeather, ClientError> {
        self.get("/weather", location, units).await
    }

    /// `GET /forecast` or `GET /forecast/coords`.
    pub async fn forecast(
        &self,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<ForecastResponse, ClientError> {
        self.get("/forecast", location, units).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        location: &LocationQuery,
        units: UnitSystem,
    ) -> Result<T, ClientError> {
        let (url, mut params) = match location {
            LocationQuery::City(name) => (
                format!("{}{}", self.base_url, resource),
                vec![("city", name.clone())],
            ),
            LocationQuery::Coords(coords) => (
                format!("{}{}/coords", self.base_url, resource),
                vec![
                    ("lat", coords.lat.to_string()),
                    ("lon", coords.lon.to_string()),
                ],
            ),
        };
        params.push(("units", units.as_str().to_string()));

        log::debug!("GET {url} ({location}, {units})");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        if !status.is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "no error message".to_string());
            return Err(ClientError::Status { status, message });
        }

        Ok(res.json::<T>().await?)
    }
}
