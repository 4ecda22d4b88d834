//! Core library for the weather proxy and its terminal client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction used by the proxy
//! - The proxy client, forecast summarizer and session state used by the CLI
//! - Shared domain models and the user-facing error taxonomy

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;
pub mod summary;

pub use client::{ClientError, ProxyClient};
pub use config::Config;
pub use error::{SearchKind, UiError, ValidationError};
pub use location::{HomeLocator, LocateError, Locator};
pub use model::{
    Coordinates, CurrentWeather, DailySummary, ForecastResponse, ForecastSample, LocationQuery,
    UnitSystem,
};
pub use provider::{ProviderError, WeatherProvider};
pub use session::{SearchMode, Session, WeatherReport, fetch_report};
pub use summary::{DEFAULT_FORECAST_DAYS, summarize};
