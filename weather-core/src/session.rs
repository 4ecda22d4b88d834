//! Client-side session: the last search, the selected units and fetching a
//! complete report through the proxy.

use chrono::TimeZone;

use crate::{
    client::ProxyClient,
    error::{SearchKind, UiError},
    model::{Coordinates, CurrentWeather, DailySummary, LocationQuery, UnitSystem},
    summary::{DEFAULT_FORECAST_DAYS, summarize},
};

/// What the user searched for last.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchMode {
    #[default]
    None,
    City(String),
    Coords(Coordinates),
}

impl SearchMode {
    pub fn query(&self) -> Option<LocationQuery> {
        match self {
            SearchMode::None => None,
            SearchMode::City(name) => Some(LocationQuery::City(name.clone())),
            SearchMode::Coords(coords) => Some(LocationQuery::Coords(*coords)),
        }
    }
}

impl From<&LocationQuery> for SearchMode {
    fn from(query: &LocationQuery) -> Self {
        match query {
            LocationQuery::City(name) => SearchMode::City(name.clone()),
            LocationQuery::Coords(coords) => SearchMode::Coords(*coords),
        }
    }
}

/// Everything needed to draw one result: both halves, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub units: UnitSystem,
    pub current: CurrentWeather,
    pub forecast: Vec<DailySummary>,
}

/// Fetch current weather, then the forecast, and summarize the forecast in `tz`.
///
/// Any failure abandons the whole attempt. Proxy errors are logged and replaced
/// with the generic message for the search kind.
pub async fn fetch_report<Tz: TimeZone>(
    client: &ProxyClient,
    query: &LocationQuery,
    units: UnitSystem,
    tz: &Tz,
) -> Result<WeatherReport, UiError> {
    let kind = query.kind();

    let current = client.current(query, units).await.map_err(|err| {
        log::debug!("current weather for {query} failed: {err}");
        UiError::UpstreamFailure(kind)
    })?;

    let forecast = client.forecast(query, units).await.map_err(|err| {
        log::debug!("forecast for {query} failed: {err}");
        UiError::UpstreamFailure(kind)
    })?;

    Ok(WeatherReport {
        units,
        current,
        forecast: summarize(&forecast.list, DEFAULT_FORECAST_DAYS, tz),
    })
}

/// Session state as an immutable value; every transition returns a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    units: UnitSystem,
    last: SearchMode,
}

impl Session {
    pub fn new(units: UnitSystem) -> Self {
        Self {
            units,
            last: SearchMode::None,
        }
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn last_search(&self) -> &SearchMode {
        &self.last
    }

    /// Turn form input into a city query.
    pub fn search_city(input: &str) -> Result<LocationQuery, UiError> {
        LocationQuery::city(input).map_err(|_| UiError::InvalidInput(SearchKind::City))
    }

    /// Flip the units. Returns the query to re-run with the new units, if any
    /// search happened before.
    pub fn with_units_toggled(&self) -> (Session, Option<LocationQuery>) {
        let next = Session {
            units: self.units.toggled(),
            last: self.last.clone(),
        };
        let query = next.last.query();
        (next, query)
    }

    /// Record a search that completed successfully.
    pub fn remember(&self, query: &LocationQuery) -> Session {
        Session {
            units: self.units,
            last: SearchMode::from(query),
        }
    }

    /// Run `query` with this session's units. On success the returned session
    /// remembers the query; on failure the caller keeps the current one.
    pub async fn fetch<Tz: TimeZone>(
        &self,
        client: &ProxyClient,
        query: &LocationQuery,
        tz: &Tz,
    ) -> Result<(Session, WeatherReport), UiError> {
        let report = fetch_report(client, query, self.units, tz).await?;
        Ok((self.remember(query), report))
    }
}
