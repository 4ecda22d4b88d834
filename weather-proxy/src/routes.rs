//! HTTP routes of the proxy.
//!
//! Success bodies are the provider's JSON, byte for byte. Failures are
//! `{"error": "..."}` with 400 for bad parameters and 500 for upstream trouble.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use weather_core::{Coordinates, UnitSystem, ValidationError};

use crate::service::{ProxyService, ServiceError};

/// Query params for the city routes
#[derive(Debug, Deserialize)]
pub struct CityParams {
    pub city: Option<String>,
    pub units: Option<String>,
}

/// Query params for the coordinate routes
#[derive(Debug, Deserialize)]
pub struct CoordsParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub units: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The query string itself could not be decoded, e.g. a repeated key.
    Query(QueryRejection),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Service(ServiceError::Invalid(err))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Query(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Service(err @ ServiceError::Invalid(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Service(err @ ServiceError::Upstream(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Query(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

fn relayed(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn coordinates(params: &CoordsParams) -> Result<Coordinates, ValidationError> {
    Coordinates::parse(params.lat.as_deref(), params.lon.as_deref())
}

/// GET /weather?city=&units=
async fn current_by_city(
    State(service): State<ProxyService>,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    log::debug!("GET /weather {params:?}");
    let units = UnitSystem::from_param(params.units.as_deref())?;
    let city = params.city.as_deref().unwrap_or_default();

    Ok(relayed(service.current_by_city(city, units).await?))
}

/// GET /weather/coords?lat=&lon=&units=
async fn current_by_coords(
    State(service): State<ProxyService>,
    params: Result<Query<CoordsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    log::debug!("GET /weather/coords {params:?}");
    let units = UnitSystem::from_param(params.units.as_deref())?;
    let coords = coordinates(&params)?;

    Ok(relayed(
        service
            .current_by_coords(coords.lat, coords.lon, units)
            .await?,
    ))
}

/// GET /forecast?city=&units=
async fn forecast_by_city(
    State(service): State<ProxyService>,
    params: Result<Query<CityParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    log::debug!("GET /forecast {params:?}");
    let units = UnitSystem::from_param(params.units.as_deref())?;
    let city = params.city.as_deref().unwrap_or_default();

    Ok(relayed(service.forecast_by_city(city, units).await?))
}

/// GET /forecast/coords?lat=&lon=&units=
async fn forecast_by_coords(
    State(service): State<ProxyService>,
    params: Result<Query<CoordsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    log::debug!("GET /forecast/coords {params:?}");
    let units = UnitSystem::from_param(params.units.as_deref())?;
    let coords = coordinates(&params)?;

    Ok(relayed(
        service
            .forecast_by_coords(coords.lat, coords.lon, units)
            .await?,
    ))
}

/// GET /health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router
pub fn create_router(service: ProxyService) -> Router {
    // Browser clients call from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/weather", get(current_by_city))
        .route("/weather/coords", get(current_by_coords))
        .route("/forecast", get(forecast_by_city))
        .route("/forecast/coords", get(forecast_by_coords))
        .layer(cors)
        .with_state(service)
}
