use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::json;

use co2map_core::error::{Co2MapError, Result};
use co2map_core::estimate::{estimate, Coordinates};

/// Raw query parameters. Kept as strings so validation happens in one
/// explicit step instead of inside the extractor.
#[derive(Debug, Deserialize)]
pub struct EstimateParams {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Serialize, JsonSchema)]
pub struct EstimateResults {
    latitude: f64,
    longitude: f64,
    ppm: f64,
    zone: &'static str,
}

/// Estimate CO₂ for arbitrary coordinates. Missing, malformed or
/// out-of-range parameters are a 400 with a JSON error body, never an
/// unhandled failure.
pub async fn estimate_handler(Query(params): Query<EstimateParams>) -> impl IntoResponse {
    match parse_coordinates(&params) {
        Ok(coords) => {
            let est = estimate(coords);
            Ok((
                StatusCode::OK,
                Json(EstimateResults {
                    latitude: coords.lat,
                    longitude: coords.lon,
                    ppm: est.ppm,
                    zone: est.zone.label(),
                }),
            ))
        }
        Err(err) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )),
    }
}

fn parse_coordinates(params: &EstimateParams) -> Result<Coordinates> {
    let lat = parse_axis(params.lat.as_deref(), "lat")?;
    let lon = parse_axis(params.lon.as_deref(), "lon")?;
    Coordinates::new(lat, lon)
}

fn parse_axis(field: Option<&str>, name: &str) -> Result<f64> {
    let raw = field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Co2MapError::InvalidArgument(format!("missing query parameter '{name}'"))
        })?;
    raw.parse::<f64>().map_err(|_| {
        Co2MapError::InvalidArgument(format!(
            "query parameter '{name}' is not a number: {raw:?}"
        ))
    })
}

pub async fn estimate_schema_handler() -> String {
    let schema = schema_for!(EstimateResults);
    serde_json::to_string(&schema).expect("json schema")
}
