use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use schemars::schema_for;
use serde_json::json;

use co2map_core::cities_db::CitiesDb;

use crate::city_json::CityJson;

/// Full collection dump, keyed by normalized name. Keys are emitted in
/// sorted order so an unchanged dataset serializes byte-identically
/// across runs.
pub async fn list_handler(
    Extension(db): Extension<Arc<CitiesDb>>,
) -> Json<BTreeMap<&'static str, CityJson>> {
    let cities = db
        .all
        .values()
        .map(|record| (record.key.as_str(), CityJson::from_record(record)))
        .collect();
    Json(cities)
}

pub async fn fetch_handler(
    Path(path_params): Path<HashMap<String, String>>,
    Extension(db): Extension<Arc<CitiesDb>>,
) -> impl IntoResponse {
    let record = path_params.get("name").and_then(|name| db.get(name));
    match record {
        Some(record) => Ok((StatusCode::OK, Json(CityJson::from_record(record)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "City not found" })),
        )),
    }
}

pub async fn fetch_schema_handler() -> String {
    let schema = schema_for!(CityJson);
    serde_json::to_string(&schema).expect("json schema")
}
