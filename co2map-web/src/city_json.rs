use schemars::JsonSchema;
use serde::Serialize;

use co2map_core::city::{CityRecord, Co2Reading};
use co2map_core::zone::Zone;

/// Wire shape for a single city. Optional columns are omitted rather
/// than serialized as null, matching the historical service output.
#[derive(Serialize, JsonSchema)]
pub struct CityJson {
    name: &'static str,
    latitude: f64,
    longitude: f64,
    co2_ppm: Co2Reading,
    #[serde(skip_serializing_if = "Option::is_none")]
    population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone: Option<Zone>,
}

impl CityJson {
    pub fn from_record(record: &CityRecord) -> Self {
        Self {
            name: record.name.as_str(),
            latitude: record.coords.lat,
            longitude: record.coords.lon,
            co2_ppm: record.co2,
            population: record.population,
            zone: record.zone,
        }
    }
}
