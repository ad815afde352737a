use schemars::gen::SchemaGenerator;
use schemars::schema::{Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Serialize, Serializer};
use ustr::Ustr;

use crate::estimate::Coordinates;
use crate::normalize;
use crate::zone::{classify, Zone};

/// One city from the source dataset.
///
/// `key` is the normalized lookup key; `name` keeps the original casing
/// for display. The zone is always derived from the reading so the
/// collection stays self-consistent even when the dataset carries a
/// stale precomputed zone column.
#[derive(Debug, Serialize, Clone, Copy)]
pub struct CityRecord {
    pub key: Ustr,
    pub name: Ustr,
    pub coords: Coordinates,
    pub co2: Co2Reading,
    pub population: Option<u64>,
    pub zone: Option<Zone>,
}

impl CityRecord {
    pub fn new(
        name: &str,
        coords: Coordinates,
        co2: Co2Reading,
        population: Option<u64>,
    ) -> Self {
        Self {
            key: Ustr::from(&normalize(name)),
            name: Ustr::from(name.trim()),
            coords,
            co2,
            population,
            zone: co2.ppm().map(classify),
        }
    }
}

/// A CO₂ measurement: a finite ppm value, or the dataset's explicit
/// "unavailable" marker. Serializes as a JSON number or that string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Co2Reading {
    Ppm(f64),
    Unavailable,
}

impl Co2Reading {
    pub fn ppm(&self) -> Option<f64> {
        match self {
            Co2Reading::Ppm(v) => Some(*v),
            Co2Reading::Unavailable => None,
        }
    }
}

impl Serialize for Co2Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Co2Reading::Ppm(v) => serializer.serialize_f64(*v),
            Co2Reading::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

impl JsonSchema for Co2Reading {
    fn schema_name() -> String {
        "Co2Reading".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject::default();
        schema.subschemas().any_of = Some(vec![
            gen.subschema_for::<f64>(),
            gen.subschema_for::<String>(),
        ]);
        Schema::Object(schema)
    }
}
