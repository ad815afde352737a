use schemars::JsonSchema;
use serde::Serialize;
use strum_macros;

use crate::{GREEN_CEILING_PPM, ORANGE_CEILING_PPM};

/// Qualitative CO₂ zone. JSON and `Display` render lowercase; the
/// estimate endpoint uses the capitalized [`Zone::label`] form instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Zone {
    Green,
    Orange,
    Red,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Green => "Green",
            Zone::Orange => "Orange",
            Zone::Red => "Red",
        }
    }
}

/// Map a measured ppm value onto the canonical cut points.
pub fn classify(ppm: f64) -> Zone {
    if ppm < GREEN_CEILING_PPM {
        Zone::Green
    } else if ppm <= ORANGE_CEILING_PPM {
        Zone::Orange
    } else {
        Zone::Red
    }
}
