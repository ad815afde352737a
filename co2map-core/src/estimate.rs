use schemars::JsonSchema;
use serde::Serialize;

use crate::error::{Co2MapError, Result};
use crate::zone::Zone;
use crate::BASELINE_PPM;

// ppm added at the extreme of each axis.
const LAT_WEIGHT_PPM: f64 = 12.0;
const LON_WEIGHT_PPM: f64 = 6.0;

// Band edges over the synthetic excess, ppm above baseline.
const GREEN_EXCESS_CEILING: f64 = 6.0;
const ORANGE_EXCESS_CEILING: f64 = 12.0;

// north and east are positive numbers
#[derive(Debug, Copy, Clone, Serialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// The single validation boundary for anything claiming to be a
    /// coordinate pair: dataset rows and query parameters both come
    /// through here.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Co2MapError::InvalidArgument(format!(
                "latitude {lat} not in [-90, 90]"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Co2MapError::InvalidArgument(format!(
                "longitude {lon} not in [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub ppm: f64,
    pub zone: Zone,
}

/// Closed-form CO₂ estimate for arbitrary coordinates: a fixed global
/// baseline plus linear latitude/longitude proxies, rounded to two
/// decimals. The zone is banded on the geographic excess itself, so a
/// point at the baseline is green and one near the formula's maximum
/// is red.
pub fn estimate(coords: Coordinates) -> Estimate {
    let excess = (coords.lat.abs() / 90.0) * LAT_WEIGHT_PPM
        + (coords.lon.abs() / 180.0) * LON_WEIGHT_PPM;
    let zone = if excess < GREEN_EXCESS_CEILING {
        Zone::Green
    } else if excess <= ORANGE_EXCESS_CEILING {
        Zone::Orange
    } else {
        Zone::Red
    };
    Estimate {
        ppm: round2(BASELINE_PPM + excess),
        zone,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_at_origin_is_baseline_green() {
        let est = estimate(Coordinates::new(0.0, 0.0).unwrap());
        assert_eq!(est.ppm, 420.0);
        assert_eq!(est.zone, Zone::Green);
    }

    #[test]
    fn estimate_at_extremes_is_maximum_red() {
        let est = estimate(Coordinates::new(90.0, 180.0).unwrap());
        assert_eq!(est.ppm, 438.0);
        assert_eq!(est.zone, Zone::Red);
    }

    #[test]
    fn estimate_rounds_to_two_decimals() {
        // (10/90)*12 + (10/180)*6 = 1.6666... -> 421.67
        let est = estimate(Coordinates::new(10.0, 10.0).unwrap());
        assert_eq!(est.ppm, 421.67);
    }

    #[test]
    fn estimate_band_edges() {
        // excess exactly 6.0 and 12.0 both fall in the orange band
        assert_eq!(estimate(Coordinates::new(45.0, 0.0).unwrap()).zone, Zone::Orange);
        assert_eq!(estimate(Coordinates::new(90.0, 0.0).unwrap()).zone, Zone::Orange);
        assert_eq!(estimate(Coordinates::new(90.0, 30.0).unwrap()).zone, Zone::Red);
    }

    #[test]
    fn coordinates_rejects_out_of_range() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(-90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn coordinates_accepts_the_poles_and_antimeridian() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
    }
}
