use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::cities_db::CitiesDb;
use crate::city::{CityRecord, Co2Reading};
use crate::error::{Co2MapError, Result};
use crate::estimate::Coordinates;

/// Markers the dataset uses for a missing reading.
const UNAVAILABLE_MARKERS: [&str; 3] = ["n/a", "na", "unavailable"];

/// One row as it appears in the dataset. Unknown columns are ignored by
/// the reader; a precomputed `zone` column is likewise ignored since
/// zones are re-derived from the reading.
#[derive(Debug, Deserialize)]
struct RawCityRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    latitude: Option<String>,
    #[serde(default)]
    longitude: Option<String>,
    #[serde(default)]
    co2: Option<String>,
    #[serde(default)]
    population: Option<String>,
}

/// Read the city dataset into an in-memory collection.
///
/// Rows without a name are skipped. Anything else that does not parse
/// aborts the whole load: there is no partial-load recovery, a bad
/// dataset means the process does not start.
pub fn load_from_csv<P: AsRef<Path>>(path: P) -> Result<CitiesDb> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Co2MapError::DatasetOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut db = CitiesDb::default();
    for (idx, row) in rdr.deserialize::<RawCityRow>().enumerate() {
        // 1-based dataset line, counting the header.
        let row_num = idx + 2;
        let raw = row?;
        let name = match raw.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => {
                debug!("skipping dataset row {row_num}: empty name");
                continue;
            }
        };
        let lat = parse_float(raw.latitude.as_deref(), "latitude", row_num)?;
        let lon = parse_float(raw.longitude.as_deref(), "longitude", row_num)?;
        let coords = Coordinates::new(lat, lon).map_err(|e| {
            let reason = match e {
                Co2MapError::InvalidArgument(reason) => reason,
                other => other.to_string(),
            };
            Co2MapError::MalformedRow {
                row: row_num,
                reason,
            }
        })?;
        let co2 = parse_co2(raw.co2.as_deref(), row_num)?;
        let population = parse_population(raw.population.as_deref(), row_num)?;
        db.insert(CityRecord::new(name, coords, co2, population));
    }
    info!("loaded {} cities from {:?}", db.len(), path);
    Ok(db)
}

fn parse_float(field: Option<&str>, column: &str, row: usize) -> Result<f64> {
    let raw = field
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Co2MapError::MalformedRow {
            row,
            reason: format!("missing {column}"),
        })?;
    raw.parse::<f64>().map_err(|_| Co2MapError::MalformedRow {
        row,
        reason: format!("{column} {raw:?} is not a number"),
    })
}

fn parse_co2(field: Option<&str>, row: usize) -> Result<Co2Reading> {
    let raw = match field.filter(|s| !s.is_empty()) {
        None => return Ok(Co2Reading::Unavailable),
        Some(raw) => raw,
    };
    if UNAVAILABLE_MARKERS.contains(&raw.to_lowercase().as_str()) {
        return Ok(Co2Reading::Unavailable);
    }
    let ppm = raw.parse::<f64>().map_err(|_| Co2MapError::MalformedRow {
        row,
        reason: format!("co2 {raw:?} is not a number"),
    })?;
    if !ppm.is_finite() {
        return Err(Co2MapError::MalformedRow {
            row,
            reason: format!("co2 {raw:?} is not finite"),
        });
    }
    Ok(Co2Reading::Ppm(ppm))
}

fn parse_population(field: Option<&str>, row: usize) -> Result<Option<u64>> {
    match field.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| Co2MapError::MalformedRow {
                row,
                reason: format!("population {raw:?} is not an integer"),
            }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_dataset(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_rows_with_exact_values() {
        let file = write_dataset(
            "name,latitude,longitude,co2,population\n\
             Paris,48.8566,2.3522,412.5,2148000\n\
             Reykjavik,64.1466,-21.9426,395.2,131136\n",
        );
        let db = load_from_csv(file.path()).unwrap();
        assert_eq!(db.len(), 2);

        let paris = db.get("paris").unwrap();
        assert_eq!(paris.coords.lat, 48.8566);
        assert_eq!(paris.coords.lon, 2.3522);
        assert_eq!(paris.co2, Co2Reading::Ppm(412.5));
        assert_eq!(paris.population, Some(2148000));
    }

    #[test]
    fn skips_rows_with_empty_name() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             ,10.0,10.0,400.0\n\
             Paris,48.8566,2.3522,412.5\n",
        );
        let db = load_from_csv(file.path()).unwrap();
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn duplicate_name_last_row_wins() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             Paris,48.8566,2.3522,412.5\n\
             PARIS,48.8566,2.3522,398.0\n",
        );
        let db = load_from_csv(file.path()).unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.get("paris").unwrap().co2, Co2Reading::Ppm(398.0));
    }

    #[test]
    fn unavailable_markers_become_unavailable_reading() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             Nuuk,64.18,-51.69,N/A\n\
             Hobart,-42.88,147.33,\n",
        );
        let db = load_from_csv(file.path()).unwrap();
        assert_eq!(db.get("nuuk").unwrap().co2, Co2Reading::Unavailable);
        assert_eq!(db.get("hobart").unwrap().co2, Co2Reading::Unavailable);
        assert_eq!(db.get("nuuk").unwrap().zone, None);
    }

    #[test]
    fn missing_population_column_is_none() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             Paris,48.8566,2.3522,412.5\n",
        );
        let db = load_from_csv(file.path()).unwrap();
        assert_eq!(db.get("paris").unwrap().population, None);
    }

    #[test]
    fn malformed_latitude_aborts_the_load() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             Paris,not-a-number,2.3522,412.5\n",
        );
        let err = load_from_csv(file.path()).unwrap_err();
        assert!(matches!(err, Co2MapError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn out_of_range_latitude_aborts_the_load() {
        let file = write_dataset(
            "name,latitude,longitude,co2\n\
             Paris,95.0,2.3522,412.5\n",
        );
        let err = load_from_csv(file.path()).unwrap_err();
        assert!(matches!(err, Co2MapError::MalformedRow { row: 2, .. }));
    }

    #[test]
    fn missing_file_is_a_dataset_open_error() {
        let err = load_from_csv("no/such/dataset.csv").unwrap_err();
        assert!(matches!(err, Co2MapError::DatasetOpen { .. }));
    }
}
