use crate::error::{ProcessingError, Result};
use crate::models::ElevationTable;
use crate::readers::encoding::{csv_builder, decode_cell, decode_header};
use crate::utils::constants::MISSING_VALUE;
use csv::ByteRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const STATION_ID_ALIASES: &[&str] = &["station_id", "sid"];
pub const ELEVATION_ALIASES: &[&str] = &["elevation", "elev"];

/// Builds the station elevation lookup from the auxiliary station table
pub struct ElevationReader {
    delimiter: u8,
}

impl ElevationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read the station table at `path`.
    ///
    /// Fails when the identity or elevation column cannot be found; the
    /// conversion must not start without it.
    pub fn read_table(&self, path: &Path) -> Result<ElevationTable> {
        let file = File::open(path)?;
        let table = self.read_table_from(BufReader::new(file))?;
        info!(
            "Loaded elevations for {} stations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn read_table_from<R: Read>(&self, source: R) -> Result<ElevationTable> {
        let mut reader = csv_builder().delimiter(self.delimiter).from_reader(source);
        let headers: Vec<String> = reader.byte_headers()?.iter().map(decode_header).collect();

        let id_column = find_column(&headers, STATION_ID_ALIASES).ok_or_else(|| {
            ProcessingError::MalformedElevationSource(format!(
                "no station id column (expected one of: {})",
                STATION_ID_ALIASES.join(", ")
            ))
        })?;
        let elevation_column = find_column(&headers, ELEVATION_ALIASES).ok_or_else(|| {
            ProcessingError::MalformedElevationSource(format!(
                "no elevation column (expected one of: {})",
                ELEVATION_ALIASES.join(", ")
            ))
        })?;

        let mut table = ElevationTable::new();
        let mut record = ByteRecord::new();
        while reader.read_byte_record(&mut record)? {
            let station_id = record.get(id_column).map(decode_cell).unwrap_or_default();
            let raw_elevation = record
                .get(elevation_column)
                .map(decode_cell)
                .unwrap_or_default();

            let elevation = parse_elevation(&raw_elevation);
            if elevation.is_none() && !station_id.trim().is_empty() {
                debug!(
                    "Station {} has no usable elevation ('{}')",
                    station_id.trim(),
                    raw_elevation
                );
            }
            table.insert(&station_id, elevation);
        }

        Ok(table)
    }
}

impl Default for ElevationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the first header matching an alias, aliases tried in order
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(alias))
    })
}

fn parse_elevation(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value != MISSING_VALUE)
}
