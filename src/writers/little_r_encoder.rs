//! Fixed-width little_r rendering.
//!
//! Column layout, newline excluded:
//!
//! | line           | layout                                                         | width |
//! |----------------|----------------------------------------------------------------|-------|
//! | header         | 2F20.5, 4A40, F20.5, 5I10, 3L10, 2I10, A20, 13(F13.5, I7)      | 600   |
//! | data           | 10(F13.5, I7)                                                  | 200   |
//! | end of report  | 10(F13.5, I7)                                                  | 200   |
//! | end of message | 3I7                                                            | 21    |
//!
//! Downstream readers parse by column position, so every line has a fixed
//! length whatever the values.

use crate::config::ConverterConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{LittleRRecord, ResolvedObservation};
use crate::utils::constants::*;
use tracing::warn;

pub struct LittleREncoder {
    platform_type: String,
    platform_code: String,
    source: String,
    unknown_station_id: String,
}

impl LittleREncoder {
    pub fn new() -> Self {
        Self {
            platform_type: PLATFORM_TYPE.to_string(),
            platform_code: PLATFORM_CODE.to_string(),
            source: String::new(),
            unknown_station_id: UNKNOWN_STATION_ID.to_string(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            platform_type: config.platform_type.clone(),
            platform_code: config.platform_code.clone(),
            source: config.source.clone(),
            unknown_station_id: config.unknown_station_id.clone(),
        }
    }

    /// Encode one observation, or explain why it cannot be encoded.
    ///
    /// Rejections, in order: no pressure and no height, then no usable
    /// timestamp. An empty station id is replaced, not rejected.
    pub fn encode(
        &self,
        obs: &ResolvedObservation,
        elevation: Option<f64>,
    ) -> Result<LittleRRecord> {
        if !obs.has_vertical_coordinate() {
            return Err(ProcessingError::MissingRequiredField {
                field: "pressure or height".to_string(),
            });
        }

        let timestamp = match (&obs.timestamp, &obs.raw_date) {
            (Some(timestamp), _) => timestamp.as_str(),
            (None, Some(raw)) => {
                return Err(ProcessingError::UnparsableDate { input: raw.clone() })
            }
            (None, None) => {
                return Err(ProcessingError::MissingRequiredField {
                    field: "date".to_string(),
                })
            }
        };

        let station_id = obs.station_id.trim();
        let station_id = if station_id.is_empty() {
            warn!(
                "Empty station id at {}, writing '{}'",
                timestamp, self.unknown_station_id
            );
            self.unknown_station_id.as_str()
        } else {
            station_id
        };

        Ok(LittleRRecord {
            header: self.header_line(obs, station_id, timestamp, elevation),
            data: data_line(obs),
            end_of_report: end_of_report_line(),
            end_of_message: end_of_message_line(),
        })
    }

    fn header_line(
        &self,
        obs: &ResolvedObservation,
        station_id: &str,
        timestamp: &str,
        elevation: Option<f64>,
    ) -> String {
        let mut line = String::with_capacity(HEADER_LINE_LEN);

        line.push_str(&real(obs.latitude, COORD_WIDTH));
        line.push_str(&real(obs.longitude, COORD_WIDTH));
        line.push_str(&text_left(station_id, TEXT_WIDTH));
        line.push_str(&text_left(&self.platform_type, TEXT_WIDTH));
        line.push_str(&text_left(&self.platform_code, TEXT_WIDTH));
        line.push_str(&text_left(&self.source, TEXT_WIDTH));
        line.push_str(&real(elevation, COORD_WIDTH));

        // valid fields, errors, warnings, sequence number, duplicates
        for _ in 0..HEADER_SENTINEL_INTS {
            line.push_str(&int(MISSING_INT, INT_WIDTH));
        }
        // is_sound, bogus, discard
        for _ in 0..HEADER_FLAG_COUNT {
            line.push_str(&text_left(LOGICAL_FALSE, INT_WIDTH));
        }
        // seconds since epoch, julian day
        for _ in 0..HEADER_TRAILING_INTS {
            line.push_str(&int(MISSING_INT, INT_WIDTH));
        }
        line.push_str(&text_right(timestamp, DATE_WIDTH));

        line.push_str(&pair(obs.sea_level_pressure));
        for _ in 1..HEADER_VALUE_PAIRS {
            line.push_str(&pair(None));
        }

        line
    }
}

impl Default for LittleREncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn data_line(obs: &ResolvedObservation) -> String {
    let populated = [
        obs.pressure,
        obs.height,
        obs.temperature,
        obs.relative_humidity,
        obs.wind_speed,
        obs.wind_direction,
    ];

    let mut line = String::with_capacity(DATA_LINE_LEN);
    for value in populated {
        line.push_str(&pair(value));
    }
    for _ in populated.len()..LEVEL_VALUE_PAIRS {
        line.push_str(&pair(None));
    }
    line
}

fn end_of_report_line() -> String {
    let mut line = String::with_capacity(END_OF_REPORT_LINE_LEN);
    line.push_str(&pair(Some(END_OF_REPORT_VALUE)));
    line.push_str(&pair(Some(END_OF_REPORT_VALUE)));
    for _ in 2..LEVEL_VALUE_PAIRS {
        line.push_str(&pair(None));
    }
    line
}

fn end_of_message_line() -> String {
    format!(
        "{}{}{}",
        int(END_OF_MESSAGE_MARKER, TRAILER_WIDTH),
        int(0, TRAILER_WIDTH),
        int(0, TRAILER_WIDTH)
    )
}

/// `F{width}.5`; missing and too-wide values become the sentinel
fn real(value: Option<f64>, width: usize) -> String {
    let value = value.unwrap_or(MISSING_VALUE);
    let rendered = format!("{:>width$.prec$}", value, width = width, prec = DECIMALS);
    if rendered.len() > width {
        warn!("Value {} does not fit a {}-column field, writing missing", value, width);
        return format!("{:>width$.prec$}", MISSING_VALUE, width = width, prec = DECIMALS);
    }
    rendered
}

fn int(value: i64, width: usize) -> String {
    format!("{:>width$}", value, width = width)
}

/// Value plus QC code
fn pair(value: Option<f64>) -> String {
    format!("{}{}", real(value, VALUE_WIDTH), int(QC_NONE, QC_WIDTH))
}

fn text_left(text: &str, width: usize) -> String {
    format!("{:<width$}", fit_text(text, width), width = width)
}

fn text_right(text: &str, width: usize) -> String {
    format!("{:>width$}", fit_text(text, width), width = width)
}

/// Printable ASCII only, one byte per column, cut to the column width
fn fit_text(text: &str, width: usize) -> String {
    text.chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '?' })
        .take(width)
        .collect()
}
