use crate::models::{ObservationField, RawObservation, ResolvedObservation};
use crate::processors::date_normalizer::normalize_date;
use crate::processors::unit_normalizer::{normalize_pressure, normalize_temperature};
use crate::utils::constants::MISSING_VALUE;
use crate::utils::coordinates::parse_coordinate;
use tracing::debug;

/// Value of the first alias present in `raw` with a non-empty value.
///
/// Aliases are compared case-insensitively against the row's keys and tried
/// in order, so earlier aliases win when a row carries several spellings.
pub fn resolve_field<'a>(raw: &'a RawObservation, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| {
        raw.iter().find_map(|(key, value)| {
            let value = value.trim();
            (key.trim().eq_ignore_ascii_case(alias) && !value.is_empty()).then_some(value)
        })
    })
}

pub fn resolve_or<'a>(raw: &'a RawObservation, aliases: &[&str], default: &'a str) -> &'a str {
    resolve_field(raw, aliases).unwrap_or(default)
}

/// Numeric value of a field; unparsable, non-finite and sentinel values are missing
pub fn resolve_number(raw: &RawObservation, field: ObservationField) -> Option<f64> {
    let text = resolve_field(raw, field.aliases())?;
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value != MISSING_VALUE => Some(value),
        Ok(_) => None,
        Err(_) => {
            debug!("Treating unparsable {} value '{}' as missing", field.name(), text);
            None
        }
    }
}

/// Coordinate value of a field, accepting decimal degrees or D:M:S
pub fn resolve_coordinate(raw: &RawObservation, field: ObservationField) -> Option<f64> {
    let text = resolve_field(raw, field.aliases())?;
    match parse_coordinate(text) {
        Ok(value) if value != MISSING_VALUE => Some(value),
        Ok(_) => None,
        Err(e) => {
            debug!("Treating {} as missing: {}", field.name(), e);
            None
        }
    }
}

/// Resolve every logical field of a row and normalise units and date.
///
/// Never fails: anything unusable becomes missing and is judged by the encoder.
pub fn resolve_observation(raw: &RawObservation) -> ResolvedObservation {
    let raw_date = resolve_field(raw, ObservationField::Date.aliases()).map(str::to_string);
    let timestamp = raw_date
        .as_deref()
        .and_then(|date| normalize_date(date).ok());

    ResolvedObservation {
        station_id: resolve_or(raw, ObservationField::StationId.aliases(), "").to_string(),
        latitude: resolve_coordinate(raw, ObservationField::Latitude),
        longitude: resolve_coordinate(raw, ObservationField::Longitude),
        timestamp,
        raw_date,
        sea_level_pressure: normalize_pressure(resolve_number(
            raw,
            ObservationField::SeaLevelPressure,
        )),
        pressure: normalize_pressure(resolve_number(raw, ObservationField::Pressure)),
        height: resolve_number(raw, ObservationField::Height),
        temperature: normalize_temperature(resolve_number(raw, ObservationField::Temperature)),
        wind_speed: resolve_number(raw, ObservationField::WindSpeed),
        wind_direction: resolve_number(raw, ObservationField::WindDirection),
        relative_humidity: resolve_number(raw, ObservationField::RelativeHumidity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawObservation {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let raw = row(&[("LATITUDE", "51.5"), ("Station_ID", "KX01")]);
        assert_eq!(resolve_field(&raw, &["latitude", "lat"]), Some("51.5"));
        assert_eq!(
            resolve_field(&raw, ObservationField::StationId.aliases()),
            Some("KX01")
        );
    }

    #[test]
    fn test_alias_order_defines_priority() {
        // Column order in the row does not matter, alias order does
        let raw = row(&[("lat", "10.0"), ("latitude", "20.0")]);
        assert_eq!(resolve_field(&raw, &["latitude", "lat"]), Some("20.0"));
    }

    #[test]
    fn test_empty_values_fall_through_to_next_alias() {
        let raw = row(&[("latitude", "  "), ("lat", "33.3")]);
        assert_eq!(resolve_field(&raw, &["latitude", "lat"]), Some("33.3"));
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let raw = row(&[("foo", "bar")]);
        assert_eq!(resolve_or(&raw, &["latitude", "lat"], "none"), "none");
        assert_eq!(resolve_field(&raw, &["latitude"]), None);
    }

    #[test]
    fn test_resolve_number_missing_cases() {
        let raw = row(&[("p", "abc"), ("z", "-888888"), ("t", "NaN"), ("rh", "87.5")]);
        assert_eq!(resolve_number(&raw, ObservationField::Pressure), None);
        assert_eq!(resolve_number(&raw, ObservationField::Height), None);
        assert_eq!(resolve_number(&raw, ObservationField::Temperature), None);
        assert_eq!(resolve_number(&raw, ObservationField::RelativeHumidity), Some(87.5));
    }

    #[test]
    fn test_resolve_observation_normalises_units_and_date() {
        let raw = row(&[
            ("sid", "KX01"),
            ("lat", "51:30:00"),
            ("lon", "-0.5"),
            ("valid_time", "2024-03-01 12:00:00"),
            ("mslp", "1013.25"),
            ("pres", "1000"),
            ("temp", "15.0"),
            ("wspd", "4.2"),
            ("wdir", "270"),
        ]);

        let obs = resolve_observation(&raw);
        assert_eq!(obs.station_id, "KX01");
        assert_eq!(obs.latitude, Some(51.5));
        assert_eq!(obs.longitude, Some(-0.5));
        assert_eq!(obs.timestamp.as_deref(), Some("20240301120000"));
        assert_eq!(obs.raw_date.as_deref(), Some("2024-03-01 12:00:00"));
        assert!((obs.sea_level_pressure.unwrap() - 101325.0).abs() < 1e-6);
        assert_eq!(obs.pressure, Some(100000.0));
        assert_eq!(obs.height, None);
        assert!((obs.temperature.unwrap() - 288.15).abs() < 1e-9);
        assert_eq!(obs.wind_speed, Some(4.2));
        assert_eq!(obs.wind_direction, Some(270.0));
        assert_eq!(obs.relative_humidity, None);
    }

    #[test]
    fn test_unparsable_date_keeps_raw_text() {
        let raw = row(&[("date", "not-a-date"), ("pressure", "1000")]);
        let obs = resolve_observation(&raw);
        assert_eq!(obs.timestamp, None);
        assert_eq!(obs.raw_date.as_deref(), Some("not-a-date"));
    }
}
