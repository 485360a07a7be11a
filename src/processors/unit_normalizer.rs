//! Unit detection for values that arrive without unit metadata.
//!
//! Plausible hPa (~500-1100) and Pa (~50000-110000) pressures are far apart,
//! as are plausible °C (-90..60) and K (183..333) temperatures, so a single
//! magnitude threshold picks the unit. A real temperature of 150 °C would be
//! read as Kelvin; that approximation is accepted and the thresholds must not
//! change. Converting twice is not idempotent for values that land back under
//! the threshold.

use crate::utils::constants::{
    CELSIUS_THRESHOLD, CELSIUS_TO_KELVIN, HECTOPASCAL_THRESHOLD, HECTOPASCAL_TO_PASCAL,
    MISSING_VALUE,
};

/// Pressure in Pa. Magnitudes below 2000 are taken as hPa.
pub fn normalize_pressure(value: Option<f64>) -> Option<f64> {
    value.map(|v| {
        if is_sentinel(v) {
            v
        } else if v.abs() < HECTOPASCAL_THRESHOLD {
            v * HECTOPASCAL_TO_PASCAL
        } else {
            v
        }
    })
}

/// Temperature in K. Magnitudes below 100 are taken as °C.
pub fn normalize_temperature(value: Option<f64>) -> Option<f64> {
    value.map(|v| {
        if is_sentinel(v) {
            v
        } else if v.abs() < CELSIUS_THRESHOLD {
            v + CELSIUS_TO_KELVIN
        } else {
            v
        }
    })
}

fn is_sentinel(value: f64) -> bool {
    value == MISSING_VALUE
}
