use crate::error::{ProcessingError, Result};

/// Convert a `D:M:S` station coordinate to decimal degrees.
///
/// A leading minus applies to the whole value, so `-0:07:39` is west of
/// Greenwich even though its degree component is zero.
///
/// # Examples
/// ```
/// use little_r_converter::utils::dms_to_decimal;
///
/// let lon = dms_to_decimal("-0:27:41").unwrap();
/// assert!((lon - -0.461389).abs() < 0.000001);
/// ```
pub fn dms_to_decimal(dms: &str) -> Result<f64> {
    let invalid =
        |detail: String| ProcessingError::InvalidCoordinate(format!("'{}': {}", dms, detail));

    let components = dms
        .split(':')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| invalid(format!("'{}' is not a number", part)))
        })
        .collect::<Result<Vec<f64>>>()?;

    let &[degrees, minutes, seconds] = components.as_slice() else {
        return Err(invalid(format!(
            "expected DD:MM:SS, found {} component(s)",
            components.len()
        )));
    };

    for (name, value) in [("minutes", minutes), ("seconds", seconds)] {
        if !(0.0..60.0).contains(&value) {
            return Err(invalid(format!("{} out of range: {}", name, value)));
        }
    }

    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    Ok(if dms.trim_start().starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

/// Parse a latitude/longitude cell given either as decimal degrees or `D:M:S`
pub fn parse_coordinate(cell: &str) -> Result<f64> {
    let trimmed = cell.trim();

    let value = if trimmed.contains(':') {
        dms_to_decimal(trimmed)?
    } else {
        trimmed.parse::<f64>().map_err(|_| {
            ProcessingError::InvalidCoordinate(format!("'{}' is not a coordinate", cell))
        })?
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProcessingError::InvalidCoordinate(format!(
            "'{}' is not finite",
            cell
        )))
    }
}
