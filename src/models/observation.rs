use serde::{Deserialize, Serialize};

/// One input row: header names paired with cell values, in column order.
///
/// Keys are stored exactly as supplied; case folding only happens at lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    fields: Vec<(String, String)>,
}

impl RawObservation {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawObservation
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Logical observation fields and the column names accepted for each.
///
/// Alias order is lookup priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationField {
    StationId,
    Latitude,
    Longitude,
    Date,
    SeaLevelPressure,
    Pressure,
    Height,
    Temperature,
    WindSpeed,
    WindDirection,
    RelativeHumidity,
}

impl ObservationField {
    pub const ALL: [ObservationField; 11] = [
        ObservationField::StationId,
        ObservationField::Latitude,
        ObservationField::Longitude,
        ObservationField::Date,
        ObservationField::SeaLevelPressure,
        ObservationField::Pressure,
        ObservationField::Height,
        ObservationField::Temperature,
        ObservationField::WindSpeed,
        ObservationField::WindDirection,
        ObservationField::RelativeHumidity,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ObservationField::StationId => &["station_id", "sid", "station", "id"],
            ObservationField::Latitude => &["latitude", "lat"],
            ObservationField::Longitude => &["longitude", "lon", "long"],
            ObservationField::Date => &["date", "datetime", "time", "valid_time"],
            ObservationField::SeaLevelPressure => &["sea_level_pressure", "slp", "mslp"],
            ObservationField::Pressure => &["pressure", "pres", "p"],
            ObservationField::Height => &["height", "elevation_m", "z"],
            ObservationField::Temperature => &["temperature", "temp", "t"],
            ObservationField::WindSpeed => &["wind_speed", "wspd", "spd"],
            ObservationField::WindDirection => &["wind_direction", "wdir", "dir"],
            ObservationField::RelativeHumidity => &["relative_humidity", "rh"],
        }
    }

    /// Canonical name, also the first alias
    pub fn name(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// A row after alias resolution and unit normalisation.
///
/// `None` means "not reported" and is rendered as the -888888 sentinel.
/// Pressures are in Pa and temperature in K.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedObservation {
    pub station_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `YYYYMMDDHHMMSS`, absent when the date was missing or unparsable
    pub timestamp: Option<String>,
    /// Date text as supplied, kept for diagnostics
    pub raw_date: Option<String>,
    pub sea_level_pressure: Option<f64>,
    pub pressure: Option<f64>,
    pub height: Option<f64>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub relative_humidity: Option<f64>,
}

impl ResolvedObservation {
    pub fn has_vertical_coordinate(&self) -> bool {
        self.pressure.is_some() || self.height.is_some()
    }
}
