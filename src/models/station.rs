use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Station identifier to elevation (metres) lookup.
///
/// Built once per run and read-only afterwards. A `None` elevation records a
/// station whose elevation cell could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationTable {
    elevations: HashMap<String, Option<f64>>,
}

impl ElevationTable {
    pub fn new() -> Self {
        Self {
            elevations: HashMap::new(),
        }
    }

    /// Insert a station; the identifier is trimmed and empty identifiers are ignored.
    /// Later rows for the same station replace earlier ones.
    pub fn insert(&mut self, station_id: &str, elevation: Option<f64>) -> bool {
        let key = station_id.trim();
        if key.is_empty() {
            return false;
        }
        self.elevations.insert(key.to_string(), elevation);
        true
    }

    /// Elevation for a station, `None` when unknown or unparsable
    pub fn elevation(&self, station_id: &str) -> Option<f64> {
        self.elevations.get(station_id.trim()).copied().flatten()
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.elevations.contains_key(station_id.trim())
    }

    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, Option<f64>)> for ElevationTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<f64>)>>(iter: I) -> Self {
        let mut table = ElevationTable::new();
        for (station_id, elevation) in iter {
            table.insert(station_id, elevation);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_and_absent() {
        let table: ElevationTable = vec![("KX01", Some(142.0)), ("KX02", None)]
            .into_iter()
            .collect();

        assert_eq!(table.elevation("KX01"), Some(142.0));
        assert_eq!(table.elevation(" KX01 "), Some(142.0));
        assert_eq!(table.elevation("KX02"), None);
        assert!(table.contains("KX02"));
        assert_eq!(table.elevation("ZZ99"), None);
        assert!(!table.contains("ZZ99"));
    }

    #[test]
    fn test_identifiers_are_case_preserving() {
        let table: ElevationTable = vec![("kx01", Some(10.0))].into_iter().collect();
        assert_eq!(table.elevation("KX01"), None);
        assert_eq!(table.elevation("kx01"), Some(10.0));
    }

    #[test]
    fn test_empty_identifier_ignored() {
        let mut table = ElevationTable::new();
        assert!(!table.insert("   ", Some(5.0)));
        assert!(table.is_empty());
    }
}
