//! Domain parameters from a WPS `namelist.wps`-style file, rendered as shell
//! variable assignments for the run scripts.

use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Per-domain parameters, comma-separated integers that may span lines
const LIST_PARAMS: &[&str] = &[
    "parent_id",
    "parent_grid_ratio",
    "i_parent_start",
    "j_parent_start",
    "e_we",
    "e_sn",
];

/// Single-valued parameters with the pattern their value must match
const SCALAR_PARAMS: &[(&str, &str)] = &[
    ("dx", r"([0-9.]+)"),
    ("dy", r"([0-9.]+)"),
    ("map_proj", r"'([^']+)'"),
    ("ref_lat", r"([0-9.\-]+)"),
    ("ref_lon", r"([0-9.\-]+)"),
    ("truelat1", r"([0-9.\-]+)"),
    ("truelat2", r"([0-9.\-]+)"),
    ("stand_lon", r"([0-9.\-]+)"),
    ("pole_lat", r"([0-9.\-]+)"),
    ("pole_lon", r"([0-9.\-]+)"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NamelistValue {
    Scalar(String),
    List(Vec<String>),
}

/// Extracted parameters in a fixed order: lists first, then scalars.
/// Missing lists are empty, missing scalars are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamelistParams {
    entries: Vec<(String, NamelistValue)>,
}

impl NamelistParams {
    pub fn get(&self, key: &str) -> Option<&NamelistValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamelistValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// One `KEY=value` / `KEY=(v1 v2 ...)` line per parameter.
    ///
    /// With a domain index, lists long enough to have that domain collapse to
    /// the single value for it.
    pub fn to_shell(&self, domain_index: Option<usize>) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                let key = key.to_uppercase();
                match value {
                    NamelistValue::Scalar(v) => format!("{}={}", key, v),
                    NamelistValue::List(values) => match domain_index.and_then(|i| values.get(i)) {
                        Some(v) => format!("{}={}", key, v),
                        None => format!("{}=({})", key, values.join(" ")),
                    },
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for NamelistParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_shell(None))
    }
}

pub struct NamelistParser {
    list_patterns: Vec<(&'static str, Regex)>,
    scalar_patterns: Vec<(&'static str, Regex)>,
}

impl NamelistParser {
    pub fn new() -> Result<Self> {
        let list_patterns = LIST_PARAMS
            .iter()
            .map(|name| -> Result<(&'static str, Regex)> {
                let pattern = Regex::new(&format!(r"(?i){}\s*=\s*([0-9,\s]+)", name))?;
                Ok((*name, pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        let scalar_patterns = SCALAR_PARAMS
            .iter()
            .map(|(name, value)| -> Result<(&'static str, Regex)> {
                let pattern = Regex::new(&format!(r"(?i){}\s*=\s*{}", name, value))?;
                Ok((*name, pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            list_patterns,
            scalar_patterns,
        })
    }

    pub fn parse_file(&self, path: &Path) -> Result<NamelistParams> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    pub fn parse_str(&self, content: &str) -> NamelistParams {
        let mut entries = Vec::with_capacity(self.list_patterns.len() + self.scalar_patterns.len());

        for (name, pattern) in &self.list_patterns {
            let values = capture(pattern, content)
                .map(|raw| {
                    raw.split(',')
                        .map(|v| clean_value(v.trim()))
                        .filter(|v| !v.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            entries.push((name.to_string(), NamelistValue::List(values)));
        }

        for (name, pattern) in &self.scalar_patterns {
            if let Some(raw) = capture(pattern, content) {
                entries.push((name.to_string(), NamelistValue::Scalar(clean_value(raw))));
            }
        }

        NamelistParams { entries }
    }
}

/// First capture group, trimmed and without a trailing comma
fn capture<'a>(pattern: &Regex, content: &'a str) -> Option<&'a str> {
    pattern
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(','))
}

fn clean_value(value: &str) -> String {
    value.trim_matches(|c| c == '\'' || c == '"').to_string()
}
