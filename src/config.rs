//! Converter settings.
//!
//! Layered as built-in defaults, then an optional TOML/YAML/JSON file, then
//! `LITTLE_R_*` environment variables (e.g. `LITTLE_R_PLATFORM_CODE=FM-13`).

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, PLATFORM_CODE, PLATFORM_TYPE, UNKNOWN_STATION_ID,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

pub const ENV_PREFIX: &str = "LITTLE_R";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ConverterConfig {
    /// Header name column
    #[validate(length(max = 40))]
    pub platform_type: String,

    /// Header platform column
    #[validate(length(max = 40))]
    pub platform_code: String,

    /// Header source column
    #[validate(length(max = 40))]
    pub source: String,

    /// Written in place of an empty station id
    #[validate(length(min = 1, max = 40))]
    pub unknown_station_id: String,

    /// Output buffer in bytes; must hold at least one record
    pub write_buffer_size: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            platform_type: PLATFORM_TYPE.to_string(),
            platform_code: PLATFORM_CODE.to_string(),
            source: String::new(),
            unknown_station_id: UNKNOWN_STATION_ID.to_string(),
            write_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ConverterConfig {
    /// Load settings from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Reading converter settings from {}", path.display());
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: ConverterConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
