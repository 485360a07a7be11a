pub mod batch_pipeline;
pub mod date_normalizer;
pub mod field_resolver;
pub mod unit_normalizer;

pub use batch_pipeline::{convert_files, BatchPipeline};
pub use date_normalizer::{normalize_date, parse_datetime};
pub use field_resolver::{resolve_field, resolve_number, resolve_observation, resolve_or};
pub use unit_normalizer::{normalize_pressure, normalize_temperature};
