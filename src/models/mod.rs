pub mod observation;
pub mod record;
pub mod report;
pub mod station;

pub use observation::{ObservationField, RawObservation, ResolvedObservation};
pub use record::LittleRRecord;
pub use report::{BatchResult, SkippedRow};
pub use station::ElevationTable;
