pub mod elevation_reader;
pub mod encoding;
pub mod observation_reader;

pub use elevation_reader::ElevationReader;
pub use observation_reader::{ObservationIterator, ObservationReader};
