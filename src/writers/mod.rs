pub mod little_r_encoder;
pub mod little_r_writer;

pub use little_r_encoder::LittleREncoder;
pub use little_r_writer::{LittleRWriter, RECORD_SIZE};
