use crate::error::{ProcessingError, Result};
use crate::models::LittleRRecord;
use crate::utils::constants::{
    DATA_LINE_LEN, END_OF_MESSAGE_LINE_LEN, END_OF_REPORT_LINE_LEN, HEADER_LINE_LEN,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Bytes one record occupies on disk, newlines included
pub const RECORD_SIZE: usize =
    HEADER_LINE_LEN + DATA_LINE_LEN + END_OF_REPORT_LINE_LEN + END_OF_MESSAGE_LINE_LEN + 4;

/// Append-only little_r output.
///
/// Each record is rendered in full and handed to the sink with a single
/// `write_all`. Behind a `BufWriter` at least one record wide, a flush never
/// lands in the middle of a record.
pub struct LittleRWriter<W: Write> {
    inner: W,
    records_written: usize,
}

impl<W: Write> LittleRWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    pub fn write_record(&mut self, record: &LittleRRecord) -> Result<()> {
        let encoded = record.to_string();
        self.inner.write_all(encoded.as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl LittleRWriter<BufWriter<File>> {
    /// Create (or truncate) an output file, creating parent directories
    pub fn create(path: &Path, buffer_size: usize) -> Result<Self> {
        if buffer_size < RECORD_SIZE {
            return Err(ProcessingError::Config(format!(
                "Write buffer of {} bytes cannot hold a {}-byte record",
                buffer_size, RECORD_SIZE
            )));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        Ok(Self::new(BufWriter::with_capacity(buffer_size, file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResolvedObservation;
    use crate::writers::LittleREncoder;
    use tempfile::TempDir;

    fn record() -> LittleRRecord {
        let obs = ResolvedObservation {
            station_id: "KX01".to_string(),
            timestamp: Some("20240301120000".to_string()),
            pressure: Some(100000.0),
            ..ResolvedObservation::default()
        };
        LittleREncoder::new().encode(&obs, Some(142.0)).unwrap()
    }

    #[test]
    fn test_record_size_matches_encoding() {
        assert_eq!(record().encoded_len(), RECORD_SIZE);
        assert_eq!(record().to_string().len(), RECORD_SIZE);
    }

    #[test]
    fn test_writes_whole_records_in_order() -> Result<()> {
        let mut writer = LittleRWriter::new(Vec::new());
        writer.write_record(&record())?;
        writer.write_record(&record())?;
        assert_eq!(writer.records_written(), 2);

        let bytes = writer.finish()?;
        assert_eq!(bytes.len(), 2 * RECORD_SIZE);
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert!(text.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn test_create_makes_parent_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("obs.little_r");

        let mut writer = LittleRWriter::create(&path, RECORD_SIZE)?;
        writer.write_record(&record())?;
        writer.finish()?;

        assert_eq!(std::fs::metadata(&path)?.len() as usize, RECORD_SIZE);
        Ok(())
    }

    #[test]
    fn test_create_rejects_small_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("obs.little_r");
        assert!(matches!(
            LittleRWriter::create(&path, 64),
            Err(ProcessingError::Config(_))
        ));
        assert!(!path.exists());
    }
}
