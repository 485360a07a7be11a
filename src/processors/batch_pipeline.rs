use crate::config::ConverterConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{
    BatchResult, ElevationTable, LittleRRecord, ObservationField, RawObservation, SkippedRow,
};
use crate::processors::field_resolver::{resolve_observation, resolve_or};
use crate::readers::{ElevationReader, ObservationReader};
use crate::utils::constants::PROGRESS_UPDATE_INTERVAL;
use crate::utils::progress::ProgressReporter;
use crate::writers::{LittleREncoder, LittleRWriter};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Drives rows through resolution and encoding, one at a time and in order.
///
/// A row that cannot be encoded is counted and reported, never fatal; only
/// I/O failures stop the batch.
pub struct BatchPipeline<'a> {
    encoder: &'a LittleREncoder,
    elevations: &'a ElevationTable,
}

impl<'a> BatchPipeline<'a> {
    pub fn new(encoder: &'a LittleREncoder, elevations: &'a ElevationTable) -> Self {
        Self {
            encoder,
            elevations,
        }
    }

    /// Encode a single row against the elevation table
    pub fn process_row(&self, raw: &RawObservation) -> Result<LittleRRecord> {
        let obs = resolve_observation(raw);
        let elevation = self.elevations.elevation(&obs.station_id);
        self.encoder.encode(&obs, elevation)
    }

    /// Convert every row, writing each accepted record as soon as it is encoded
    pub fn run<I, W>(
        &self,
        rows: I,
        writer: &mut LittleRWriter<W>,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchResult>
    where
        I: IntoIterator<Item = Result<RawObservation>>,
        W: Write,
    {
        let mut result = BatchResult::default();

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;

            if let Some(progress) = progress {
                if row_number as u64 % PROGRESS_UPDATE_INTERVAL == 0 {
                    progress.update(row_number as u64);
                }
            }

            let raw = match row {
                Ok(raw) => raw,
                Err(e) if e.is_row_level() => {
                    result.record_skipped(skip(row_number, String::new(), &e));
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.process_row(&raw) {
                Ok(record) => {
                    writer.write_record(&record)?;
                    result.record_emitted();
                }
                Err(e) if e.is_row_level() => {
                    let station_id =
                        resolve_or(&raw, ObservationField::StationId.aliases(), "").to_string();
                    result.record_skipped(skip(row_number, station_id, &e));
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(progress) = progress {
            progress.update(result.processed as u64);
        }

        info!(
            "Batch complete: {} rows, {} records, {} skipped",
            result.processed, result.emitted, result.skipped
        );
        Ok(result)
    }
}

fn skip(row: usize, station_id: String, error: &ProcessingError) -> SkippedRow {
    warn!("Skipping row {} (station '{}'): {}", row, station_id, error);
    SkippedRow {
        row,
        station_id,
        reason: error.to_string(),
    }
}

/// Convert an observation CSV into a little_r file.
///
/// The elevation table is built before the output file is created, so a
/// malformed station table leaves no output behind.
pub fn convert_files(
    observations: &Path,
    stations: &Path,
    output: &Path,
    config: &ConverterConfig,
    progress: Option<&ProgressReporter>,
) -> Result<BatchResult> {
    let elevations = ElevationReader::new().read_table(stations)?;
    let rows = ObservationReader::new().stream_observations(observations)?;
    debug!("Observation columns: {:?}", rows.headers());

    let encoder = LittleREncoder::from_config(config);
    let mut writer = LittleRWriter::create(output, config.write_buffer_size)?;

    let result = BatchPipeline::new(&encoder, &elevations).run(rows, &mut writer, progress)?;
    writer.finish()?;

    info!("Wrote {} records to {}", result.emitted, output.display());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::RECORD_LINES;
    use pretty_assertions::assert_eq;

    fn row(pairs: &[(&str, &str)]) -> Result<RawObservation> {
        Ok(pairs.iter().copied().collect())
    }

    fn table() -> ElevationTable {
        vec![("KX01", Some(142.0)), ("KX02", None)].into_iter().collect()
    }

    fn run(rows: Vec<Result<RawObservation>>) -> (BatchResult, String) {
        let encoder = LittleREncoder::new();
        let elevations = table();
        let mut writer = LittleRWriter::new(Vec::new());
        let result = BatchPipeline::new(&encoder, &elevations)
            .run(rows, &mut writer, None)
            .unwrap();
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        (result, output)
    }

    #[test]
    fn test_invalid_rows_are_isolated() {
        let rows = vec![
            row(&[("station_id", "KX01"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
            row(&[("station_id", "KX02"), ("date", "2024-03-01 12:00:00")]),
            row(&[("station_id", "KX03"), ("date", "not-a-date"), ("z", "10")]),
            row(&[("station_id", "KX04"), ("date", "20240301130000"), ("height", "20")]),
            row(&[("date", "2024-03-01T14:00"), ("pressure", "101000")]),
        ];

        let (result, output) = run(rows);

        assert_eq!(result.processed, 5);
        assert_eq!(result.emitted, 3);
        assert_eq!(result.skipped, 2);
        assert_eq!(output.lines().count(), 3 * RECORD_LINES);

        assert_eq!(result.skipped_rows[0].row, 2);
        assert_eq!(result.skipped_rows[0].station_id, "KX02");
        assert!(result.skipped_rows[0].reason.contains("pressure or height"));
        assert_eq!(result.skipped_rows[1].row, 3);
        assert_eq!(result.skipped_rows[1].station_id, "KX03");
        assert!(result.skipped_rows[1].reason.contains("not-a-date"));
    }

    #[test]
    fn test_output_preserves_input_order() {
        let rows = vec![
            row(&[("sid", "B"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
            row(&[("sid", "A"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
            row(&[("sid", "C"), ("date", "2024-03-01 12:00:00")]),
            row(&[("sid", "D"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
        ];

        let (_, output) = run(rows);
        let ids: Vec<&str> = output
            .lines()
            .step_by(RECORD_LINES)
            .map(|header| header[40..80].trim_end())
            .collect();
        assert_eq!(ids, vec!["B", "A", "D"]);
    }

    #[test]
    fn test_elevation_lookup() {
        let rows = vec![
            row(&[("sid", "KX01"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
            row(&[("sid", "ZZ99"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
            row(&[("sid", "KX02"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
        ];

        let (_, output) = run(rows);
        let elevations: Vec<&str> = output
            .lines()
            .step_by(RECORD_LINES)
            .map(|header| &header[200..220])
            .collect();
        assert_eq!(
            elevations,
            vec![
                "           142.00000",
                "       -888888.00000",
                "       -888888.00000"
            ]
        );
    }

    #[test]
    fn test_unreadable_row_is_skipped() {
        let unreadable = csv::ReaderBuilder::new()
            .from_reader("a,b\n1,2,3\n".as_bytes())
            .records()
            .find_map(|r| r.err())
            .map(ProcessingError::from)
            .unwrap();

        let rows = vec![
            Err(unreadable),
            row(&[("sid", "KX01"), ("date", "2024-03-01 12:00:00"), ("p", "1000")]),
        ];

        let (result, _) = run(rows);
        assert_eq!(result.emitted, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.skipped_rows[0].row, 1);
    }

    #[test]
    fn test_io_error_is_fatal() {
        let encoder = LittleREncoder::new();
        let elevations = table();
        let mut writer = LittleRWriter::new(Vec::new());
        let rows = vec![Err(ProcessingError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated",
        )))];

        let result = BatchPipeline::new(&encoder, &elevations).run(rows, &mut writer, None);
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }

    #[test]
    fn test_empty_batch() {
        let (result, output) = run(Vec::new());
        assert_eq!(result, BatchResult::default());
        assert!(output.is_empty());
    }
}
