use crate::error::Result;
use crate::models::RawObservation;
use crate::readers::encoding::{csv_builder, decode_cell, decode_header};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::ByteRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads the observation table row by row.
///
/// Column names are kept as written; short rows simply lack the trailing
/// cells and extra cells past the header are ignored.
pub struct ObservationReader {
    delimiter: u8,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Stream observations from a file without loading it whole
    pub fn stream_observations(
        &self,
        path: &Path,
    ) -> Result<ObservationIterator<BufReader<File>>> {
        let file = File::open(path)?;
        self.stream_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    pub fn stream_from<R: Read>(&self, source: R) -> Result<ObservationIterator<R>> {
        let mut reader = csv_builder().delimiter(self.delimiter).from_reader(source);
        let headers = reader.byte_headers()?.iter().map(decode_header).collect();

        Ok(ObservationIterator {
            reader,
            headers,
            record: ByteRecord::new(),
        })
    }

    /// Read every observation of a file into memory
    pub fn read_observations(&self, path: &Path) -> Result<Vec<RawObservation>> {
        self.stream_observations(path)?.collect()
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator for streaming observation rows
pub struct ObservationIterator<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    record: ByteRecord,
}

impl<R: Read> ObservationIterator<R> {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl<R: Read> Iterator for ObservationIterator<R> {
    type Item = Result<RawObservation>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => {
                let mut raw = RawObservation::with_capacity(self.headers.len());
                for (key, cell) in self.headers.iter().zip(self.record.iter()) {
                    raw.push(key.clone(), decode_cell(cell));
                }
                Some(Ok(raw))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
