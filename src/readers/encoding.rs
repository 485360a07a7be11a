use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

const UTF8_BOM: char = '\u{feff}';

/// Decode a CSV cell, falling back to Windows-1252 when it is not UTF-8.
///
/// Station tables exported from spreadsheets are often Latin-1; rejecting a
/// whole row over an accented station name is not worth it.
pub fn decode_cell(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            match text {
                Cow::Borrowed(s) => s.to_string(),
                Cow::Owned(s) => s,
            }
        }
    }
}

/// Decode a header cell, dropping a leading byte-order mark
pub fn decode_header(bytes: &[u8]) -> String {
    decode_cell(bytes).trim_start_matches(UTF8_BOM).to_string()
}

pub fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true);
    builder
}
