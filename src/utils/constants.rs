/// little_r sentinel values
pub const MISSING_VALUE: f64 = -888888.0;
pub const MISSING_INT: i64 = -888888;
pub const END_OF_REPORT_VALUE: f64 = -777777.0;

/// QC code written alongside every value; no quality control is performed
pub const QC_NONE: i64 = 0;

/// Header text literals
pub const UNKNOWN_STATION_ID: &str = "UNKNOWN";
pub const PLATFORM_TYPE: &str = "local";
pub const PLATFORM_CODE: &str = "FM-12";
pub const LOGICAL_FALSE: &str = "F";

/// End-of-message trailer
pub const END_OF_MESSAGE_MARKER: i64 = 10;

/// Unit detection thresholds
pub const HECTOPASCAL_THRESHOLD: f64 = 2000.0;
pub const HECTOPASCAL_TO_PASCAL: f64 = 100.0;
pub const CELSIUS_THRESHOLD: f64 = 100.0;
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Column widths
pub const COORD_WIDTH: usize = 20;
pub const TEXT_WIDTH: usize = 40;
pub const INT_WIDTH: usize = 10;
pub const DATE_WIDTH: usize = 20;
pub const VALUE_WIDTH: usize = 13;
pub const QC_WIDTH: usize = 7;
pub const TRAILER_WIDTH: usize = 7;
pub const DECIMALS: usize = 5;

/// Slot counts
pub const HEADER_SENTINEL_INTS: usize = 5;
pub const HEADER_FLAG_COUNT: usize = 3;
pub const HEADER_TRAILING_INTS: usize = 2;
pub const HEADER_VALUE_PAIRS: usize = 13;
pub const LEVEL_VALUE_PAIRS: usize = 10;

/// Lines per record
pub const RECORD_LINES: usize = 4;

/// Line lengths, newline excluded
pub const HEADER_LINE_LEN: usize = 600;
pub const DATA_LINE_LEN: usize = 200;
pub const END_OF_REPORT_LINE_LEN: usize = 200;
pub const END_OF_MESSAGE_LINE_LEN: usize = 21;

/// Compact timestamp layout
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
pub const TIMESTAMP_LEN: usize = 14;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const PROGRESS_UPDATE_INTERVAL: u64 = 500;
