use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Default output path for a conversion run today: `output/little_r-{YYMMDD}.txt`
pub fn generate_default_little_r_filename() -> PathBuf {
    little_r_filename_for(Local::now().date_naive())
}

fn little_r_filename_for(date: NaiveDate) -> PathBuf {
    PathBuf::from("output").join(format!("little_r-{}.txt", date.format("%y%m%d")))
}
