use std::fmt;

/// One encoded little_r report: header, a single surface level, the
/// end-of-report marker line and the end-of-message trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LittleRRecord {
    pub header: String,
    pub data: String,
    pub end_of_report: String,
    pub end_of_message: String,
}

impl LittleRRecord {
    pub fn lines(&self) -> [&str; 4] {
        [
            &self.header,
            &self.data,
            &self.end_of_report,
            &self.end_of_message,
        ]
    }

    /// Size in bytes once written, newlines included
    pub fn encoded_len(&self) -> usize {
        self.lines().iter().map(|line| line.len() + 1).sum()
    }
}

impl fmt::Display for LittleRRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
