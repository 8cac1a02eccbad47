use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Rejected,
}

/// The result of one script row.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Outcome<'a> {
    /// 1-based position of the row in the script, header excluded.
    pub line: usize,
    pub action: &'a str,
    pub status: Status,
    pub detail: String,
}

/// Writes command outcomes as CSV: `line,action,status,detail`.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    /// Wraps `sink` and writes the header row straight away, so an empty
    /// script still produces a well-formed report.
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(["line", "action", "status", "detail"])?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, outcome: &Outcome<'_>) -> Result<()> {
        self.writer.serialize(outcome)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
