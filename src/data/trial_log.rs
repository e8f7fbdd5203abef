//! CSV trial log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::session::TrialRecord;
use crate::error::Result;

pub const CSV_HEADER: &str = "timestamp,participantID,condition,technique,trial,targetIndex,\
pointerStartPosition,pointerEndPosition,startTimeInMS,endTimeInMS,timeTillFinishedInS,missedClickCount";

pub fn write_header<W: Write>(w: &mut W) -> std::io::Result<()> {
    writeln!(w, "{}", CSV_HEADER)
}

/// Wrap a free-text field in double quotes, doubling embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn write_record<W: Write>(w: &mut W, r: &TrialRecord) -> std::io::Result<()> {
    writeln!(
        w,
        "{},{},{},{},{},{},\"{}\",\"{}\",{:.3},{:.3},{:.3},{}",
        r.timestamp.to_rfc3339(),
        r.participant_id,
        quoted(&r.condition),
        r.technique,
        r.trial,
        r.target_index,
        r.pointer_start,
        r.pointer_end,
        r.start_ms,
        r.end_ms,
        r.duration_s(),
        r.missed_clicks
    )
}

/// Appends records to a CSV file, writing the header when the file is new or empty.
#[derive(Debug, Clone)]
pub struct TrialLogger {
    path: PathBuf,
}

impl TrialLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, records: &[TrialRecord]) -> Result<()> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if needs_header {
            write_header(&mut f)?;
        }
        for r in records {
            write_record(&mut f, r)?;
        }
        log::debug!("Appended {} trial(s) to {:?}", records.len(), self.path);
        Ok(())
    }
}
