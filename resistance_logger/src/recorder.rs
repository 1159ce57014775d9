//! Append-only CSV recording of acquisition samples.
//!
//! The recorder holds only the path, not an open file handle. Every append opens the file, writes
//! one row, flushes, and syncs it to storage before returning, so a killed process loses at most
//! the row being written. The header is written once when the file is first created; re-opening
//! an existing log appends below the rows already there.

use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sample::Sample;

/// Column headers of the log file, in row order.
pub const HEADER: [&str; 5] = [
    "Process time (s)",
    "Current (uA)",
    "Temperature (ºC)",
    "Voltage (V)",
    "Resistance (Ohms)",
];

/// Errors that can occur while writing the log file.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// The log file could not be opened or synced.
    #[error("Log file I/O error: {0}")]
    Io(#[from] io::Error),
    /// A row could not be serialized or written.
    #[error("Log file write error: {0}")]
    Csv(#[from] csv::Error),
}

/// A CSV recorder that appends one row per sample to a log file.
pub struct Recorder {
    path: PathBuf,
}

impl Recorder {
    /// Create a recorder for the given path, writing the header row if the file does not exist.
    ///
    /// An already existing file is left untouched, so restarting an acquisition against the same
    /// log appends below the existing rows without duplicating the header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, RecorderError> {
        let path = path.as_ref().to_path_buf();
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => Self::write_row(&file, HEADER)?,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
        Ok(Recorder { path })
    }

    /// Append one sample as a comma-delimited row.
    ///
    /// The row is synced to storage before this returns.
    pub fn append(&mut self, sample: &Sample) -> Result<(), RecorderError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let row = [
            sample.elapsed_s.to_string(),
            sample.current_a.to_string(),
            sample.temperature_c.to_string(),
            sample.voltage_v.to_string(),
            sample.resistance_ohm.to_string(),
        ];
        Self::write_row(&file, row)
    }

    /// Write one record through a fresh CSV writer and sync the file.
    fn write_row<R, F>(file: &File, row: R) -> Result<(), RecorderError>
    where
        R: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        drop(writer);
        file.sync_all()?;
        Ok(())
    }
}
